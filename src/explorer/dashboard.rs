//! The overview dashboard.

use super::single::panel;
use super::Explorer;
use crate::error::{Error, Result};
use crate::figure::Figure;
use crate::series::TimeSeries;

/// Grid rows of the dashboard; half-width panels use two columns.
const ROWS: usize = 10;

impl Explorer {
    /// Dashboard with the moving-average window and seasonal frequency of
    /// the configuration.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_all_with`].
    pub fn plot_all(&self, series: &TimeSeries) -> Result<Figure> {
        let dashboard = &self.config.dashboard;
        self.plot_all_with(series, dashboard.ma_period, dashboard.seasonal_freq)
    }

    /// Every chart of one series on a single tall figure.
    ///
    /// Layout on a 10-row grid: the raw series with its moving average across
    /// the first row; distribution, Q-Q, ACF, PACF, weekday violin and
    /// day-of-month strip in half-width cells 3 to 8; trend, seasonal and
    /// residual full width in rows 5 to 7 for date/time indexed series.
    ///
    /// # Errors
    ///
    /// The first failing panel aborts the dashboard and its error is
    /// returned; in particular [`Error::IndexType`] for a series without a
    /// date/time index.
    pub fn plot_all_with(&self, series: &TimeSeries, ma_period: usize, seasonal_freq: usize) -> Result<Figure> {
        if ma_period == 0 {
            return Err(Error::parameter("ma_period must be >= 1"));
        }
        let dashboard = &self.config.dashboard;
        tracing::debug!(
            series = series.name(),
            len = series.len(),
            ma_period,
            seasonal_freq,
            "plot_all"
        );

        let mut figure = Figure::with_style(dashboard.width, dashboard.height, self.config.style.clone());
        let mut ids = vec![figure.add_subplot(ROWS, 1, 1)?];
        for index in 3..=8 {
            ids.push(figure.add_subplot(ROWS, 2, index)?);
        }

        self.plot(series, Some(panel(&mut figure, ids[0])?), "Time Series", "Raw")?;
        self.plot_ma(series, ma_period, Some(panel(&mut figure, ids[0])?), "", "Moving Average")?;
        self.plot_dist(series, Some(panel(&mut figure, ids[1])?))?;
        self.plot_qq(series, Some(panel(&mut figure, ids[2])?))?;
        self.plot_acf(series, Some(panel(&mut figure, ids[3])?))?;
        self.plot_pacf(series, Some(panel(&mut figure, ids[4])?))?;
        self.plot_violin_weekday(series, Some(panel(&mut figure, ids[5])?))?;
        self.plot_strip_day_of_month(series, Some(panel(&mut figure, ids[6])?))?;

        if series.index().is_datetime() {
            let trend = figure.add_subplot(ROWS, 1, 5)?;
            let seasonal = figure.add_subplot(ROWS, 1, 6)?;
            let resid = figure.add_subplot(ROWS, 1, 7)?;
            self.plot_trend(series, seasonal_freq, Some(panel(&mut figure, trend)?))?;
            self.plot_seasonal(series, seasonal_freq, Some(panel(&mut figure, seasonal)?))?;
            self.plot_resid(series, seasonal_freq, Some(panel(&mut figure, resid)?))?;
        }

        tracing::debug!(panels = figure.len(), "dashboard complete");
        Ok(figure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::figure::{AxesId, Axes};
    use chrono::NaiveDate;

    fn series(n: usize) -> TimeSeries {
        let values = (0..n)
            .map(|i| 50.0 + 5.0 * ((i % 7) as f64) + 0.3 * i as f64 + ((i * 37) % 11) as f64 * 0.2)
            .collect();
        TimeSeries::daily("traffic", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), values)
    }

    #[test]
    fn test_dashboard_panels_in_order() {
        let figure = Explorer::new().plot_all(&series(60)).unwrap();
        assert_eq!((figure.width(), figure.height()), (1300, 4000));
        let titles: Vec<&str> = figure.panels().map(Axes::title).collect();
        assert_eq!(
            titles,
            vec![
                "Time Series",
                "Data Distribution",
                "Q-Q Plot",
                "ACF Plot",
                "PACF Plot",
                "Weekday Violin Plot",
                "Day of Month Stripplot Plot",
                "STL - Trend",
                "STL - Seasonality",
                "STL - Residual",
            ]
        );
        let raw = figure.panels().next().unwrap();
        let labels: Vec<&str> = raw.legend_entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Raw", "Moving Average"]);
    }

    #[test]
    fn test_dashboard_geometry() {
        let figure = Explorer::new().plot_all(&series(60)).unwrap();
        let ids: Vec<AxesId> = figure.ids().collect();
        let rect = |i: usize| figure.panel_rect(ids[i]).unwrap();
        assert_eq!(rect(0).width, 1300.0);
        assert_eq!(rect(1).width, 650.0);
        assert_eq!(rect(7).y, 1600.0);
        assert_eq!(rect(9).y, 2400.0);
    }

    #[test]
    fn test_dashboard_ordinal_index_aborts() {
        let values = (0..30).map(|i| (i as f64).sin()).collect();
        let err = Explorer::new()
            .plot_all(&TimeSeries::from_values("x", values))
            .unwrap_err();
        assert!(err.is_index_type());
    }

    #[test]
    fn test_dashboard_uses_config() {
        let config = ExplorerConfig::default()
            .with_dashboard_size(650, 2000)
            .with_ma_period(3);
        let figure = Explorer::with_config(config).unwrap().plot_all(&series(30)).unwrap();
        assert_eq!((figure.width(), figure.height()), (650, 2000));
    }

    #[test]
    fn test_dashboard_zero_period() {
        let err = Explorer::new().plot_all_with(&series(30), 0, 7).unwrap_err();
        assert!(err.is_parameter_type());
    }
}
