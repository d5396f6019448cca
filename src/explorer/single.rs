//! Single-series charts.

use super::{index_axis, Explorer};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::{Artist, Axes, Figure, Target};
use crate::render::Stroke;
use crate::series::TimeSeries;
use crate::stats::{self, Correlogram, DecomposeOptions};
use crate::validate::{require_all_finite, require_min_len, require_numeric};

impl Explorer {
    /// Line chart of the values against the index.
    ///
    /// The title is set only when non-empty; a non-empty `label` adds a
    /// legend entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] for an empty series or one without
    /// any defined value.
    pub fn plot<'a>(
        &self,
        series: &TimeSeries,
        ax: Option<&'a mut Axes>,
        title: &str,
        label: &str,
    ) -> Result<Target<'a>> {
        require_numeric(series)?;
        tracing::debug!(series = series.name(), len = series.len(), "plot");
        let mut target = self.provision(ax);
        self.draw_series(&mut target, series, title, label);
        Ok(target)
    }

    /// Trailing moving average of `period` observations, drawn like
    /// [`Explorer::plot`] in the next cycle color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] for `period == 0` or an empty series.
    pub fn plot_ma<'a>(
        &self,
        series: &TimeSeries,
        period: usize,
        ax: Option<&'a mut Axes>,
        title: &str,
        label: &str,
    ) -> Result<Target<'a>> {
        require_numeric(series)?;
        let ma = stats::moving_average(series, period)?;
        tracing::debug!(series = series.name(), len = series.len(), period, "plot_ma");
        let mut target = self.provision(ax);
        self.draw_series(&mut target, &ma, title, label);
        Ok(target)
    }

    pub(super) fn draw_series(&self, ax: &mut Axes, series: &TimeSeries, title: &str, label: &str) {
        let line = self.series_line(ax, series, label);
        ax.add_artist(line);
        ax.set_x_axis(index_axis(series));
        if !title.is_empty() {
            ax.set_title(title);
        }
        if !label.is_empty() {
            ax.set_legend(true);
        }
    }

    /// Density histogram with a KDE curve and the fitted normal density.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when any observation is undefined,
    /// or when the series is constant or shorter than two observations.
    pub fn plot_dist<'a>(&self, series: &TimeSeries, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let values = require_all_finite(series)?;
        let histogram = stats::histogram(values)?;
        let density = stats::kde(values, self.config.analysis.kde_points)?;
        let fit = stats::fit_normal(values)?;
        tracing::debug!(
            series = series.name(),
            len = series.len(),
            bins = histogram.density.len(),
            "plot_dist"
        );

        let mut target = self.provision(ax);
        let color = target.next_color();
        let width = self.config.style.line_width;
        target.add_artist(Artist::Bars {
            edges: histogram.edges,
            heights: histogram.density,
            fill: color.with_alpha(100),
            edge: Rgba::WHITE,
        });
        target.add_artist(Artist::Line {
            y: density.x.iter().map(|&x| fit.pdf(x)).collect(),
            x: density.x.clone(),
            stroke: Stroke::solid(self.config.style.foreground, width),
            label: None,
        });
        target.add_artist(Artist::Line {
            x: density.x,
            y: density.density,
            stroke: Stroke::solid(color, width),
            label: None,
        });
        target.set_title("Data Distribution");
        target.set_xlabel("");
        Ok(target)
    }

    /// Normal probability plot: sample quantiles as blue markers against
    /// theoretical quantiles, with the red least-squares line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when any observation is undefined or
    /// fewer than two are given.
    pub fn plot_qq<'a>(&self, series: &TimeSeries, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let values = require_all_finite(series)?;
        require_min_len(series, 2, "Q-Q plot")?;
        let pp = stats::probplot(values)?;
        let (lo, hi) = match (pp.theoretical.first(), pp.theoretical.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => return Err(Error::EmptyData),
        };
        tracing::debug!(series = series.name(), len = series.len(), r = pp.r, "plot_qq");

        let mut target = self.provision(ax);
        target.add_artist(Artist::Markers {
            x: pp.theoretical.clone(),
            y: pp.ordered,
            color: Rgba::BLUE,
            radius: self.config.style.marker_radius,
            label: None,
        });
        target.add_artist(Artist::Line {
            x: vec![lo, hi],
            y: vec![pp.intercept + pp.slope * lo, pp.intercept + pp.slope * hi],
            stroke: Stroke::solid(Rgba::RED, self.config.style.line_width),
            label: None,
        });
        target.set_title("Q-Q Plot");
        target.set_xlabel("");
        target.set_ylabel("");
        Ok(target)
    }

    /// Autocorrelation stems with the shaded Bartlett band around zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when any observation is undefined,
    /// for fewer than two observations or a constant series.
    pub fn plot_acf<'a>(&self, series: &TimeSeries, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let values = require_all_finite(series)?;
        require_min_len(series, 2, "ACF")?;
        let analysis = &self.config.analysis;
        let correlogram = stats::acf(values, analysis.acf_lags, analysis.alpha)?;
        tracing::debug!(series = series.name(), len = series.len(), nlags = correlogram.nlags(), "plot_acf");

        let mut target = self.provision(ax);
        self.draw_correlogram(&mut target, correlogram);
        target.set_title("ACF Plot");
        Ok(target)
    }

    /// Partial autocorrelation stems with the shaded band around zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when any observation is undefined,
    /// for fewer than four observations or a constant series.
    pub fn plot_pacf<'a>(&self, series: &TimeSeries, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let values = require_all_finite(series)?;
        require_min_len(series, 4, "PACF")?;
        let analysis = &self.config.analysis;
        let correlogram = stats::pacf(values, analysis.pacf_lags, analysis.alpha)?;
        tracing::debug!(series = series.name(), len = series.len(), nlags = correlogram.nlags(), "plot_pacf");

        let mut target = self.provision(ax);
        self.draw_correlogram(&mut target, correlogram);
        target.set_title("PACF Plot");
        Ok(target)
    }

    fn draw_correlogram(&self, ax: &mut Axes, correlogram: Correlogram) {
        let color = ax.next_color();
        let lags: Vec<f64> = (0..correlogram.values.len()).map(|k| k as f64).collect();
        ax.add_artist(Artist::Band {
            x: lags.clone(),
            lower: correlogram.band.iter().map(|w| -w).collect(),
            upper: correlogram.band,
            fill: color.with_alpha(64),
        });
        ax.add_artist(Artist::HLine {
            y: 0.0,
            stroke: Stroke::solid(self.config.style.foreground, 1.0),
        });
        ax.add_artist(Artist::Stems {
            x: lags,
            y: correlogram.values,
            color,
            radius: self.config.style.marker_radius,
        });
    }

    /// Trend component of the additive decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when the decomposition preconditions
    /// fail (see [`stats::decompose`]).
    pub fn plot_trend<'a>(&self, series: &TimeSeries, freq: usize, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let component = stats::trend(series, freq)?;
        tracing::debug!(series = series.name(), len = series.len(), freq, "plot_trend");
        let mut target = self.provision(ax);
        self.draw_series(&mut target, &component, "STL - Trend", "");
        Ok(target)
    }

    /// Seasonal component of the additive decomposition.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_trend`].
    pub fn plot_seasonal<'a>(
        &self,
        series: &TimeSeries,
        freq: usize,
        ax: Option<&'a mut Axes>,
    ) -> Result<Target<'a>> {
        let component = stats::seasonal(series, freq)?;
        tracing::debug!(series = series.name(), len = series.len(), freq, "plot_seasonal");
        let mut target = self.provision(ax);
        self.draw_series(&mut target, &component, "STL - Seasonality", "");
        Ok(target)
    }

    /// Residual component of the additive decomposition.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_trend`].
    pub fn plot_resid<'a>(&self, series: &TimeSeries, freq: usize, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let component = stats::resid(series, freq)?;
        tracing::debug!(series = series.name(), len = series.len(), freq, "plot_resid");
        let mut target = self.provision(ax);
        self.draw_series(&mut target, &component, "STL - Residual", "");
        Ok(target)
    }

    /// Separate 1000x1000 figure with the observed series and its trend,
    /// seasonal and residual components stacked top to bottom.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_trend`].
    pub fn plot_decomposition(&self, series: &TimeSeries, freq: usize) -> Result<Figure> {
        let parts = stats::decompose(series, freq, &DecomposeOptions::default())?;
        tracing::debug!(series = series.name(), len = series.len(), freq, "plot_decomposition");

        let mut figure = Figure::with_style(1000, 1000, self.config.style.clone());
        let panels = [
            ("Observed", &parts.observed),
            ("Trend", &parts.trend),
            ("Seasonal", &parts.seasonal),
        ];
        for (i, (title, component)) in panels.into_iter().enumerate() {
            let id = figure.add_subplot(4, 1, i + 1)?;
            let ax = panel(&mut figure, id)?;
            self.draw_series(ax, component, title, "");
        }

        let id = figure.add_subplot(4, 1, 4)?;
        let ax = panel(&mut figure, id)?;
        let color = ax.next_color();
        ax.add_artist(Artist::HLine {
            y: 0.0,
            stroke: Stroke::solid(self.config.style.foreground, 1.0),
        });
        ax.add_artist(Artist::Markers {
            x: parts.resid.index().coordinates(),
            y: parts.resid.values().to_vec(),
            color,
            radius: self.config.style.marker_radius,
            label: None,
        });
        ax.set_x_axis(index_axis(series));
        ax.set_title("Residual");
        Ok(figure)
    }
}

pub(super) fn panel(figure: &mut Figure, id: crate::figure::AxesId) -> Result<&mut Axes> {
    figure
        .axes_mut(id)
        .ok_or_else(|| Error::Rendering(format!("panel {} missing from figure", id.index())))
}
