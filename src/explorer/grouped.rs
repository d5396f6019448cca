//! Calendar groupings: weekday violins and day-of-month strips.

use super::Explorer;
use crate::error::Result;
use crate::figure::{Artist, AxisKind, Axes, Target};
use crate::plots::Violin;
use crate::series::TimeSeries;
use crate::validate::{require_datetime_index, require_numeric};
use chrono::{Datelike, NaiveDateTime};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Weekday names in chrono's Monday-first order.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Pair every defined observation with its calendar key.
fn bucket_table<K>(dates: &[NaiveDateTime], values: &[f64], key: impl Fn(&NaiveDateTime) -> K) -> Vec<(K, f64)> {
    dates
        .iter()
        .zip(values)
        .filter(|(_, v)| v.is_finite())
        .map(|(t, &v)| (key(t), v))
        .collect()
}

impl Explorer {
    /// One violin per weekday, Monday to Sunday; weekdays without data keep
    /// their slot empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IndexType`] unless the index is date/time
    /// typed, and [`crate::Error::ParameterType`] for a series without
    /// defined values.
    pub fn plot_violin_weekday<'a>(&self, series: &TimeSeries, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let dates = require_datetime_index(series)?;
        require_numeric(series)?;

        let table = bucket_table(dates, series.values(), |t| t.weekday().num_days_from_monday() as usize);
        let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); WEEKDAY_NAMES.len()];
        for (slot, v) in table {
            buckets[slot].push(v);
        }

        let style = &self.config.style;
        let mut violins = Vec::new();
        for (slot, values) in buckets.iter().enumerate() {
            let fill = style.cycle_color(slot);
            if let Some(violin) = Violin::from_values(slot as f64, values, self.config.analysis.kde_points, fill)? {
                violins.push(violin);
            }
        }
        tracing::debug!(
            series = series.name(),
            len = series.len(),
            groups = violins.len(),
            "plot_violin_weekday"
        );

        let mut target = self.provision(ax);
        for violin in violins {
            target.add_artist(Artist::Violin(violin));
        }
        target.set_x_axis(AxisKind::Categorical(
            WEEKDAY_NAMES.iter().map(|s| (*s).to_string()).collect(),
        ));
        target.set_xlabel("");
        target.set_ylabel("");
        target.set_title("Weekday Violin Plot");
        Ok(target)
    }

    /// Jittered strip of observations per day of month, over the ascending
    /// distinct days present.
    ///
    /// Jitter is drawn from a generator seeded by the configuration, so the
    /// same input always yields the same chart.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_violin_weekday`].
    pub fn plot_strip_day_of_month<'a>(
        &self,
        series: &TimeSeries,
        ax: Option<&'a mut Axes>,
    ) -> Result<Target<'a>> {
        let dates = require_datetime_index(series)?;
        require_numeric(series)?;

        let table = bucket_table(dates, series.values(), |t| t.day());
        let mut days: Vec<u32> = table.iter().map(|&(day, _)| day).collect();
        days.sort_unstable();
        days.dedup();
        tracing::debug!(
            series = series.name(),
            len = series.len(),
            groups = days.len(),
            "plot_strip_day_of_month"
        );

        let analysis = &self.config.analysis;
        let half = analysis.strip_jitter / 2.0;
        let mut rng = StdRng::seed_from_u64(analysis.strip_seed);

        let mut target = self.provision(ax);
        for (slot, &day) in days.iter().enumerate() {
            let y: Vec<f64> = table.iter().filter(|&&(d, _)| d == day).map(|&(_, v)| v).collect();
            let x = y
                .iter()
                .map(|_| slot as f64 + if half > 0.0 { rng.gen_range(-half..=half) } else { 0.0 })
                .collect();
            target.add_artist(Artist::Markers {
                x,
                y,
                color: self.config.style.cycle_color(slot),
                radius: self.config.style.marker_radius,
                label: None,
            });
        }
        target.set_x_axis(AxisKind::Categorical(days.iter().map(u32::to_string).collect()));
        target.set_ylabel("");
        target.set_title("Day of Month Stripplot Plot");
        Ok(target)
    }
}
