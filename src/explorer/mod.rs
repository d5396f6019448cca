//! Chart façade for exploratory time-series analysis.
//!
//! Every chart operation validates its input first, then provisions axes
//! (the caller's, or a fresh single-panel figure), computes its derived
//! series and records artists. Nothing is drawn on a figure that a failed
//! operation created, and nothing is cached between calls.
//!
//! ```rust,ignore
//! use ts_explorer::prelude::*;
//!
//! let series = TimeSeries::daily("sales", start, values);
//! let explorer = Explorer::new();
//! let figure = explorer.plot_all(&series)?;
//! figure.save_svg("overview.svg")?;
//! ```

mod dashboard;
mod grouped;
mod multi;
mod single;

pub use grouped::WEEKDAY_NAMES;

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::figure::{provision_axes, Artist, AxisKind, Axes, Target};
use crate::render::Stroke;
use crate::series::TimeSeries;

/// Chart operations driven by one [`ExplorerConfig`].
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    config: ExplorerConfig,
}

impl Explorer {
    /// Explorer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Explorer with `config`, after [`ExplorerConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ParameterType`] when a configured value is out
    /// of range.
    pub fn with_config(config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    fn provision<'a>(&self, ax: Option<&'a mut Axes>) -> Target<'a> {
        provision_axes(ax, &self.config)
    }

    /// Line of a series' values against its index, in the next cycle color.
    fn series_line(&self, ax: &mut Axes, series: &TimeSeries, label: &str) -> Artist {
        Artist::Line {
            x: series.index().coordinates(),
            y: series.values().to_vec(),
            stroke: Stroke::solid(ax.next_color(), self.config.style.line_width),
            label: (!label.is_empty()).then(|| label.to_string()),
        }
    }
}

fn index_axis(series: &TimeSeries) -> AxisKind {
    if series.index().is_datetime() {
        AxisKind::DateTime
    } else {
        AxisKind::Numeric
    }
}
