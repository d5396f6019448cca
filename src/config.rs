//! Explorer configuration.
//!
//! Every field is optional in YAML and falls back to its default, so a style
//! file only needs the values it changes:
//!
//! ```yaml
//! dashboard:
//!   ma_period: 10
//! analysis:
//!   alpha: 0.01
//!   heatmap_color_map: viridis
//! ```

use crate::color::{Rgba, TAB10};
use crate::error::{Error, Result};
use crate::scale::ColorMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Size of single-panel figures created when no axes is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Width in pixels.
    #[serde(default = "default_figure_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_figure_height")]
    pub height: u32,
}

fn default_figure_width() -> u32 {
    640
}
fn default_figure_height() -> u32 {
    480
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: default_figure_width(),
            height: default_figure_height(),
        }
    }
}

/// Dashboard figure size and the parameters of its derived panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Width in pixels.
    #[serde(default = "default_dashboard_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_dashboard_height")]
    pub height: u32,
    /// Moving-average window of the overlay on the first panel.
    #[serde(default = "default_ma_period")]
    pub ma_period: usize,
    /// Seasonal frequency of the decomposition panels.
    #[serde(default = "default_seasonal_freq")]
    pub seasonal_freq: usize,
}

fn default_dashboard_width() -> u32 {
    1300
}
fn default_dashboard_height() -> u32 {
    4000
}
fn default_ma_period() -> usize {
    5
}
fn default_seasonal_freq() -> usize {
    7
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            width: default_dashboard_width(),
            height: default_dashboard_height(),
            ma_period: default_ma_period(),
            seasonal_freq: default_seasonal_freq(),
        }
    }
}

/// Visual style shared by every chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Figure background.
    #[serde(default = "default_background")]
    pub background: Rgba,
    /// Frame, tick and text color.
    #[serde(default = "default_foreground")]
    pub foreground: Rgba,
    /// Panel title font size in pixels.
    #[serde(default = "default_title_size")]
    pub title_size: f32,
    /// Axis label and legend font size in pixels.
    #[serde(default = "default_label_size")]
    pub label_size: f32,
    /// Tick label font size in pixels.
    #[serde(default = "default_tick_size")]
    pub tick_size: f32,
    /// Series line width in pixels.
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    /// Marker radius in pixels.
    #[serde(default = "default_marker_radius")]
    pub marker_radius: f32,
    /// Colors assigned to successive series on one axes.
    #[serde(default = "default_color_cycle")]
    pub color_cycle: Vec<Rgba>,
}

fn default_background() -> Rgba {
    Rgba::WHITE
}
fn default_foreground() -> Rgba {
    Rgba::rgb(38, 38, 38)
}
fn default_title_size() -> f32 {
    15.0
}
fn default_label_size() -> f32 {
    11.0
}
fn default_tick_size() -> f32 {
    9.0
}
fn default_line_width() -> f32 {
    1.5
}
fn default_marker_radius() -> f32 {
    3.0
}
fn default_color_cycle() -> Vec<Rgba> {
    TAB10.to_vec()
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            title_size: default_title_size(),
            label_size: default_label_size(),
            tick_size: default_tick_size(),
            line_width: default_line_width(),
            marker_radius: default_marker_radius(),
            color_cycle: default_color_cycle(),
        }
    }
}

impl StyleConfig {
    /// Color `i` of the cycle, wrapping around.
    #[must_use]
    pub fn cycle_color(&self, i: usize) -> Rgba {
        if self.color_cycle.is_empty() {
            return TAB10[i % TAB10.len()];
        }
        self.color_cycle[i % self.color_cycle.len()]
    }
}

/// Parameters of the statistical panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Significance level of the ACF/PACF confidence bands.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// ACF lag count; `None` picks it from the series length.
    #[serde(default)]
    pub acf_lags: Option<usize>,
    /// PACF lag count; `None` picks it from the series length.
    #[serde(default)]
    pub pacf_lags: Option<usize>,
    /// Grid size of the density curves.
    #[serde(default = "default_kde_points")]
    pub kde_points: usize,
    /// Horizontal jitter of strip plots, as a fraction of a category slot.
    #[serde(default = "default_strip_jitter")]
    pub strip_jitter: f64,
    /// Seed of the strip plot jitter.
    #[serde(default = "default_strip_seed")]
    pub strip_seed: u64,
    /// Heatmap palette.
    #[serde(default)]
    pub heatmap_color_map: ColorMap,
    /// Minimum overlapping observations per correlation cell.
    #[serde(default = "default_min_periods")]
    pub min_periods: usize,
}

fn default_alpha() -> f64 {
    0.05
}
fn default_kde_points() -> usize {
    100
}
fn default_strip_jitter() -> f64 {
    0.2
}
fn default_strip_seed() -> u64 {
    42
}
fn default_min_periods() -> usize {
    1
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            acf_lags: None,
            pacf_lags: None,
            kde_points: default_kde_points(),
            strip_jitter: default_strip_jitter(),
            strip_seed: default_strip_seed(),
            heatmap_color_map: ColorMap::default(),
            min_periods: default_min_periods(),
        }
    }
}

/// Complete explorer configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Single-panel figure size.
    #[serde(default)]
    pub figure: FigureConfig,
    /// Dashboard layout and parameters.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Visual style.
    #[serde(default)]
    pub style: StyleConfig,
    /// Statistical panel parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

impl ExplorerConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the YAML is malformed and
    /// [`Error::ParameterType`] when a value is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise as
    /// [`ExplorerConfig::from_yaml_str`].
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading explorer config");
        Self::from_yaml_str(&content)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let size_ok = |w: u32, h: u32| w > 0 && h > 0;
        if !size_ok(self.figure.width, self.figure.height) {
            return Err(Error::parameter("figure width and height must be positive"));
        }
        if !size_ok(self.dashboard.width, self.dashboard.height) {
            return Err(Error::parameter("dashboard width and height must be positive"));
        }
        if self.dashboard.ma_period == 0 {
            return Err(Error::parameter("dashboard.ma_period must be >= 1"));
        }
        if self.dashboard.seasonal_freq < 2 {
            return Err(Error::parameter("dashboard.seasonal_freq must be >= 2"));
        }
        if !(self.analysis.alpha > 0.0 && self.analysis.alpha < 1.0) {
            return Err(Error::parameter("analysis.alpha must be in (0, 1)"));
        }
        if self.analysis.kde_points < 2 {
            return Err(Error::parameter("analysis.kde_points must be >= 2"));
        }
        if !(0.0..=1.0).contains(&self.analysis.strip_jitter) {
            return Err(Error::parameter("analysis.strip_jitter must be in [0, 1]"));
        }
        Ok(())
    }

    /// Set the dashboard moving-average window.
    #[must_use]
    pub fn with_ma_period(mut self, period: usize) -> Self {
        self.dashboard.ma_period = period;
        self
    }

    /// Set the dashboard seasonal frequency.
    #[must_use]
    pub fn with_seasonal_freq(mut self, freq: usize) -> Self {
        self.dashboard.seasonal_freq = freq;
        self
    }

    /// Set the dashboard size in pixels.
    #[must_use]
    pub fn with_dashboard_size(mut self, width: u32, height: u32) -> Self {
        self.dashboard.width = width;
        self.dashboard.height = height;
        self
    }

    /// Set the single-panel figure size in pixels.
    #[must_use]
    pub fn with_figure_size(mut self, width: u32, height: u32) -> Self {
        self.figure.width = width;
        self.figure.height = height;
        self
    }

    /// Set the ACF/PACF significance level.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.analysis.alpha = alpha;
        self
    }

    /// Set the heatmap palette.
    #[must_use]
    pub fn with_color_map(mut self, map: ColorMap) -> Self {
        self.analysis.heatmap_color_map = map;
        self
    }
}
