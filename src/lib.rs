//! # ts-explorer
//!
//! Exploratory charts for time series, rendered in pure Rust on the
//! [trueno](https://crates.io/crates/trueno) stack.
//!
//! One [`Explorer`](explorer::Explorer) call per chart: raw series, moving
//! average, distribution with normal fit, Q-Q, ACF/PACF, seasonal
//! decomposition components, weekday violins, day-of-month strips and
//! correlation heatmaps, or all of them on one dashboard figure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ts_explorer::prelude::*;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let series = TimeSeries::daily("visits", start, values);
//!
//! let explorer = Explorer::new();
//! let figure = explorer.plot_all(&series)?;
//! figure.save_svg("overview.svg")?;
//!
//! // Single charts draw on caller axes or create their own figure.
//! let qq = explorer.plot_qq(&series, None)?;
//! qq.into_figure().map(|f| f.save_png("qq.png")).transpose()?;
//! ```
//!
//! ## Outputs
//!
//! - **SVG**: titles, tick labels, legends and heatmap annotations
//! - **PNG**: raster marks only, no text
//!
//! ## Academic References
//!
//! - Bartlett, M. S. (1946). "On the theoretical specification of sampling
//!   properties of autocorrelated time series."
//! - Filliben, J. J. (1975). "The probability plot correlation coefficient test
//!   for normality." *Technometrics*.
//! - Scott, D. W. (1992). *Multivariate Density Estimation*. Wiley.
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/statistics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Data Modules
// ============================================================================

/// Labelled time series with ordinal or date/time index.
pub mod series;

/// Named numeric columns for multi-series charts.
pub mod table;

/// Input checks shared by the chart operations.
pub mod validate;

/// Rolling mean, decomposition, autocorrelation, distributions, correlation.
pub mod stats;

// ============================================================================
// Chart Modules
// ============================================================================

/// Chart façade and the dashboard composer.
pub mod explorer;

/// Figures, panels, artists and ticks.
pub mod figure;

/// Violin and heatmap artists.
pub mod plots;

/// Explorer configuration, loadable from YAML.
pub mod config;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives (points, insets, rectangles).
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Drawing surfaces and rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for ts-explorer operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use ts_explorer::prelude::*;
/// ```
pub mod prelude {
    pub use batuta_common::display::WithDimensions;
    pub use crate::color::Rgba;
    pub use crate::config::ExplorerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::explorer::{Explorer, WEEKDAY_NAMES};
    pub use crate::figure::{provision_axes, Axes, AxesId, AxisKind, Figure, Target};
    pub use crate::scale::ColorMap;
    pub use crate::series::{TimeIndex, TimeSeries};
    pub use crate::stats::{CorrelationMethod, DecomposeOptions, Model};
    pub use crate::table::Table;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;
