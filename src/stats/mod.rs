//! Statistical routines behind the charts.
//!
//! Every function computes fresh results from its inputs; nothing is cached.

mod autocorr;
mod correlation;
mod decompose;
mod distribution;
mod rolling;

pub use autocorr::{acf, critical_z, default_acf_lags, default_pacf_lags, pacf, Correlogram};
pub use correlation::{
    correlation_matrix, kendall, pearson, spearman, CorrelationMatrix, CorrelationMethod,
};
pub use decompose::{
    decompose, default_filter, resid, seasonal, trend, DecomposeOptions, Decomposition,
    ExtrapolateTrend, Model,
};
pub use distribution::{
    fit_normal, freedman_diaconis_bins, histogram, kde, percentile, probplot, Histogram, Kde,
    NormalFit, ProbPlot,
};
pub use rolling::{moving_average, rolling_mean};
