//! Classical seasonal decomposition by moving averages.
//!
//! The trend is a centered (or trailing) convolution of the series, the
//! seasonal component is the per-phase mean of the detrended series, and the
//! residual is what remains.
//!
//! # Model
//!
//! - additive: `observed = trend + seasonal + resid`
//! - multiplicative: `observed = trend * seasonal * resid`

use crate::error::{Error, Result};
use crate::series::TimeSeries;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the components combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// `observed = trend + seasonal + resid`
    #[default]
    Additive,
    /// `observed = trend * seasonal * resid`
    Multiplicative,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Additive => "additive",
            Self::Multiplicative => "multiplicative",
        })
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "additive" | "add" => Ok(Self::Additive),
            "multiplicative" | "mul" => Ok(Self::Multiplicative),
            _ => Err(Error::parameter(format!(
                "unknown decomposition model '{s}': expected additive or multiplicative"
            ))),
        }
    }
}

/// Fill for the undefined ends of the trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtrapolateTrend {
    /// Leave the ends undefined.
    #[default]
    None,
    /// Least-squares line through the `k` nearest defined trend points.
    Points(usize),
    /// Same as `Points(freq - 1)`.
    Freq,
}

/// Parameters of [`decompose`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecomposeOptions {
    /// Component model.
    pub model: Model,
    /// Trend filter weights; `None` uses the standard moving-average filter.
    pub filter: Option<Vec<f64>>,
    /// Centered filter when true, trailing otherwise.
    pub two_sided: bool,
    /// Trend end handling.
    pub extrapolate_trend: ExtrapolateTrend,
}

impl Default for DecomposeOptions {
    fn default() -> Self {
        Self {
            model: Model::Additive,
            filter: None,
            two_sided: true,
            extrapolate_trend: ExtrapolateTrend::None,
        }
    }
}

impl DecomposeOptions {
    /// Set the model.
    #[must_use]
    pub fn model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Use custom trend filter weights.
    #[must_use]
    pub fn filter(mut self, weights: Vec<f64>) -> Self {
        self.filter = Some(weights);
        self
    }

    /// Centered (`true`, default) or trailing (`false`) trend filter.
    #[must_use]
    pub fn two_sided(mut self, two_sided: bool) -> Self {
        self.two_sided = two_sided;
        self
    }

    /// Set trend extrapolation.
    #[must_use]
    pub fn extrapolate_trend(mut self, extrapolate: ExtrapolateTrend) -> Self {
        self.extrapolate_trend = extrapolate;
        self
    }
}

/// The components of a decomposed series, each sharing the input index.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    /// The input series.
    pub observed: TimeSeries,
    /// Moving-average trend; undefined at the ends unless extrapolated.
    pub trend: TimeSeries,
    /// Periodic component with period `freq`.
    pub seasonal: TimeSeries,
    /// Residual; undefined wherever the trend is.
    pub resid: TimeSeries,
}

/// Standard moving-average filter for a period.
///
/// Odd `freq`: `freq` equal weights `1/freq`. Even `freq`: `freq + 1` weights
/// `[0.5, 1, ..., 1, 0.5] / freq`.
#[must_use]
pub fn default_filter(freq: usize) -> Vec<f64> {
    let f = freq as f64;
    if freq % 2 == 0 {
        let mut w = vec![1.0 / f; freq + 1];
        w[0] = 0.5 / f;
        w[freq] = 0.5 / f;
        w
    } else {
        vec![1.0 / f; freq]
    }
}

/// Convolve `x` with `weights`; positions the filter cannot cover are `NaN`.
fn convolution_filter(x: &[f64], weights: &[f64], two_sided: bool) -> Vec<f64> {
    let n = x.len();
    let m = weights.len();
    let mut out = vec![f64::NAN; n];
    if m == 0 || m > n {
        return out;
    }

    // Offset of the window start relative to the output position.
    let (head, tail) = if two_sided {
        let half = m.div_ceil(2);
        (half - 1, half - m % 2)
    } else {
        (m - 1, 0)
    };

    for (i, slot) in out.iter_mut().enumerate().take(n - tail).skip(head) {
        let start = i - head;
        *slot = weights
            .iter()
            .rev()
            .zip(&x[start..start + m])
            .map(|(w, v)| w * v)
            .sum();
    }
    out
}

/// Least-squares line `(slope, intercept)` through `(xs[i], ys[i])`.
fn linear_fit(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;
    let sxx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    (slope, mean_y - slope * mean_x)
}

/// Replace the undefined ends of `trend` by straight-line extrapolation.
fn extrapolate_ends(trend: &mut [f64], npoints: usize) {
    let Some(front) = trend.iter().position(|v| !v.is_nan()) else {
        return;
    };
    let Some(back) = trend.iter().rposition(|v| !v.is_nan()) else {
        return;
    };
    let npoints = npoints.max(1);

    let fit = |lo: usize, hi: usize, trend: &[f64]| {
        let xs: Vec<f64> = (lo..=hi).map(|i| i as f64).collect();
        linear_fit(&xs, &trend[lo..=hi])
    };

    let (k, c) = fit(front, (front + npoints - 1).min(back), trend);
    for (i, v) in trend.iter_mut().enumerate().take(front) {
        *v = k * i as f64 + c;
    }

    let (k, c) = fit(back.saturating_sub(npoints - 1).max(front), back, trend);
    for (i, v) in trend.iter_mut().enumerate().skip(back + 1) {
        *v = k * i as f64 + c;
    }
}

/// Decompose a series into trend, seasonal and residual components.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] when `freq < 2`, the series is shorter
/// than two full cycles, any observation is undefined, the filter is empty,
/// or the multiplicative model meets a non-positive value.
pub fn decompose(
    series: &TimeSeries,
    freq: usize,
    options: &DecomposeOptions,
) -> Result<Decomposition> {
    if freq < 2 {
        return Err(Error::parameter(format!("seasonal frequency must be >= 2, got {freq}")));
    }
    let x = crate::validate::require_all_finite(series)?;
    let n = x.len();
    if n < 2 * freq {
        return Err(Error::parameter(format!(
            "decomposition needs two complete cycles ({} observations for freq {freq}), series '{}' has {n}",
            2 * freq,
            series.name()
        )));
    }
    if options.model == Model::Multiplicative && x.iter().any(|&v| v <= 0.0) {
        return Err(Error::parameter(
            "multiplicative decomposition requires strictly positive values",
        ));
    }

    let weights = match &options.filter {
        Some(w) if w.is_empty() => return Err(Error::parameter("trend filter must not be empty")),
        Some(w) if w.iter().any(|v| !v.is_finite()) => {
            return Err(Error::parameter("trend filter weights must be finite"))
        }
        Some(w) => w.clone(),
        None => default_filter(freq),
    };

    let mut trend = convolution_filter(x, &weights, options.two_sided);
    match options.extrapolate_trend {
        ExtrapolateTrend::None => {}
        ExtrapolateTrend::Points(k) => extrapolate_ends(&mut trend, k),
        ExtrapolateTrend::Freq => extrapolate_ends(&mut trend, freq - 1),
    }

    let detrended: Vec<f64> = match options.model {
        Model::Additive => x.iter().zip(&trend).map(|(v, t)| v - t).collect(),
        Model::Multiplicative => x.iter().zip(&trend).map(|(v, t)| v / t).collect(),
    };

    let mut pattern: Vec<f64> = (0..freq)
        .map(|phase| {
            let (sum, count) = detrended
                .iter()
                .skip(phase)
                .step_by(freq)
                .filter(|v| !v.is_nan())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            if count == 0 {
                f64::NAN
            } else {
                sum / count as f64
            }
        })
        .collect();
    let center = pattern.iter().sum::<f64>() / freq as f64;
    for p in &mut pattern {
        match options.model {
            Model::Additive => *p -= center,
            Model::Multiplicative => *p /= center,
        }
    }

    let seasonal: Vec<f64> = (0..n).map(|i| pattern[i % freq]).collect();
    let resid: Vec<f64> = match options.model {
        Model::Additive => detrended.iter().zip(&seasonal).map(|(d, s)| d - s).collect(),
        Model::Multiplicative => detrended.iter().zip(&seasonal).map(|(d, s)| d / s).collect(),
    };

    tracing::trace!(
        series = series.name(),
        freq,
        model = %options.model,
        defined_trend = trend.iter().filter(|v| !v.is_nan()).count(),
        "seasonal decomposition"
    );

    Ok(Decomposition {
        observed: series.clone(),
        trend: series.derive("trend", trend),
        seasonal: series.derive("seasonal", seasonal),
        resid: series.derive("resid", resid),
    })
}

/// Trend component with default options.
///
/// # Errors
///
/// See [`decompose`].
pub fn trend(series: &TimeSeries, freq: usize) -> Result<TimeSeries> {
    decompose(series, freq, &DecomposeOptions::default()).map(|d| d.trend)
}

/// Seasonal component with default options.
///
/// # Errors
///
/// See [`decompose`].
pub fn seasonal(series: &TimeSeries, freq: usize) -> Result<TimeSeries> {
    decompose(series, freq, &DecomposeOptions::default()).map(|d| d.seasonal)
}

/// Residual component with default options.
///
/// # Errors
///
/// See [`decompose`].
pub fn resid(series: &TimeSeries, freq: usize) -> Result<TimeSeries> {
    decompose(series, freq, &DecomposeOptions::default()).map(|d| d.resid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal_series(n: usize, freq: usize) -> TimeSeries {
        let pattern = [3.0, -1.0, 0.5, -2.5, 1.0, -0.5, -0.5];
        let values = (0..n)
            .map(|i| 10.0 + 0.25 * i as f64 + pattern[i % freq % pattern.len()])
            .collect();
        TimeSeries::from_values("y", values)
    }

    #[test]
    fn test_default_filter_weights() {
        assert_eq!(default_filter(3), vec![1.0 / 3.0; 3]);
        let even = default_filter(4);
        assert_eq!(even.len(), 5);
        assert_relative_eq!(even[0], 0.125);
        assert_relative_eq!(even[2], 0.25);
        assert_relative_eq!(even.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn test_centered_trend_edges() {
        let s = seasonal_series(28, 7);
        let d = decompose(&s, 7, &DecomposeOptions::default()).unwrap();
        let t = d.trend.values();
        assert!(t[..3].iter().all(|v| v.is_nan()));
        assert!(t[25..].iter().all(|v| v.is_nan()));
        assert!(t[3..25].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_even_freq_edges() {
        let s = seasonal_series(16, 4);
        let d = decompose(&s, 4, &DecomposeOptions::default()).unwrap();
        let t = d.trend.values();
        assert!(t[..2].iter().all(|v| v.is_nan()));
        assert!(t[14..].iter().all(|v| v.is_nan()));
        assert!(t[2].is_finite());
    }

    #[test]
    fn test_recovers_linear_trend() {
        let s = seasonal_series(35, 7);
        let d = decompose(&s, 7, &DecomposeOptions::default()).unwrap();
        // The pattern sums to zero, so a full-period mean cancels it exactly.
        for i in 3..32 {
            assert_relative_eq!(d.trend.values()[i], 10.0 + 0.25 * i as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_additive_identity() {
        let s = seasonal_series(30, 7);
        let d = decompose(&s, 7, &DecomposeOptions::default()).unwrap();
        for i in 0..s.len() {
            if let (Some(t), Some(se), Some(r)) = (d.trend.get(i), d.seasonal.get(i), d.resid.get(i)) {
                assert_relative_eq!(t + se + r, s.values()[i], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_seasonal_is_periodic_and_centered() {
        let s = seasonal_series(42, 7);
        let d = decompose(&s, 7, &DecomposeOptions::default()).unwrap();
        let seas = d.seasonal.values();
        for i in 7..seas.len() {
            assert_relative_eq!(seas[i], seas[i - 7]);
        }
        assert_relative_eq!(seas[..7].iter().sum::<f64>(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_multiplicative_identity() {
        let values: Vec<f64> = (0..24)
            .map(|i| (50.0 + i as f64) * [1.2, 0.9, 1.1, 0.8][i % 4])
            .collect();
        let s = TimeSeries::from_values("m", values.clone());
        let opts = DecomposeOptions::default().model(Model::Multiplicative);
        let d = decompose(&s, 4, &opts).unwrap();
        let pattern_mean = d.seasonal.values()[..4].iter().sum::<f64>() / 4.0;
        assert_relative_eq!(pattern_mean, 1.0, epsilon = 1e-9);
        for i in 2..22 {
            let rebuilt = d.trend.values()[i] * d.seasonal.values()[i] * d.resid.values()[i];
            assert_relative_eq!(rebuilt, values[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_multiplicative_rejects_non_positive() {
        let s = TimeSeries::from_values("m", vec![1.0, 0.0, 2.0, 3.0]);
        let opts = DecomposeOptions::default().model(Model::Multiplicative);
        assert!(decompose(&s, 2, &opts).unwrap_err().is_parameter_type());
    }

    #[test]
    fn test_one_sided_trend() {
        let s = seasonal_series(21, 7);
        let opts = DecomposeOptions::default().two_sided(false);
        let d = decompose(&s, 7, &opts).unwrap();
        let t = d.trend.values();
        assert!(t[..6].iter().all(|v| v.is_nan()));
        assert!(t[6..].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_extrapolate_fills_ends() {
        let s = seasonal_series(28, 7);
        let opts = DecomposeOptions::default().extrapolate_trend(ExtrapolateTrend::Freq);
        let d = decompose(&s, 7, &opts).unwrap();
        assert!(d.trend.values().iter().all(|v| v.is_finite()));
        assert!(d.resid.values().iter().all(|v| v.is_finite()));
        // Trend is exactly linear, so the extrapolation continues it.
        assert_relative_eq!(d.trend.values()[0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(d.trend.values()[27], 10.0 + 0.25 * 27.0, epsilon = 1e-9);
    }

    #[test]
    fn test_preconditions() {
        let s = seasonal_series(13, 7);
        assert!(decompose(&s, 7, &DecomposeOptions::default()).unwrap_err().is_parameter_type());
        assert!(decompose(&s, 1, &DecomposeOptions::default()).is_err());
        assert!(decompose(&s, 0, &DecomposeOptions::default()).is_err());

        let gap = TimeSeries::from_values("g", vec![1.0, f64::NAN, 1.0, 1.0]);
        assert!(decompose(&gap, 2, &DecomposeOptions::default()).is_err());

        let ok = seasonal_series(14, 7);
        let empty_filter = DecomposeOptions::default().filter(vec![]);
        assert!(decompose(&ok, 7, &empty_filter).is_err());
    }

    #[test]
    fn test_custom_filter() {
        let s = TimeSeries::from_values("c", (0..12).map(f64::from).collect());
        let opts = DecomposeOptions::default().filter(vec![0.5, 0.5]);
        let d = decompose(&s, 3, &opts).unwrap();
        // A centered even-length filter leans forward: no undefined head, one undefined tail.
        let t = d.trend.values();
        assert_relative_eq!(t[0], 0.5);
        assert!(t[11].is_nan());
    }

    #[test]
    fn test_convenience_extractors() {
        let s = seasonal_series(21, 7);
        let d = decompose(&s, 7, &DecomposeOptions::default()).unwrap();
        assert_eq!(trend(&s, 7).unwrap().values().len(), 21);
        assert_eq!(seasonal(&s, 7).unwrap(), d.seasonal);
        assert_eq!(resid(&s, 7).unwrap().name(), "resid");
    }

    #[test]
    fn test_model_from_str() {
        assert_eq!("Additive".parse::<Model>().unwrap(), Model::Additive);
        assert_eq!("mul".parse::<Model>().unwrap(), Model::Multiplicative);
        assert!("cubic".parse::<Model>().unwrap_err().is_parameter_type());
    }
}
