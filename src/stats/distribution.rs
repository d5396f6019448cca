//! Distribution summaries: histogram, Gaussian KDE, normal fit and the
//! normal probability plot.

use crate::error::{Error, Result};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| Error::parameter(e.to_string()))
}

fn require_finite(x: &[f64], min_len: usize, what: &str) -> Result<()> {
    if x.len() < min_len {
        return Err(Error::parameter(format!(
            "{what} needs at least {min_len} observations, got {}",
            x.len()
        )));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(Error::parameter(format!("{what} requires every observation to be defined")));
    }
    Ok(())
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

fn sorted(x: &[f64]) -> Vec<f64> {
    let mut s = x.to_vec();
    s.sort_by(f64::total_cmp);
    s
}

/// Percentile of sorted data with linear interpolation, `p` in `0..=100`.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            if lo == hi {
                sorted[lo]
            } else {
                sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
            }
        }
    }
}

// ============================================================================
// Normal fit
// ============================================================================

/// Maximum-likelihood normal parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalFit {
    /// Sample mean.
    pub mean: f64,
    /// Population standard deviation (divisor `n`).
    pub std_dev: f64,
}

impl NormalFit {
    /// Density of the fitted distribution at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        Normal::new(self.mean, self.std_dev).map_or(f64::NAN, |d| d.pdf(x))
    }
}

/// Fit a normal distribution by maximum likelihood.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for empty input or undefined values.
pub fn fit_normal(x: &[f64]) -> Result<NormalFit> {
    require_finite(x, 1, "normal fit")?;
    let m = mean(x);
    let var = x.iter().map(|v| (v - m).powi(2)).sum::<f64>() / x.len() as f64;
    Ok(NormalFit {
        mean: m,
        std_dev: var.sqrt(),
    })
}

// ============================================================================
// Histogram
// ============================================================================

/// Density-normalized histogram: `Σ density[i] * width[i] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, one more than bins.
    pub edges: Vec<f64>,
    /// Density per bin.
    pub density: Vec<f64>,
}

/// Freedman-Diaconis bin count, capped at 50.
///
/// Falls back to `√n` bins when the interquartile range is zero.
#[must_use]
pub fn freedman_diaconis_bins(x: &[f64]) -> usize {
    const MAX_BINS: usize = 50;
    if x.len() < 2 {
        return 1;
    }
    let s = sorted(x);
    let iqr = percentile(&s, 75.0) - percentile(&s, 25.0);
    let h = 2.0 * iqr / (x.len() as f64).cbrt();
    let bins = if h > 0.0 {
        ((s[s.len() - 1] - s[0]) / h).ceil() as usize
    } else {
        (x.len() as f64).sqrt() as usize
    };
    bins.clamp(1, MAX_BINS)
}

/// Histogram with a Freedman-Diaconis bin count.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for empty input or undefined values.
pub fn histogram(x: &[f64]) -> Result<Histogram> {
    require_finite(x, 1, "histogram")?;
    let bins = freedman_diaconis_bins(x);
    let lo = x.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in x {
        let bin = (((v - lo) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    let scale = 1.0 / (x.len() as f64 * width);
    Ok(Histogram {
        edges,
        density: counts.iter().map(|&c| c as f64 * scale).collect(),
    })
}

// ============================================================================
// Kernel density estimate
// ============================================================================

/// Gaussian KDE evaluated on an even grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Kde {
    /// Grid positions.
    pub x: Vec<f64>,
    /// Estimated density at each grid position.
    pub density: Vec<f64>,
    /// Kernel bandwidth.
    pub bandwidth: f64,
}

/// Gaussian kernel density estimate with Scott's bandwidth
/// `σ̂ · n^(-1/5)` (sample standard deviation), on `points` grid positions
/// spanning the data plus three bandwidths either side.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for fewer than two observations, undefined
/// values, zero variance or fewer than two grid points.
pub fn kde(x: &[f64], points: usize) -> Result<Kde> {
    require_finite(x, 2, "density estimate")?;
    if points < 2 {
        return Err(Error::parameter("density estimate needs at least 2 grid points"));
    }
    let n = x.len() as f64;
    let m = mean(x);
    let sd = (x.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
    if sd <= 0.0 {
        return Err(Error::parameter("density estimate is undefined for a constant series"));
    }
    let bandwidth = sd * n.powf(-0.2);

    let lo = x.iter().copied().fold(f64::INFINITY, f64::min) - 3.0 * bandwidth;
    let hi = x.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 3.0 * bandwidth;
    let step = (hi - lo) / (points - 1) as f64;

    let kernel = standard_normal()?;
    let grid: Vec<f64> = (0..points).map(|i| lo + step * i as f64).collect();
    let density = grid
        .iter()
        .map(|&g| x.iter().map(|&v| kernel.pdf((g - v) / bandwidth)).sum::<f64>() / (n * bandwidth))
        .collect();

    Ok(Kde {
        x: grid,
        density,
        bandwidth,
    })
}

// ============================================================================
// Probability plot
// ============================================================================

/// Sample quantiles against theoretical normal quantiles.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbPlot {
    /// Theoretical standard-normal quantiles, ascending.
    pub theoretical: Vec<f64>,
    /// Sorted observations.
    pub ordered: Vec<f64>,
    /// Least-squares slope of `ordered` on `theoretical`.
    pub slope: f64,
    /// Least-squares intercept.
    pub intercept: f64,
    /// Correlation coefficient of the fit (0 when degenerate).
    pub r: f64,
}

/// Filliben's estimate of the uniform order-statistic medians.
fn filliben_medians(n: usize) -> Vec<f64> {
    let nf = n as f64;
    let last = 0.5f64.powf(1.0 / nf);
    (1..=n)
        .map(|i| {
            if i == 1 {
                1.0 - last
            } else if i == n {
                last
            } else {
                (i as f64 - 0.3175) / (nf + 0.365)
            }
        })
        .collect()
}

/// Normal probability plot data with its least-squares line.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for fewer than two observations or
/// undefined values.
pub fn probplot(x: &[f64]) -> Result<ProbPlot> {
    require_finite(x, 2, "probability plot")?;
    let normal = standard_normal()?;
    let theoretical: Vec<f64> = filliben_medians(x.len())
        .into_iter()
        .map(|p| normal.inverse_cdf(p))
        .collect();
    let ordered = sorted(x);

    let mx = mean(&theoretical);
    let my = mean(&ordered);
    let sxx: f64 = theoretical.iter().map(|t| (t - mx).powi(2)).sum();
    let syy: f64 = ordered.iter().map(|o| (o - my).powi(2)).sum();
    let sxy: f64 = theoretical
        .iter()
        .zip(&ordered)
        .map(|(t, o)| (t - mx) * (o - my))
        .sum();

    let slope = sxy / sxx;
    let r = if syy > 0.0 { sxy / (sxx * syy).sqrt() } else { 0.0 };

    Ok(ProbPlot {
        intercept: my - slope * mx,
        slope,
        r,
        theoretical,
        ordered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_interpolates() {
        let s = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile(&s, 50.0), 2.5);
        assert_relative_eq!(percentile(&s, 0.0), 1.0);
        assert_relative_eq!(percentile(&s, 100.0), 4.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_fit_normal_mle() {
        let fit = fit_normal(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(fit.mean, 5.0);
        assert_relative_eq!(fit.std_dev, 2.0);
        assert_relative_eq!(fit.pdf(5.0), 1.0 / (2.0 * (2.0 * std::f64::consts::PI).sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn test_histogram_integrates_to_one() {
        let x: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.37).sin() * 3.0).collect();
        let h = histogram(&x).unwrap();
        assert_eq!(h.edges.len(), h.density.len() + 1);
        let area: f64 = h
            .density
            .iter()
            .zip(h.edges.windows(2))
            .map(|(d, e)| d * (e[1] - e[0]))
            .sum();
        assert_relative_eq!(area, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_histogram_constant_input() {
        let h = histogram(&[3.0; 9]).unwrap();
        assert_eq!(h.density.len(), 3);
        assert!(h.edges[0] < 3.0 && *h.edges.last().unwrap() > 3.0);
    }

    #[test]
    fn test_fd_bins_uniform() {
        // IQR 50 000 over n = 100 000 gives a width near 2 154.
        let x: Vec<f64> = (0..100_000).map(f64::from).collect();
        assert_eq!(freedman_diaconis_bins(&x), 47);
        assert_eq!(freedman_diaconis_bins(&[1.0]), 1);
    }

    #[test]
    fn test_fd_bins_capped() {
        let mut x: Vec<f64> = (0..1_000).map(|i| f64::from(i) / 999.0).collect();
        x.push(1.0e6);
        assert_eq!(freedman_diaconis_bins(&x), 50);
        let h = histogram(&x).unwrap();
        assert_eq!(h.density.len(), 50);
    }

    #[test]
    fn test_kde_integrates_to_about_one() {
        let x = [1.0, 2.0, 2.5, 3.0, 7.0];
        let k = kde(&x, 400).unwrap();
        let step = k.x[1] - k.x[0];
        let area: f64 = k.density.iter().sum::<f64>() * step;
        assert_relative_eq!(area, 1.0, epsilon = 0.01);
        assert!(k.bandwidth > 0.0);
    }

    #[test]
    fn test_kde_rejects_constant() {
        assert!(kde(&[1.0, 1.0, 1.0], 10).unwrap_err().is_parameter_type());
        assert!(kde(&[1.0, 2.0], 1).is_err());
    }

    #[test]
    fn test_filliben_medians_symmetric() {
        let m = filliben_medians(5);
        assert_relative_eq!(m[0] + m[4], 1.0, epsilon = 1e-12);
        assert_relative_eq!(m[2], 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_probplot_linear_in_quantiles() {
        let normal = standard_normal().unwrap();
        let q: Vec<f64> = filliben_medians(30).iter().map(|&p| 10.0 + 2.0 * normal.inverse_cdf(p)).collect();
        let pp = probplot(&q).unwrap();
        assert_relative_eq!(pp.slope, 2.0, epsilon = 1e-9);
        assert_relative_eq!(pp.intercept, 10.0, epsilon = 1e-9);
        assert_relative_eq!(pp.r, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_probplot_constant_has_flat_fit() {
        let pp = probplot(&[4.0, 4.0, 4.0]).unwrap();
        assert_relative_eq!(pp.slope, 0.0);
        assert_relative_eq!(pp.intercept, 4.0);
        assert_eq!(pp.r, 0.0);
    }
}
