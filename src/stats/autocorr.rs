//! Autocorrelation and partial autocorrelation with confidence bands.
//!
//! ## Formulas
//!
//! - ACF: `r_k = c_k / c_0` with `c_k = (1/n) Σ (x_t - x̄)(x_{t+k} - x̄)`
//! - ACF band (Bartlett): `var_1 = 1/n`, `var_k = (1 + 2 Σ_{j=1}^{k-1} r_j²) / n`
//! - PACF: Yule-Walker on the adjusted autocovariance `c_k · n / (n - k)`,
//!   solved by Levinson-Durbin; band `z / √n`

use crate::error::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Correlation coefficients for lags `0..=nlags` and the half-width of the
/// confidence band around zero at each lag.
#[derive(Debug, Clone, PartialEq)]
pub struct Correlogram {
    /// Coefficient per lag; lag 0 is always 1.
    pub values: Vec<f64>,
    /// Band half-width per lag; lag 0 is always 0.
    pub band: Vec<f64>,
}

impl Correlogram {
    /// Highest lag computed.
    #[must_use]
    pub fn nlags(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    /// Confidence interval `(lower, upper)` around each coefficient.
    #[must_use]
    pub fn confint(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .zip(&self.band)
            .map(|(v, w)| (v - w, v + w))
            .collect()
    }
}

/// Two-sided critical value `z_(1 - alpha/2)` of the standard normal.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] unless `0 < alpha < 1`.
pub fn critical_z(alpha: f64) -> Result<f64> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::parameter(format!("alpha must be in (0, 1), got {alpha}")));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| Error::parameter(e.to_string()))?;
    Ok(normal.inverse_cdf(1.0 - alpha / 2.0))
}

/// Default ACF lag count: `min(ceil(10 log10 n), n - 1)`.
#[must_use]
pub fn default_acf_lags(n: usize) -> usize {
    ((10.0 * (n as f64).log10()).ceil() as usize).min(n.saturating_sub(1))
}

/// Default PACF lag count: `min(ceil(10 log10 n), n / 2 - 1)`.
#[must_use]
pub fn default_pacf_lags(n: usize) -> usize {
    ((10.0 * (n as f64).log10()).ceil() as usize).min((n / 2).saturating_sub(1))
}

/// Demeaned autocovariances for lags `0..=nlags`, each divided by `n`.
fn autocovariance(x: &[f64], nlags: usize) -> Vec<f64> {
    let n = x.len();
    let mean = x.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = x.iter().map(|v| v - mean).collect();
    (0..=nlags)
        .map(|k| {
            centered[..n - k]
                .iter()
                .zip(&centered[k..])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / n as f64
        })
        .collect()
}

fn check_input(x: &[f64], what: &str) -> Result<()> {
    if x.len() < 2 {
        return Err(Error::parameter(format!(
            "{what} needs at least 2 observations, got {}",
            x.len()
        )));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(Error::parameter(format!("{what} requires every observation to be defined")));
    }
    Ok(())
}

/// Autocorrelation function with Bartlett confidence band.
///
/// `nlags` defaults to [`default_acf_lags`].
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for fewer than two observations, undefined
/// values, a constant series, `nlags >= n` or an invalid `alpha`.
pub fn acf(x: &[f64], nlags: Option<usize>, alpha: f64) -> Result<Correlogram> {
    check_input(x, "ACF")?;
    let n = x.len();
    let nlags = nlags.unwrap_or_else(|| default_acf_lags(n));
    if nlags >= n {
        return Err(Error::parameter(format!(
            "ACF lags must be below the sample size {n}, got {nlags}"
        )));
    }
    let z = critical_z(alpha)?;

    let acov = autocovariance(x, nlags);
    if acov[0] <= 0.0 {
        return Err(Error::parameter("ACF is undefined for a constant series"));
    }
    let values: Vec<f64> = acov.iter().map(|c| c / acov[0]).collect();

    let mut band = Vec::with_capacity(nlags + 1);
    let mut cumulative = 0.0;
    for k in 0..=nlags {
        let var = match k {
            0 => 0.0,
            1 => 1.0 / n as f64,
            _ => {
                cumulative += values[k - 1].powi(2);
                (1.0 + 2.0 * cumulative) / n as f64
            }
        };
        band.push(z * var.sqrt());
    }

    Ok(Correlogram { values, band })
}

/// Partial autocorrelation by Yule-Walker (adjusted) via Levinson-Durbin.
///
/// `nlags` defaults to [`default_pacf_lags`].
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for undefined values, a constant series,
/// `nlags == 0`, `nlags >= n / 2` or an invalid `alpha`.
pub fn pacf(x: &[f64], nlags: Option<usize>, alpha: f64) -> Result<Correlogram> {
    check_input(x, "PACF")?;
    let n = x.len();
    let nlags = nlags.unwrap_or_else(|| default_pacf_lags(n));
    if nlags == 0 || nlags >= n / 2 {
        return Err(Error::parameter(format!(
            "PACF lags must be between 1 and {} for {n} observations, got {nlags}",
            (n / 2).saturating_sub(1)
        )));
    }
    let z = critical_z(alpha)?;

    let r: Vec<f64> = autocovariance(x, nlags)
        .into_iter()
        .enumerate()
        .map(|(k, c)| c * n as f64 / (n - k) as f64)
        .collect();
    if r[0] <= 0.0 {
        return Err(Error::parameter("PACF is undefined for a constant series"));
    }

    let mut values = vec![1.0];
    let mut phi: Vec<f64> = Vec::with_capacity(nlags);
    let mut err = r[0];
    for k in 1..=nlags {
        let acc: f64 = phi.iter().enumerate().map(|(j, p)| p * r[k - 1 - j]).sum();
        let reflection = (r[k] - acc) / err;
        let previous = phi.clone();
        for (j, p) in phi.iter_mut().enumerate() {
            *p = previous[j] - reflection * previous[k - 2 - j];
        }
        phi.push(reflection);
        err *= 1.0 - reflection * reflection;
        values.push(reflection);
    }

    let width = z / (n as f64).sqrt();
    let mut band = vec![width; nlags + 1];
    band[0] = 0.0;

    Ok(Correlogram { values, band })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ar1(n: usize, phi: f64) -> Vec<f64> {
        // Deterministic pseudo-noise keeps the test reproducible.
        let mut x = vec![0.0; n];
        let mut state = 12345u64;
        for t in 1..n {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let noise = ((state >> 33) as f64 / f64::from(u32::MAX)) - 0.25;
            x[t] = phi * x[t - 1] + noise;
        }
        x
    }

    #[test]
    fn test_default_lags() {
        assert_eq!(default_acf_lags(100), 20);
        assert_eq!(default_acf_lags(5), 4);
        assert_eq!(default_pacf_lags(100), 20);
        assert_eq!(default_pacf_lags(14), 6);
    }

    #[test]
    fn test_critical_z() {
        assert_relative_eq!(critical_z(0.05).unwrap(), 1.959_963_985, epsilon = 1e-6);
        assert!(critical_z(0.0).is_err());
        assert!(critical_z(1.5).is_err());
    }

    #[test]
    fn test_acf_lag_zero_is_one() {
        let result = acf(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0], None, 0.05).unwrap();
        assert_relative_eq!(result.values[0], 1.0);
        assert_eq!(result.band[0], 0.0);
        assert_eq!(result.nlags(), 5);
    }

    #[test]
    fn test_acf_known_values() {
        // x = 1..=5, mean 3, c0 = 10/5, c1 = (-2*-1 + -1*0 + 0*1 + 1*2)/5 = 4/5
        let result = acf(&[1.0, 2.0, 3.0, 4.0, 5.0], Some(2), 0.05).unwrap();
        assert_relative_eq!(result.values[1], 0.4);
        // c2 = (-2*0 + -1*1 + 0*2)/5 = -1/5
        assert_relative_eq!(result.values[2], -0.1);

        let z = critical_z(0.05).unwrap();
        assert_relative_eq!(result.band[1], z * (1.0f64 / 5.0).sqrt());
        assert_relative_eq!(result.band[2], z * ((1.0 + 2.0 * 0.16) / 5.0f64).sqrt());
    }

    #[test]
    fn test_acf_rejects_constant_and_short() {
        assert!(acf(&[2.0; 10], None, 0.05).unwrap_err().is_parameter_type());
        assert!(acf(&[1.0], None, 0.05).is_err());
        assert!(acf(&[1.0, 2.0, 3.0], Some(3), 0.05).is_err());
    }

    #[test]
    fn test_pacf_lag_one_matches_adjusted_acf() {
        let x = ar1(200, 0.7);
        let p = pacf(&x, Some(5), 0.05).unwrap();

        let n = x.len() as f64;
        let acov = autocovariance(&x, 1);
        let adjusted_r1 = acov[1] * n / (n - 1.0) / acov[0];
        assert_relative_eq!(p.values[1], adjusted_r1, epsilon = 1e-12);
        assert!(p.values[1] > 0.5);
        assert!(p.values[2].abs() < 0.3);
    }

    #[test]
    fn test_pacf_band_is_flat() {
        let x = ar1(100, 0.3);
        let p = pacf(&x, None, 0.05).unwrap();
        assert_eq!(p.nlags(), 20);
        assert_eq!(p.band[0], 0.0);
        let expected = critical_z(0.05).unwrap() / 10.0;
        assert!(p.band[1..].iter().all(|w| (w - expected).abs() < 1e-12));
    }

    #[test]
    fn test_pacf_lag_limits() {
        let x = ar1(10, 0.5);
        assert!(pacf(&x, Some(5), 0.05).is_err());
        assert!(pacf(&x, Some(0), 0.05).is_err());
        assert!(pacf(&x, Some(4), 0.05).is_ok());
        assert!(pacf(&[1.0, 2.0, 3.0], None, 0.05).is_err());
    }

    #[test]
    fn test_confint_brackets_values() {
        let result = acf(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0, 5.0, 7.0], Some(3), 0.05).unwrap();
        for ((lo, hi), v) in result.confint().iter().zip(&result.values) {
            assert!(lo <= v && v <= hi);
        }
    }
}
