//! Trailing rolling mean.

use crate::error::{Error, Result};
use crate::series::TimeSeries;

/// Trailing mean over windows of `period` observations.
///
/// Output length equals input length. The first `period - 1` positions are
/// `NaN`, as is any position whose window contains a `NaN`.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] when `period` is zero.
pub fn rolling_mean(values: &[f64], period: usize) -> Result<Vec<f64>> {
    if period == 0 {
        return Err(Error::parameter("moving average period must be >= 1, got 0"));
    }

    let mut out = vec![f64::NAN; values.len()];
    for (end, window) in (period - 1..).zip(values.windows(period)) {
        if window.iter().all(|v| v.is_finite()) {
            out[end] = window.iter().sum::<f64>() / period as f64;
        }
    }
    Ok(out)
}

/// Moving average of a series; the result shares the series' index.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] when `period` is zero.
pub fn moving_average(series: &TimeSeries, period: usize) -> Result<TimeSeries> {
    let values = rolling_mean(series.values(), period)?;
    tracing::trace!(series = series.name(), period, "moving average");
    Ok(series.derive(series.name(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_leading_positions_undefined() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert!(out[0].is_nan());
        assert!(out[1].is_nan());
        assert_relative_eq!(out[2], 2.0);
        assert_relative_eq!(out[4], 4.0);
    }

    #[test]
    fn test_period_one_is_identity() {
        let input = [3.0, -1.0, 7.5];
        assert_eq!(rolling_mean(&input, 1).unwrap(), input.to_vec());
    }

    #[test]
    fn test_period_longer_than_series() {
        let out = rolling_mean(&[1.0, 2.0], 5).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_nan_poisons_window() {
        let out = rolling_mean(&[1.0, f64::NAN, 3.0, 4.0, 5.0], 2).unwrap();
        assert!(out[1].is_nan());
        assert!(out[2].is_nan());
        assert_relative_eq!(out[3], 3.5);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(rolling_mean(&[1.0], 0).unwrap_err().is_parameter_type());
    }

    #[test]
    fn test_moving_average_keeps_input_untouched() {
        let s = TimeSeries::from_values("x", vec![2.0, 4.0, 6.0]);
        let ma = moving_average(&s, 2).unwrap();
        assert_eq!(s.values(), &[2.0, 4.0, 6.0]);
        assert_eq!(ma.index(), s.index());
        assert_eq!(ma.get(2), Some(5.0));
    }
}
