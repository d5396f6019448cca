//! Input checks shared by the chart operations.

use crate::error::{Error, Result};
use crate::series::TimeSeries;
use chrono::NaiveDateTime;

/// Fail unless the series' index is date/time typed.
///
/// # Errors
///
/// Returns [`Error::IndexType`] naming the actual index kind.
pub fn require_datetime_index(series: &TimeSeries) -> Result<&[NaiveDateTime]> {
    series.index().datetimes().ok_or_else(|| {
        Error::IndexType(format!(
            "Array Index Type ERROR: Must be datetime or timestamp, but given {}",
            series.index().kind()
        ))
    })
}

/// Fail when the series is empty or has no defined value.
///
/// # Errors
///
/// Returns [`Error::ParameterType`].
pub fn require_numeric(series: &TimeSeries) -> Result<()> {
    if series.is_empty() {
        return Err(Error::parameter(format!("series '{}' is empty", series.name())));
    }
    if series.defined_count() == 0 {
        return Err(Error::parameter(format!(
            "series '{}' has no defined values",
            series.name()
        )));
    }
    Ok(())
}

/// Fail when the series is empty or any observation is undefined.
///
/// # Errors
///
/// Returns [`Error::ParameterType`].
pub fn require_all_finite(series: &TimeSeries) -> Result<&[f64]> {
    require_numeric(series)?;
    if let Some(pos) = series.values().iter().position(|v| !v.is_finite()) {
        return Err(Error::parameter(format!(
            "series '{}' has an undefined value at position {pos}",
            series.name()
        )));
    }
    Ok(series.values())
}

/// Fail when a series is shorter than `min`.
///
/// # Errors
///
/// Returns [`Error::ParameterType`].
pub fn require_min_len(series: &TimeSeries, min: usize, what: &str) -> Result<()> {
    if series.len() < min {
        return Err(Error::parameter(format!(
            "{what} needs at least {min} observations, series '{}' has {}",
            series.name(),
            series.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_ordinal_index_rejected() {
        let s = TimeSeries::from_values("x", vec![1.0, 2.0]);
        let err = require_datetime_index(&s).unwrap_err();
        assert!(err.is_index_type());
        assert_eq!(
            err.to_string(),
            "Array Index Type ERROR: Must be datetime or timestamp, but given ordinal"
        );
    }

    #[test]
    fn test_datetime_index_accepted() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let s = TimeSeries::daily("x", start, vec![1.0, 2.0]);
        assert_eq!(require_datetime_index(&s).unwrap().len(), 2);
        assert!(s.require_datetime_index().is_ok());
    }

    #[test]
    fn test_require_numeric() {
        assert!(require_numeric(&TimeSeries::from_values("e", vec![])).unwrap_err().is_parameter_type());
        assert!(require_numeric(&TimeSeries::from_values("n", vec![f64::NAN])).is_err());
        assert!(require_numeric(&TimeSeries::from_values("ok", vec![f64::NAN, 1.0])).is_ok());
    }

    #[test]
    fn test_require_all_finite() {
        let err = require_all_finite(&TimeSeries::from_values("g", vec![1.0, f64::NAN])).unwrap_err();
        assert!(err.to_string().contains("position 1"));
        assert!(require_all_finite(&TimeSeries::from_values("inf", vec![f64::INFINITY])).is_err());
        assert_eq!(require_all_finite(&TimeSeries::from_values("ok", vec![2.0])).unwrap(), &[2.0]);
    }

    #[test]
    fn test_require_min_len() {
        let s = TimeSeries::from_values("x", vec![1.0]);
        assert!(require_min_len(&s, 2, "Q-Q plot").unwrap_err().to_string().contains("Q-Q plot"));
        assert!(require_min_len(&s, 1, "plot").is_ok());
    }
}
