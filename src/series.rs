//! Labeled time series.
//!
//! A [`TimeSeries`] pairs `f64` observations with an index whose kind is fixed
//! at construction. `NaN` marks an undefined observation; derived series such
//! as a moving average use it for positions that have no value.

use crate::error::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;

/// Index of a [`TimeSeries`].
#[derive(Debug, Clone, PartialEq)]
pub enum TimeIndex {
    /// Integer positions or labels.
    Ordinal(Vec<i64>),
    /// Calendar timestamps.
    DateTime(Vec<NaiveDateTime>),
}

impl TimeIndex {
    /// Number of index entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ordinal(v) => v.len(),
            Self::DateTime(v) => v.len(),
        }
    }

    /// True when the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the index kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Ordinal(_) => "ordinal",
            Self::DateTime(_) => "datetime",
        }
    }

    /// True for [`TimeIndex::DateTime`].
    #[must_use]
    pub const fn is_datetime(&self) -> bool {
        matches!(self, Self::DateTime(_))
    }

    /// Timestamps, when the index is date/time typed.
    #[must_use]
    pub fn datetimes(&self) -> Option<&[NaiveDateTime]> {
        match self {
            Self::DateTime(v) => Some(v),
            Self::Ordinal(_) => None,
        }
    }

    /// Position of entry `i` on a continuous axis.
    ///
    /// Ordinals map to themselves; timestamps to seconds since the Unix epoch.
    #[must_use]
    pub fn coordinate(&self, i: usize) -> Option<f64> {
        match self {
            Self::Ordinal(v) => v.get(i).map(|&x| x as f64),
            Self::DateTime(v) => v.get(i).map(|t| t.and_utc().timestamp() as f64),
        }
    }

    /// All coordinates, see [`TimeIndex::coordinate`].
    #[must_use]
    pub fn coordinates(&self) -> Vec<f64> {
        (0..self.len()).filter_map(|i| self.coordinate(i)).collect()
    }
}

/// A named sequence of observations with an index of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    values: Vec<f64>,
    index: TimeIndex,
}

impl TimeSeries {
    /// Build a series from values and an index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] when the lengths differ.
    pub fn new(name: impl Into<String>, values: Vec<f64>, index: TimeIndex) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::DataLengthMismatch {
                x_len: index.len(),
                y_len: values.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            values,
            index,
        })
    }

    /// Series indexed by positions `0..n`.
    #[must_use]
    pub fn from_values(name: impl Into<String>, values: Vec<f64>) -> Self {
        let index = TimeIndex::Ordinal((0..values.len() as i64).collect());
        Self {
            name: name.into(),
            values,
            index,
        }
    }

    /// Series with one observation per day, starting at midnight of `start`.
    #[must_use]
    pub fn daily(name: impl Into<String>, start: NaiveDate, values: Vec<f64>) -> Self {
        let origin = start.and_time(chrono::NaiveTime::MIN);
        let stamps = (0..values.len() as i64)
            .map(|d| origin + Duration::days(d))
            .collect();
        Self {
            name: name.into(),
            values,
            index: TimeIndex::DateTime(stamps),
        }
    }

    /// Series over explicit timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] when the lengths differ.
    pub fn with_datetimes(
        name: impl Into<String>,
        stamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self> {
        Self::new(name, values, TimeIndex::DateTime(stamps))
    }

    /// A new series sharing this one's index.
    pub(crate) fn derive(&self, name: impl Into<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        Self {
            name: name.into(),
            values,
            index: self.index.clone(),
        }
    }

    /// Series name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw observations, `NaN` where undefined.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The index.
    #[must_use]
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Number of observations, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `i`; `None` when out of range or undefined.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().filter(|v| !v.is_nan())
    }

    /// Count of defined observations.
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// Fail unless the index is date/time typed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexType`] for an ordinal index.
    pub fn require_datetime_index(&self) -> Result<&[NaiveDateTime]> {
        crate::validate::require_datetime_index(self)
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} values, {} index)",
            self.name,
            self.values.len(),
            self.index.kind()
        )
    }
}
