//! Column-aligned tables of named numeric series.

use crate::error::{Error, Result};
use crate::series::TimeSeries;

/// Named numeric columns of equal length. `NaN` marks a missing cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Table {
    /// Build from `(name, values)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when there are no columns, names
    /// repeat, or lengths differ.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::parameter("table needs at least one column"));
        }
        let (names, columns): (Vec<String>, Vec<Vec<f64>>) =
            columns.into_iter().map(|(n, c)| (n.into(), c)).unzip();

        let rows = columns[0].len();
        if let Some((name, col)) = names.iter().zip(&columns).find(|(_, c)| c.len() != rows) {
            return Err(Error::parameter(format!(
                "column '{name}' has {} rows, expected {rows}",
                col.len()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::parameter(format!("duplicate column name '{name}'")));
            }
        }

        Ok(Self { names, columns })
    }

    /// One column per series, named after the series.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Table::from_columns`].
    pub fn from_series(series: &[TimeSeries]) -> Result<Self> {
        Self::from_columns(
            series
                .iter()
                .map(|s| (s.name().to_string(), s.values().to_vec()))
                .collect(),
        )
    }

    /// Row-oriented data; columns are named `"0"`, `"1"`, ...
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] for no rows or ragged rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let width = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| Error::parameter("table needs at least one row"))?;
        if let Some(pos) = rows.iter().position(|r| r.len() != width) {
            return Err(Error::parameter(format!(
                "row {pos} has {} values, expected {width}",
                rows[pos].len()
            )));
        }
        Self::from_columns(
            (0..width)
                .map(|c| (c.to_string(), rows.iter().map(|r| r[c]).collect()))
                .collect(),
        )
    }

    /// Column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column by position.
    #[must_use]
    pub fn column(&self, i: usize) -> Option<&[f64]> {
        self.columns.get(i).map(Vec::as_slice)
    }

    /// Column by name.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&[f64]> {
        let i = self.names.iter().position(|n| n == name)?;
        self.column(i)
    }

    /// Number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}
