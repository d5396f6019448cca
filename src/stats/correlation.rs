//! Pairwise correlation matrices.
//!
//! Each pair of columns is correlated over the rows where both are defined.
//! A cell is `None` when fewer than `min_periods` such rows exist or either
//! side has zero variance over them.

use crate::error::{Error, Result};
use crate::table::Table;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    /// Linear (product-moment) correlation.
    #[default]
    Pearson,
    /// Kendall's tau-b rank correlation.
    Kendall,
    /// Spearman's rank correlation (average ranks for ties).
    Spearman,
}

impl CorrelationMethod {
    /// Lower-case name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pearson => "pearson",
            Self::Kendall => "kendall",
            Self::Spearman => "spearman",
        }
    }

    /// Coefficient of two equally long, fully defined samples.
    #[must_use]
    pub fn coefficient(self, x: &[f64], y: &[f64]) -> Option<f64> {
        match self {
            Self::Pearson => pearson(x, y),
            Self::Spearman => spearman(x, y),
            Self::Kendall => kendall(x, y),
        }
    }
}

impl fmt::Display for CorrelationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorrelationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pearson" => Ok(Self::Pearson),
            "kendall" => Ok(Self::Kendall),
            "spearman" => Ok(Self::Spearman),
            _ => Err(Error::parameter(format!(
                "unknown correlation method '{s}': expected pearson, kendall or spearman"
            ))),
        }
    }
}

/// Pearson correlation coefficient.
///
/// # Formula
///
/// r = Σ((xi - x̄)(yi - ȳ)) / √(Σ(xi - x̄)² × Σ(yi - ȳ)²)
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x[..n].iter().zip(&y[..n]) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    Some((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Ranks starting at 1; ties share their average rank.
fn average_ranks(x: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..x.len()).collect();
    order.sort_by(|&a, &b| x[a].total_cmp(&x[b]));

    let mut ranks = vec![0.0; x.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && x[order[end]] == x[order[start]] {
            end += 1;
        }
        let rank = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}

/// Spearman rank correlation: Pearson on average ranks.
#[must_use]
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    pearson(&average_ranks(&x[..n]), &average_ranks(&y[..n]))
}

/// Kendall's tau-b.
///
/// # Formula
///
/// τ_b = (C - D) / √((C + D + Tx)(C + D + Ty)), where `Tx` (`Ty`) counts pairs
/// tied only in x (y).
#[must_use]
pub fn kendall(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let (mut concordant, mut discordant, mut ties_x, mut ties_y) = (0i64, 0i64, 0i64, 0i64);
    for i in 0..n {
        for j in (i + 1)..n {
            match (x[i].total_cmp(&x[j]), y[i].total_cmp(&y[j])) {
                (Ordering::Equal, Ordering::Equal) => {}
                (Ordering::Equal, _) => ties_x += 1,
                (_, Ordering::Equal) => ties_y += 1,
                (a, b) if a == b => concordant += 1,
                _ => discordant += 1,
            }
        }
    }
    let denom = (((concordant + discordant + ties_x) * (concordant + discordant + ties_y)) as f64).sqrt();
    if denom <= 0.0 {
        return None;
    }
    Some((concordant - discordant) as f64 / denom)
}

/// Square, symmetric matrix of pairwise coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// Column names, in table order.
    pub names: Vec<String>,
    /// `values[i][j]` correlates column `i` with column `j`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the matrix has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Cell value, `None` when undefined or out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    /// Defined cells as `(min, max)`, `None` when no cell is defined.
    #[must_use]
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Correlate every pair of table columns.
///
/// `min_periods` below 1 is treated as 1.
///
/// # Errors
///
/// Returns [`Error::ParameterType`] for a table with no rows.
pub fn correlation_matrix(
    table: &Table,
    method: CorrelationMethod,
    min_periods: usize,
) -> Result<CorrelationMatrix> {
    if table.nrows() == 0 {
        return Err(Error::parameter("correlation needs at least one row"));
    }
    let min_periods = min_periods.max(1);
    let k = table.ncols();
    let mut values = vec![vec![None; k]; k];

    for i in 0..k {
        for j in i..k {
            let (Some(a), Some(b)) = (table.column(i), table.column(j)) else {
                continue;
            };
            let (xs, ys): (Vec<f64>, Vec<f64>) = a
                .iter()
                .zip(b)
                .filter(|(x, y)| x.is_finite() && y.is_finite())
                .map(|(&x, &y)| (x, y))
                .unzip();
            if xs.len() < min_periods {
                continue;
            }
            let cell = if i == j {
                pearson(&xs, &ys).map(|_| 1.0)
            } else {
                method.coefficient(&xs, &ys)
            };
            values[i][j] = cell;
            values[j][i] = cell;
        }
    }

    for (i, name) in table.names().iter().enumerate() {
        if values[i][i].is_none() {
            tracing::warn!(column = name.as_str(), "column has zero variance or too few observations; correlations undefined");
        }
    }

    Ok(CorrelationMatrix {
        names: table.names().to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("Pearson".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Pearson);
        assert_eq!("kendall".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Kendall);
        assert_eq!("SPEARMAN".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Spearman);
        assert!("cosine".parse::<CorrelationMethod>().unwrap_err().is_parameter_type());
    }

    #[test]
    fn test_pearson_perfect() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        assert_relative_eq!(pearson(&x, &y).unwrap(), 1.0);
        let neg: Vec<f64> = y.iter().map(|v| -v).collect();
        assert_relative_eq!(pearson(&x, &neg).unwrap(), -1.0);
        assert_eq!(pearson(&x, &[1.0; 5]), None);
    }

    #[test]
    fn test_average_ranks_ties() {
        assert_eq!(average_ranks(&[10.0, 20.0, 10.0, 30.0]), vec![1.5, 3.0, 1.5, 4.0]);
    }

    #[test]
    fn test_spearman_monotone() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 8.0, 27.0, 64.0, 125.0];
        assert_relative_eq!(spearman(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_kendall_tau_b() {
        // C = 8, D = 1, one pair tied in y only: 7 / sqrt(9 * 10)
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 3.0, 2.0, 5.0, 5.0];
        let expected = 7.0 / (9.0f64 * 10.0).sqrt();
        assert_relative_eq!(kendall(&x, &y).unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_columns_give_ones() {
        let v: Vec<f64> = vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0, 5.0, 3.0];
        let t = Table::from_columns(vec![("a", v.clone()), ("b", v)]).unwrap();
        for method in [CorrelationMethod::Pearson, CorrelationMethod::Spearman, CorrelationMethod::Kendall] {
            let m = correlation_matrix(&t, method, 1).unwrap();
            for i in 0..2 {
                for j in 0..2 {
                    assert_relative_eq!(m.get(i, j).unwrap(), 1.0, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_pairwise_complete_and_min_periods() {
        let t = Table::from_columns(vec![
            ("a", vec![1.0, 2.0, f64::NAN, 4.0, 5.0]),
            ("b", vec![2.0, 4.0, 6.0, f64::NAN, 10.0]),
        ])
        .unwrap();
        let m = correlation_matrix(&t, CorrelationMethod::Pearson, 1).unwrap();
        assert_relative_eq!(m.get(0, 1).unwrap(), 1.0);

        let strict = correlation_matrix(&t, CorrelationMethod::Pearson, 4).unwrap();
        assert_eq!(strict.get(0, 1), None);
        assert_relative_eq!(strict.get(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_constant_column_undefined() {
        let t = Table::from_columns(vec![("a", vec![1.0, 2.0, 3.0]), ("c", vec![7.0; 3])]).unwrap();
        let m = correlation_matrix(&t, CorrelationMethod::Spearman, 1).unwrap();
        assert_eq!(m.get(1, 1), None);
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.value_range(), Some((1.0, 1.0)));
    }

    #[test]
    fn test_symmetric() {
        let t = Table::from_rows(&[
            vec![1.0, 5.0, 2.0],
            vec![2.0, 3.0, 2.5],
            vec![3.0, 4.0, 1.0],
            vec![4.0, 1.0, 3.0],
        ])
        .unwrap();
        let m = correlation_matrix(&t, CorrelationMethod::Kendall, 1).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }
}
