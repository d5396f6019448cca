//! Property-based tests for the statistics and layout layers.
//!
//! Run: cargo test --test property_test

#![allow(clippy::unwrap_used, missing_docs)]

use chrono::NaiveDate;
use proptest::prelude::*;
use ts_explorer::figure::{nice_step, numeric_ticks};
use ts_explorer::prelude::*;
use ts_explorer::stats::{acf, correlation_matrix, moving_average, probplot, rolling_mean};

fn finite_values(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e3f64..1.0e3, min_len..80)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rolling_mean_keeps_length_and_warmup(values in finite_values(1), period in 1usize..10) {
        let out = rolling_mean(&values, period).unwrap();
        prop_assert_eq!(out.len(), values.len());
        for (i, v) in out.iter().enumerate() {
            prop_assert_eq!(v.is_nan(), i + 1 < period);
        }
    }

    #[test]
    fn moving_average_stays_within_window_bounds(values in finite_values(5), period in 1usize..5) {
        let series = TimeSeries::from_values("x", values.clone());
        let ma = moving_average(&series, period).unwrap();
        for i in (period - 1)..values.len() {
            let window = &values[i + 1 - period..=i];
            let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let v = ma.values()[i];
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }

    #[test]
    fn acf_starts_at_one_and_is_bounded(values in finite_values(8)) {
        prop_assume!(values.iter().any(|&v| (v - values[0]).abs() > 1e-6));
        let corr = acf(&values, None, 0.05).unwrap();
        prop_assert!((corr.values[0] - 1.0).abs() < 1e-9);
        for r in &corr.values {
            prop_assert!(r.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn probplot_quantiles_are_sorted(values in finite_values(3)) {
        prop_assume!(values.iter().any(|&v| (v - values[0]).abs() > 1e-6));
        let plot = probplot(&values).unwrap();
        prop_assert!(plot.theoretical.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(plot.ordered.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn correlation_matrix_is_symmetric(a in finite_values(4), shift in -5.0f64..5.0) {
        let b: Vec<f64> = a.iter().enumerate().map(|(i, v)| v * 0.5 + shift * i as f64).collect();
        let table = Table::from_columns(vec![("a", a), ("b", b)]).unwrap();
        let matrix = correlation_matrix(&table, CorrelationMethod::Pearson, 1).unwrap();
        prop_assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
        if let Some(r) = matrix.get(0, 1) {
            prop_assert!(r.abs() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn numeric_ticks_cover_range(lo in -1.0e4f64..1.0e4, span in 1.0e-3f64..1.0e4) {
        let hi = lo + span;
        let ticks = numeric_ticks(lo, hi, 5);
        prop_assert!(!ticks.is_empty());
        let step = nice_step(span, 5);
        for t in &ticks {
            prop_assert!(t.value >= lo - step * 1e-6 && t.value <= hi + step * 1e-6);
        }
    }

    #[test]
    fn subplot_indices_are_validated(nrows in 1usize..12, ncols in 1usize..4, index in 0usize..60) {
        let mut figure = Figure::new(1300, 4000);
        let result = figure.add_subplot(nrows, ncols, index);
        prop_assert_eq!(result.is_ok(), index >= 1 && index <= nrows * ncols);
    }

    #[test]
    fn strip_categories_are_sorted_days(len in 1usize..90, offset in 0i64..365) {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Duration::days(offset);
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let series = TimeSeries::daily("x", start, values);
        let target = Explorer::new().plot_strip_day_of_month(&series, None).unwrap();
        let AxisKind::Categorical(labels) = target.x_axis() else {
            return Err(TestCaseError::fail("expected categorical axis"));
        };
        let days: Vec<u32> = labels.iter().map(|l| l.parse().unwrap()).collect();
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(days.iter().all(|d| (1..=31).contains(d)));
    }
}
