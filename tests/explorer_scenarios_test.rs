//! End-to-end chart scenarios through the public API.
//!
//! Run: cargo test --test explorer_scenarios_test

#![allow(clippy::unwrap_used, clippy::float_cmp, missing_docs)]

use approx::assert_relative_eq;
use chrono::NaiveDate;
use ts_explorer::figure::Artist;
use ts_explorer::prelude::*;
use ts_explorer::stats::{decompose, moving_average};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn fourteen_days() -> TimeSeries {
    let values = vec![
        12.0, 15.0, 11.0, 18.0, 21.0, 9.0, 7.0, 13.0, 16.0, 12.0, 19.0, 22.0, 10.0, 8.0,
    ];
    TimeSeries::daily("visits", start(), values)
}

#[test]
fn fourteen_daily_values_dashboard() {
    let config = ExplorerConfig::default().with_ma_period(3);
    let explorer = Explorer::with_config(config).unwrap();
    let figure = explorer.plot_all(&fourteen_days()).unwrap();

    assert_eq!(figure.len(), 10);
    let raw = figure.panels().next().unwrap();
    let lines: Vec<&Artist> = raw
        .artists()
        .iter()
        .filter(|a| matches!(a, Artist::Line { .. }))
        .collect();
    assert_eq!(lines.len(), 2);

    let Artist::Line { y, .. } = lines[1] else {
        unreachable!()
    };
    assert!(y[0].is_nan() && y[1].is_nan());
    assert_relative_eq!(y[2], (12.0 + 15.0 + 11.0) / 3.0);
    assert_relative_eq!(y[13], (22.0 + 10.0 + 8.0) / 3.0);

    let svg = figure.to_svg().unwrap().render();
    for title in ["Time Series", "Q-Q Plot", "Weekday Violin Plot", "STL - Residual"] {
        assert!(svg.contains(title), "missing panel title {title}");
    }
}

#[test]
fn moving_average_matches_rolling_window() {
    let ma = moving_average(&fourteen_days(), 3).unwrap();
    assert_eq!(ma.len(), 14);
    assert_eq!(ma.index(), fourteen_days().index());
    assert_relative_eq!(ma.values()[5], (21.0 + 18.0 + 9.0) / 3.0);
}

#[test]
fn identical_columns_correlate_perfectly() {
    let column: Vec<f64> = (0..10).map(|i| f64::from(i) * 1.5 + 2.0).collect();
    let table = Table::from_columns(vec![("left", column.clone()), ("right", column)]).unwrap();

    let explorer = Explorer::new();
    let target = explorer.plot_corr_heatmap_default(&table, None).unwrap();
    assert!(target.is_created());
    let figure = target.into_figure().unwrap();

    let svg = figure.to_svg().unwrap().render();
    assert_eq!(svg.matches(">1.00<").count(), 4);
    assert!(svg.contains("left") && svg.contains("right"));
}

#[test]
fn decomposition_is_additive() {
    let values: Vec<f64> = (0..42)
        .map(|i| 100.0 + 0.5 * f64::from(i) + [3.0, -1.0, 4.0, -2.0, 0.5, -3.0, -1.5][i as usize % 7])
        .collect();
    let series = TimeSeries::daily("sales", start(), values);
    let parts = decompose(&series, 7, &DecomposeOptions::default()).unwrap();

    for i in 0..series.len() {
        let (t, s, r) = (parts.trend.values()[i], parts.seasonal.values()[i], parts.resid.values()[i]);
        if t.is_finite() {
            assert_relative_eq!(t + s + r, series.values()[i], epsilon = 1e-9);
        } else {
            assert!(r.is_nan());
        }
    }
}

#[test]
fn ordinal_series_keeps_single_charts_but_not_calendar_charts() {
    let values: Vec<f64> = (0..40).map(|i| (f64::from(i) * 0.4).sin() * 10.0).collect();
    let series = TimeSeries::from_values("signal", values);
    let explorer = Explorer::new();

    assert!(explorer.plot_qq(&series, None).is_ok());
    assert!(explorer.plot_acf(&series, None).is_ok());
    assert!(explorer.plot_trend(&series, 5, None).is_ok());
    let err = explorer.plot_violin_weekday(&series, None).unwrap_err();
    assert!(err.is_index_type());
}

#[test]
fn caller_axes_are_drawn_in_place() {
    let explorer = Explorer::new();
    let mut figure = Figure::new(800, 600);
    let id = figure.add_subplot(2, 1, 1).unwrap();

    let ax = figure.axes_mut(id).unwrap();
    let target = explorer.plot(&fourteen_days(), Some(ax), "Daily", "visits").unwrap();
    assert!(!target.is_created());
    drop(target);

    let ax = figure.axes(id).unwrap();
    assert_eq!(ax.title(), "Daily");
    assert!(ax.has_legend());
    assert_eq!(figure.len(), 1);
}

#[test]
fn png_and_svg_files_are_written() {
    let dir = tempfile::tempdir().unwrap();
    let explorer = Explorer::new();
    let figure = explorer.plot_decomposition(&fourteen_days(), 7).unwrap();

    let png = dir.path().join("decomposition.png");
    let svg = dir.path().join("decomposition.svg");
    figure.save_png(&png).unwrap();
    figure.save_svg(&svg).unwrap();

    let bytes = std::fs::read(&png).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.starts_with("<svg") || text.starts_with("<?xml"));
    assert!(text.contains("Residual"));
}

#[test]
fn yaml_config_drives_explorer() {
    let yaml = "dashboard:\n  ma_period: 3\n  width: 650\n  height: 2000\nanalysis:\n  strip_seed: 7\n";
    let config = ExplorerConfig::from_yaml_str(yaml).unwrap();
    let figure = Explorer::with_config(config).unwrap().plot_all(&fourteen_days()).unwrap();
    assert_eq!((figure.width(), figure.height()), (650, 2000));
}
