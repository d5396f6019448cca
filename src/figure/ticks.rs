//! Axis tick placement and labels.

use chrono::DateTime;

/// A tick position in data coordinates and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Data coordinate.
    pub value: f64,
    /// Rendered label.
    pub label: String,
}

/// Step of roughly `span / target` rounded to 1, 2, 2.5 or 5 times a power of ten.
#[must_use]
pub fn nice_step(span: f64, target: usize) -> f64 {
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 2.5 {
        2.5
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Label for `value` with as many decimals as `step` needs.
#[must_use]
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize + usize::from((step / 10f64.powf(step.log10().floor())).fract() > 1e-9)
    };
    let value = if value.abs() < step * 1e-9 { 0.0 } else { value };
    format!("{value:.decimals$}")
}

/// Ticks at multiples of a nice step inside `[lo, hi]`.
#[must_use]
pub fn numeric_ticks(lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo {
        return Vec::new();
    }
    let step = nice_step(hi - lo, target);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let value = k as f64 * step;
            Tick {
                value,
                label: format_tick(value, step),
            }
        })
        .collect()
}

const DAY: f64 = 86_400.0;

/// Ticks over epoch seconds, on whole days, labelled `%Y-%m-%d`.
///
/// Spans shorter than two days fall back to hourly ticks labelled
/// `%m-%d %H:%M`.
#[must_use]
pub fn date_ticks(lo: f64, hi: f64, target: usize) -> Vec<Tick> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || target == 0 {
        return Vec::new();
    }
    let span = hi - lo;
    let (unit, format, candidates): (f64, &str, &[f64]) = if span < 2.0 * DAY {
        (3600.0, "%m-%d %H:%M", &[1.0, 2.0, 3.0, 6.0, 12.0, 24.0])
    } else {
        (DAY, "%Y-%m-%d", &[1.0, 2.0, 7.0, 14.0, 30.0, 61.0, 91.0, 182.0, 365.0])
    };
    let wanted = span / unit / target as f64;
    let step_units = candidates
        .iter()
        .copied()
        .find(|&c| c >= wanted)
        .unwrap_or_else(|| (wanted / 365.0).ceil() * 365.0);
    let step = step_units * unit;

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .filter_map(|k| {
            let value = k as f64 * step;
            let stamp = DateTime::from_timestamp(value as i64, 0)?;
            Some(Tick {
                value,
                label: stamp.naive_utc().format(format).to_string(),
            })
        })
        .collect()
}

/// One tick per category at positions `0, 1, 2, ...`.
#[must_use]
pub fn category_ticks(labels: &[String]) -> Vec<Tick> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| Tick {
            value: i as f64,
            label: label.clone(),
        })
        .collect()
}
