//! Violin artist: a mirrored density curve with an inner box plot.
//!
//! Violins extend box plots with a kernel density estimate of each group.

use crate::color::Rgba;
use crate::error::Result;
use crate::figure::Transform;
use crate::geometry::{Point, Rect};
use crate::render::{Canvas, Stroke};
use crate::stats::{kde, percentile};

/// Statistics of a violin's inner box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lowest value inside the lower fence.
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Median (50th percentile).
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Highest value inside the upper fence.
    pub max: f64,
    /// Interquartile range (Q3 - Q1).
    pub iqr: f64,
    /// Values beyond 1.5 IQR of the box.
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Quartiles and 1.5 IQR whiskers of the defined values.
    ///
    /// Returns `None` when no value is defined.
    #[must_use]
    pub fn from_data(data: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let lower_fence = q1 - 1.5 * iqr;
        let upper_fence = q3 + 1.5 * iqr;

        let min = sorted
            .iter()
            .copied()
            .find(|&x| x >= lower_fence)
            .unwrap_or(sorted[0]);
        let max = sorted
            .iter()
            .rev()
            .copied()
            .find(|&x| x <= upper_fence)
            .unwrap_or(sorted[sorted.len() - 1]);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&x| x < lower_fence || x > upper_fence)
            .collect();

        Some(Self {
            min,
            q1,
            median,
            q3,
            max,
            iqr,
            outliers,
        })
    }
}

/// One violin at a categorical position.
#[derive(Debug, Clone, PartialEq)]
pub struct Violin {
    /// Category position on the x axis.
    pub position: f64,
    /// `(value, half width)` pairs along the value axis; half widths are
    /// relative to the widest point, which is 1.
    pub curve: Vec<(f64, f64)>,
    /// Inner box statistics.
    pub stats: BoxStats,
    /// Body color.
    pub fill: Rgba,
    /// Full width in category units.
    pub width: f64,
}

impl Violin {
    /// Build the violin of `values`, or `None` when no value is defined.
    ///
    /// A group with a single distinct value has no density; it collapses to a
    /// flat line across the full width.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ParameterType`] when `points < 2`.
    pub fn from_values(position: f64, values: &[f64], points: usize, fill: Rgba) -> Result<Option<Self>> {
        let clean: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some(stats) = BoxStats::from_data(&clean) else {
            return Ok(None);
        };

        if points < 2 {
            return Err(crate::Error::parameter("violin needs at least 2 grid points"));
        }

        let curve = if clean.iter().all(|&v| v == clean[0]) {
            vec![(clean[0], 1.0)]
        } else {
            let density = kde(&clean, points)?;
            let peak = density.density.iter().copied().fold(0.0, f64::max);
            density
                .x
                .into_iter()
                .zip(density.density)
                .map(|(x, d)| (x, if peak > 0.0 { d / peak } else { 0.0 }))
                .collect()
        };

        Ok(Some(Self {
            position,
            curve,
            stats,
            fill,
            width: 0.8,
        }))
    }

    /// Data extent `(xmin, xmax, ymin, ymax)`.
    #[must_use]
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        let (lo, hi) = self
            .curve
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(v, _)| (lo.min(v), hi.max(v)));
        let half = self.width / 2.0;
        (self.position - half, self.position + half, lo, hi)
    }

    /// Paint the body, outline and inner box.
    pub fn draw(&self, canvas: &mut dyn Canvas, transform: &Transform, outline: Rgba) {
        let half = self.width / 2.0;
        let stroke = Stroke::solid(outline, 1.0);

        if let [(value, _)] = self.curve.as_slice() {
            let y = transform.y(*value);
            canvas.line(
                Point::new(transform.x(self.position - half), y),
                Point::new(transform.x(self.position + half), y),
                Stroke::solid(self.fill, 2.0),
            );
            return;
        }

        let right = self
            .curve
            .iter()
            .map(|&(v, w)| transform.point(self.position + w * half, v));
        let left = self
            .curve
            .iter()
            .rev()
            .map(|&(v, w)| transform.point(self.position - w * half, v));
        let mut body: Vec<Point> = right.chain(left).collect();
        canvas.fill_polygon(&body, self.fill);
        if let Some(&first) = body.first() {
            body.push(first);
        }
        canvas.polyline(&body, stroke);

        // Inner box: whisker line, IQR bar, median dot.
        let cx = transform.x(self.position);
        canvas.line(
            Point::new(cx, transform.y(self.stats.min)),
            Point::new(cx, transform.y(self.stats.max)),
            stroke,
        );
        let box_half = (transform.x(self.position + half * 0.1) - cx).max(1.5);
        let top = transform.y(self.stats.q3).min(transform.y(self.stats.q1));
        let bottom = transform.y(self.stats.q3).max(transform.y(self.stats.q1));
        canvas.fill_rect(
            Rect::new(cx - box_half, top, box_half * 2.0, (bottom - top).max(1.0)),
            outline,
        );
        canvas.circle(
            Point::new(cx, transform.y(self.stats.median)),
            box_half.max(2.0),
            Rgba::WHITE,
        );
    }
}
