//! Drawable elements recorded on an axes.

use crate::color::Rgba;
use crate::figure::Transform;
use crate::geometry::{Point, Rect};
use crate::plots::{HeatmapCells, Violin};
use crate::render::{Canvas, Stroke};

/// Data extent `(xmin, xmax, ymin, ymax)`.
pub type Extent = (f64, f64, f64, f64);

/// A recorded drawable element of an [`crate::figure::Axes`].
#[derive(Debug, Clone)]
pub enum Artist {
    /// Connected line through `(x, y)`; undefined values break the line.
    Line {
        /// X coordinates.
        x: Vec<f64>,
        /// Y coordinates.
        y: Vec<f64>,
        /// Line appearance.
        stroke: Stroke,
        /// Legend entry.
        label: Option<String>,
    },
    /// Filled circular markers.
    Markers {
        /// X coordinates.
        x: Vec<f64>,
        /// Y coordinates.
        y: Vec<f64>,
        /// Marker color.
        color: Rgba,
        /// Radius in pixels.
        radius: f32,
        /// Legend entry.
        label: Option<String>,
    },
    /// Vertical lines from zero to each value, capped by a marker.
    Stems {
        /// X coordinates.
        x: Vec<f64>,
        /// Stem heights.
        y: Vec<f64>,
        /// Stem and marker color.
        color: Rgba,
        /// Marker radius in pixels.
        radius: f32,
    },
    /// Shaded region between two curves.
    Band {
        /// X coordinates.
        x: Vec<f64>,
        /// Lower curve.
        lower: Vec<f64>,
        /// Upper curve.
        upper: Vec<f64>,
        /// Fill color, usually translucent.
        fill: Rgba,
    },
    /// Adjacent bars over bin edges.
    Bars {
        /// `heights.len() + 1` bin edges.
        edges: Vec<f64>,
        /// Bar heights.
        heights: Vec<f64>,
        /// Bar color.
        fill: Rgba,
        /// Edge color between bars.
        edge: Rgba,
    },
    /// Horizontal reference line across the whole panel.
    HLine {
        /// Y coordinate.
        y: f64,
        /// Line appearance.
        stroke: Stroke,
    },
    /// Violin with inner box.
    Violin(Violin),
    /// Heatmap cells with annotations.
    Heatmap(HeatmapCells),
}

fn fold_extent(xs: impl Iterator<Item = f64>, ys: impl Iterator<Item = f64>) -> Option<Extent> {
    let mut ext = (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in xs.zip(ys) {
        if x.is_finite() && y.is_finite() {
            ext = (ext.0.min(x), ext.1.max(x), ext.2.min(y), ext.3.max(y));
        }
    }
    (ext.0 <= ext.1).then_some(ext)
}

/// Smallest extent covering both.
#[must_use]
pub(crate) fn union(a: Option<Extent>, b: Option<Extent>) -> Option<Extent> {
    match (a, b) {
        (Some(a), Some(b)) => Some((a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3))),
        (a, None) => a,
        (None, b) => b,
    }
}

impl Artist {
    /// Legend entry and swatch color, if labelled.
    #[must_use]
    pub fn legend_entry(&self) -> Option<(&str, Rgba)> {
        match self {
            Self::Line {
                label: Some(label),
                stroke,
                ..
            } => Some((label, stroke.color)),
            Self::Markers {
                label: Some(label),
                color,
                ..
            } => Some((label, *color)),
            _ => None,
        }
    }

    /// Data extent over defined values; `None` when nothing is defined.
    ///
    /// Horizontal lines only contribute their y value.
    #[must_use]
    pub fn extent(&self) -> Option<Extent> {
        match self {
            Self::Line { x, y, .. } | Self::Markers { x, y, .. } => {
                fold_extent(x.iter().copied(), y.iter().copied())
            }
            Self::Stems { x, y, .. } => union(
                fold_extent(x.iter().copied(), y.iter().copied()),
                fold_extent(x.iter().copied(), std::iter::repeat(0.0)),
            ),
            Self::Band { x, lower, upper, .. } => union(
                fold_extent(x.iter().copied(), lower.iter().copied()),
                fold_extent(x.iter().copied(), upper.iter().copied()),
            ),
            Self::Bars { edges, heights, .. } => {
                let tops = fold_extent(edges.iter().copied(), heights.iter().copied());
                let base = fold_extent(edges.iter().copied(), std::iter::repeat(0.0));
                union(tops, base).map(|e| {
                    let hi = edges.iter().copied().filter(|v| v.is_finite()).fold(e.1, f64::max);
                    (e.0, hi, e.2, e.3)
                })
            }
            Self::HLine { y, .. } => y.is_finite().then_some((f64::NAN, f64::NAN, *y, *y)),
            Self::Violin(v) => Some(v.extent()),
            Self::Heatmap(h) => Some(h.extent()),
        }
    }

    /// Paint through `transform`.
    pub fn draw(&self, canvas: &mut dyn Canvas, transform: &Transform, ink: Rgba, font_size: f32) {
        match self {
            Self::Line { x, y, stroke, .. } => {
                canvas.polyline(&transform.points(x, y), *stroke);
            }
            Self::Markers { x, y, color, radius, .. } => {
                for p in transform.points(x, y) {
                    if p.x.is_finite() && p.y.is_finite() {
                        canvas.circle(p, *radius, *color);
                    }
                }
            }
            Self::Stems { x, y, color, radius } => {
                let base = transform.y(0.0);
                for p in transform.points(x, y) {
                    if p.x.is_finite() && p.y.is_finite() {
                        canvas.line(Point::new(p.x, base), p, Stroke::solid(*color, 1.0));
                        canvas.circle(p, *radius, *color);
                    }
                }
            }
            Self::Band { x, lower, upper, fill } => {
                let top = transform.points(x, upper);
                let bottom = transform.points(x, lower);
                let outline: Vec<Point> = top
                    .into_iter()
                    .chain(bottom.into_iter().rev())
                    .filter(|p| p.x.is_finite() && p.y.is_finite())
                    .collect();
                canvas.fill_polygon(&outline, *fill);
            }
            Self::Bars { edges, heights, fill, edge } => {
                let base = transform.y(0.0);
                for (bin, &h) in edges.windows(2).zip(heights) {
                    if !h.is_finite() {
                        continue;
                    }
                    let (x0, x1) = (transform.x(bin[0]), transform.x(bin[1]));
                    let top = transform.y(h);
                    let rect = Rect::new(x0, top.min(base), x1 - x0, (base - top).abs());
                    canvas.fill_rect(rect, *fill);
                    canvas.stroke_rect(rect, Stroke::solid(*edge, 1.0));
                }
            }
            Self::HLine { y, stroke } => {
                let area = transform.area();
                let py = transform.y(*y);
                canvas.line(Point::new(area.x, py), Point::new(area.right(), py), *stroke);
            }
            Self::Violin(v) => v.draw(canvas, transform, ink),
            Self::Heatmap(h) => h.draw(canvas, transform, font_size),
        }
    }
}
