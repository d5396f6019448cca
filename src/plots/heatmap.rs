//! Annotated heatmap artist for square or rectangular matrices.
//!
//! Cell `(row, col)` is centered on data point `(col, row)`, so categorical
//! tick positions line up with cell centers.
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Borland, D., & Taylor, R. M. (2007). "Rainbow Color Map (Still) Considered Harmful."
//!   IEEE Computer Graphics and Applications.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::figure::Transform;
use crate::geometry::Rect;
use crate::render::{Canvas, TextAnchor, TextStyle};
use crate::scale::{ColorMap, ColorScale, Scale};

/// A matrix of optional values drawn as colored cells.
#[derive(Debug, Clone)]
pub struct HeatmapCells {
    values: Vec<Vec<Option<f64>>>,
    color_map: ColorMap,
    scale: ColorScale,
    annotate: bool,
}

impl HeatmapCells {
    /// Color the defined cells over their value range.
    ///
    /// An all-undefined matrix uses the domain `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for an empty matrix and
    /// [`Error::DataLengthMismatch`] for ragged rows.
    pub fn new(values: Vec<Vec<Option<f64>>>, color_map: ColorMap) -> Result<Self> {
        let cols = values.first().map_or(0, Vec::len);
        if values.is_empty() || cols == 0 {
            return Err(Error::EmptyData);
        }
        if let Some(row) = values.iter().find(|r| r.len() != cols) {
            return Err(Error::DataLengthMismatch {
                x_len: cols,
                y_len: row.len(),
            });
        }

        let (lo, hi) = values
            .iter()
            .flatten()
            .flatten()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let domain = if lo <= hi { (lo as f32, hi as f32) } else { (0.0, 1.0) };

        Ok(Self {
            scale: ColorScale::from_map(color_map, domain)?,
            values,
            color_map,
            annotate: true,
        })
    }

    /// Enable or disable the value annotations.
    #[must_use]
    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    /// The palette in use.
    #[must_use]
    pub fn color_map(&self) -> ColorMap {
        self.color_map
    }

    /// Fill color of a cell, `None` when undefined.
    #[must_use]
    pub fn cell_color(&self, row: usize, col: usize) -> Option<Rgba> {
        let v = self.values.get(row)?.get(col).copied().flatten()?;
        v.is_finite().then(|| self.scale.scale(v as f32))
    }

    /// Two-decimal annotation of a cell, `None` when undefined.
    #[must_use]
    pub fn annotation(&self, row: usize, col: usize) -> Option<String> {
        let v = self.values.get(row)?.get(col).copied().flatten()?;
        v.is_finite().then(|| format!("{v:.2}"))
    }

    /// Data extent `(xmin, xmax, ymin, ymax)`.
    #[must_use]
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        (-0.5, self.cols() as f64 - 0.5, -0.5, self.rows() as f64 - 0.5)
    }

    /// Paint the cells and, when enabled, their annotations.
    pub fn draw(&self, canvas: &mut dyn Canvas, transform: &Transform, font_size: f32) {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let Some(fill) = self.cell_color(row, col) else {
                    continue;
                };
                let (c, r) = (col as f64, row as f64);
                let a = transform.point(c - 0.5, r - 0.5);
                let b = transform.point(c + 0.5, r + 0.5);
                let rect = Rect::new(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs());
                canvas.fill_rect(rect, fill);

                if self.annotate {
                    if let Some(label) = self.annotation(row, col) {
                        let ink = if fill.luminance() < 0.5 { Rgba::WHITE } else { Rgba::BLACK };
                        let mut at = rect.center();
                        at.y += font_size * 0.35;
                        canvas.text(at, &label, TextStyle::new(font_size, ink, TextAnchor::Middle));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{SvgElement, SvgEncoder};

    fn matrix() -> Vec<Vec<Option<f64>>> {
        vec![vec![Some(1.0), Some(-0.25)], vec![Some(-0.25), None]]
    }

    #[test]
    fn test_shape_and_annotations() {
        let cells = HeatmapCells::new(matrix(), ColorMap::Blues).unwrap();
        assert_eq!((cells.rows(), cells.cols()), (2, 2));
        assert_eq!(cells.annotation(0, 0).as_deref(), Some("1.00"));
        assert_eq!(cells.annotation(0, 1).as_deref(), Some("-0.25"));
        assert!(cells.annotation(1, 1).is_none());
        assert!(cells.cell_color(1, 1).is_none());
        assert_eq!(cells.extent(), (-0.5, 1.5, -0.5, 1.5));
    }

    #[test]
    fn test_extremes_map_to_palette_ends() {
        let cells = HeatmapCells::new(matrix(), ColorMap::Blues).unwrap();
        let stops = ColorMap::Blues.stops();
        assert_eq!(cells.cell_color(0, 0), stops.last().copied());
        assert_eq!(cells.cell_color(0, 1), stops.first().copied());
    }

    #[test]
    fn test_rejects_empty_and_ragged() {
        assert!(matches!(HeatmapCells::new(vec![], ColorMap::Blues), Err(Error::EmptyData)));
        let ragged = vec![vec![Some(1.0), Some(2.0)], vec![Some(1.0)]];
        assert!(matches!(
            HeatmapCells::new(ragged, ColorMap::Blues),
            Err(Error::DataLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_all_undefined_is_blank() {
        let cells = HeatmapCells::new(vec![vec![None]], ColorMap::Magma).unwrap();
        assert!(cells.cell_color(0, 0).is_none());
    }

    #[test]
    fn test_draw_skips_undefined_cells() {
        let cells = HeatmapCells::new(matrix(), ColorMap::Viridis).unwrap();
        let area = Rect::new(0.0, 0.0, 200.0, 200.0);
        let transform = Transform::new((-0.5, 1.5), (-0.5, 1.5), area, true).unwrap();
        let mut svg = SvgEncoder::new(200, 200);
        cells.draw(&mut svg, &transform, 10.0);
        let rects = svg.elements().iter().filter(|e| matches!(e, SvgElement::Rect { .. })).count();
        let texts: Vec<&str> = svg
            .elements()
            .iter()
            .filter_map(|e| match e {
                SvgElement::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(rects, 3);
        assert_eq!(texts, vec!["1.00", "-0.25", "-0.25"]);
    }
}
