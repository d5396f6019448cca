//! Data-to-pixel mapping for one panel.

use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::scale::{LinearScale, Scale};

/// Maps one data axis onto a pixel interval.
///
/// Data is shifted by the lower limit before the `f32` scale so that
/// epoch-second coordinates keep their precision.
#[derive(Debug, Clone, Copy)]
struct AxisMap {
    origin: f64,
    scale: LinearScale,
}

impl AxisMap {
    fn new(limits: (f64, f64), range: (f32, f32)) -> Result<Self> {
        let span = (limits.1 - limits.0) as f32;
        Ok(Self {
            origin: limits.0,
            scale: LinearScale::new((0.0, span), range)?,
        })
    }

    fn map(&self, v: f64) -> f32 {
        if v.is_finite() {
            self.scale.scale((v - self.origin) as f32)
        } else {
            f32::NAN
        }
    }

    fn map_slice(&self, values: &[f64]) -> Vec<f32> {
        let shifted: Vec<f32> = values.iter().map(|v| (v - self.origin) as f32).collect();
        self.scale.scale_slice(&shifted)
    }
}

/// Data limits of a panel and the plot area they map onto.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    x: AxisMap,
    y: AxisMap,
    area: Rect,
}

impl Transform {
    /// Map `xlim` across `area` left to right and `ylim` bottom to top
    /// (top to bottom when `invert_y`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ScaleDomain`] for an empty limit interval.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64), area: Rect, invert_y: bool) -> Result<Self> {
        let y_range = if invert_y {
            (area.y, area.bottom())
        } else {
            (area.bottom(), area.y)
        };
        Ok(Self {
            x: AxisMap::new(xlim, (area.x, area.right()))?,
            y: AxisMap::new(ylim, y_range)?,
            area,
        })
    }

    /// The plot area in pixels.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Pixel column of data `x`; NaN stays NaN.
    #[must_use]
    pub fn x(&self, v: f64) -> f32 {
        self.x.map(v)
    }

    /// Pixel row of data `y`; NaN stays NaN.
    #[must_use]
    pub fn y(&self, v: f64) -> f32 {
        self.y.map(v)
    }

    /// Pixel position of a data point.
    #[must_use]
    pub fn point(&self, x: f64, y: f64) -> Point {
        Point::new(self.x(x), self.y(y))
    }

    /// Pixel positions of paired coordinates; undefined pairs map to NaN points.
    #[must_use]
    pub fn points(&self, xs: &[f64], ys: &[f64]) -> Vec<Point> {
        let px = self.x.map_slice(xs);
        let py = self.y.map_slice(ys);
        px.into_iter()
            .zip(py)
            .zip(xs.iter().zip(ys))
            .map(|((x, y), (dx, dy))| {
                if dx.is_finite() && dy.is_finite() {
                    Point::new(x, y)
                } else {
                    Point::new(f32::NAN, f32::NAN)
                }
            })
            .collect()
    }
}
