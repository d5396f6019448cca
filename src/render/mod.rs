//! Drawing surfaces.
//!
//! Figures paint through the [`Canvas`] trait so that one layout pass can
//! target either the raster [`Framebuffer`] or the vector SVG encoder.
//!
//! # Algorithms
//!
//! - **Wu's Anti-aliased Line**: hairlines with sub-pixel accuracy
//! - **Midpoint Circle**: filled markers
//! - **Scanline fill**: even-odd polygon fill for violins and bands
//!
//! # References
//!
//! - Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.

mod primitives;

pub use primitives::{
    draw_circle, draw_dashed_line, draw_line_aa, draw_rect, draw_rect_outline,
    draw_thick_line, fill_polygon,
};

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Point, Rect};

/// Line appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Rgba,
    /// Width in pixels.
    pub width: f32,
    /// Dash length in pixels, `None` for a solid line.
    pub dash: Option<f32>,
}

impl Stroke {
    /// Solid stroke.
    #[must_use]
    pub const fn solid(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    /// Dashed stroke.
    #[must_use]
    pub const fn dashed(color: Rgba, width: f32, dash: f32) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the point.
    #[default]
    Start,
    /// Text is centered on the point.
    Middle,
    /// Text ends at the point.
    End,
}

/// Text appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: f32,
    /// Fill color.
    pub color: Rgba,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Rotation in degrees, counter-clockwise positive.
    pub rotation: f32,
}

impl TextStyle {
    /// Unrotated text.
    #[must_use]
    pub const fn new(size: f32, color: Rgba, anchor: TextAnchor) -> Self {
        Self {
            size,
            color,
            anchor,
            rotation: 0.0,
        }
    }

    /// Rotate the text.
    #[must_use]
    pub const fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// A surface figures can paint on.
pub trait Canvas {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, fill: Rgba);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Straight line segment.
    fn line(&mut self, from: Point, to: Point, stroke: Stroke);

    /// Connected segments; a non-finite point breaks the line.
    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite() {
                self.line(a, b, stroke);
            }
        }
    }

    /// Filled polygon.
    fn fill_polygon(&mut self, points: &[Point], fill: Rgba);

    /// Filled circle.
    fn circle(&mut self, center: Point, radius: f32, fill: Rgba);

    /// Text label.
    fn text(&mut self, at: Point, text: &str, style: TextStyle);
}

/// [`Canvas`] over a [`Framebuffer`].
///
/// The raster surface carries no font, so [`Canvas::text`] draws nothing here;
/// titles and tick labels appear in SVG output only.
#[derive(Debug)]
pub struct RasterCanvas<'a> {
    fb: &'a mut Framebuffer,
}

impl<'a> RasterCanvas<'a> {
    /// Wrap a framebuffer.
    pub fn new(fb: &'a mut Framebuffer) -> Self {
        Self { fb }
    }
}

impl Canvas for RasterCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, fill: Rgba) {
        draw_rect(self.fb, rect.x, rect.y, rect.width, rect.height, fill);
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        draw_rect_outline(self.fb, rect.x, rect.y, rect.width, rect.height, stroke.color, stroke.width);
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        match stroke.dash {
            Some(dash) => draw_dashed_line(self.fb, from, to, stroke.width, dash, stroke.color),
            None => draw_thick_line(self.fb, from, to, stroke.width, stroke.color),
        }
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Rgba) {
        fill_polygon(self.fb, points, fill);
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Rgba) {
        if center.x.is_finite() && center.y.is_finite() {
            draw_circle(self.fb, center.x.round() as i32, center.y.round() as i32, radius.round() as i32, fill);
        }
    }

    fn text(&mut self, _at: Point, _text: &str, _style: TextStyle) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_breaks_on_nan() {
        let mut fb = Framebuffer::new(50, 20).unwrap();
        fb.clear(Rgba::WHITE);
        {
            let mut canvas = RasterCanvas::new(&mut fb);
            canvas.polyline(
                &[
                    Point::new(0.0, 10.0),
                    Point::new(10.0, 10.0),
                    Point::new(f32::NAN, f32::NAN),
                    Point::new(40.0, 10.0),
                    Point::new(49.0, 10.0),
                ],
                Stroke::solid(Rgba::BLACK, 1.0),
            );
        }
        assert_ne!(fb.get_pixel(5, 10), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(25, 10), Some(Rgba::WHITE));
        assert_ne!(fb.get_pixel(45, 10), Some(Rgba::WHITE));
    }

    #[test]
    fn test_raster_text_is_noop() {
        let mut fb = Framebuffer::new(20, 20).unwrap();
        fb.clear(Rgba::WHITE);
        RasterCanvas::new(&mut fb).text(
            Point::new(10.0, 10.0),
            "Time Series",
            TextStyle::new(15.0, Rgba::BLACK, TextAnchor::Middle),
        );
        assert_eq!(fb.count_ink(Rgba::WHITE, (0, 0, 20, 20)), 0);
    }
}
