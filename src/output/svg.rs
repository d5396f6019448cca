//! SVG output encoder.
//!
//! The vector counterpart of the raster canvas. Unlike PNG output it carries
//! titles, tick labels, legends and heatmap annotations as `<text>` elements.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::render::{Canvas, Stroke, TextAnchor, TextStyle};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::Path;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// `None` leaves the document transparent.
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone)]
#[allow(missing_docs)]
pub enum SvgElement {
    Rect {
        rect: Rect,
        fill: Option<Rgba>,
        stroke: Option<Stroke>,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Polygon {
        points: Vec<Point>,
        fill: Rgba,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
}

impl SvgEncoder {
    /// Create an empty document with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Append a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements added so far.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, rgba_to_css(bg));
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), elements = self.elements.len(), "writing svg");
        fs::write(path, self.render())?;
        Ok(())
    }
}

impl Canvas for SvgEncoder {
    fn fill_rect(&mut self, rect: Rect, fill: Rgba) {
        self.add_element(SvgElement::Rect {
            rect,
            fill: Some(fill),
            stroke: None,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.add_element(SvgElement::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        });
    }

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.add_element(SvgElement::Line { from, to, stroke });
    }

    fn polyline(&mut self, points: &[Point], stroke: Stroke) {
        for run in points.split(|p| !p.x.is_finite() || !p.y.is_finite()) {
            if run.len() >= 2 {
                self.add_element(SvgElement::Polyline {
                    points: run.to_vec(),
                    stroke,
                });
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], fill: Rgba) {
        if points.len() >= 3 {
            self.add_element(SvgElement::Polygon {
                points: points.to_vec(),
                fill,
            });
        }
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Rgba) {
        self.add_element(SvgElement::Circle {
            cx: center.x,
            cy: center.y,
            r: radius,
            fill,
        });
    }

    fn text(&mut self, at: Point, text: &str, style: TextStyle) {
        if !text.is_empty() {
            self.add_element(SvgElement::Text {
                at,
                text: text.to_string(),
                style,
            });
        }
    }
}

/// CSS color for an SVG attribute.
fn rgba_to_css(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!(
            "rgba({},{},{},{:.3})",
            color.r,
            color.g,
            color.b,
            f32::from(color.a) / 255.0
        )
    }
}

fn stroke_attrs(stroke: Stroke) -> String {
    let mut attrs = format!(
        r#" stroke="{}" stroke-width="{}""#,
        rgba_to_css(stroke.color),
        stroke.width
    );
    if let Some(dash) = stroke.dash {
        let _ = write!(attrs, r#" stroke-dasharray="{dash},{dash}""#);
    }
    attrs
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { rect, fill, stroke } => {
            let fill_attr = fill.map_or_else(|| "none".to_string(), rgba_to_css);
            let stroke_attr = stroke.map(stroke_attrs).unwrap_or_default();
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill_attr}"{stroke_attr}/>"#,
                rect.x, rect.y, rect.width, rect.height
            )
        }
        SvgElement::Circle { cx, cy, r, fill } => {
            format!(r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#, rgba_to_css(*fill))
        }
        SvgElement::Line { from, to, stroke } => {
            format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke_attrs(*stroke)
            )
        }
        SvgElement::Polyline { points, stroke } => {
            format!(
                r#"<polyline points="{}" fill="none"{} stroke-linejoin="round"/>"#,
                points_attr(points),
                stroke_attrs(*stroke)
            )
        }
        SvgElement::Polygon { points, fill } => {
            format!(r#"<polygon points="{}" fill="{}"/>"#, points_attr(points), rgba_to_css(*fill))
        }
        SvgElement::Text { at, text, style } => {
            let anchor = match style.anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let transform = if style.rotation.abs() > f32::EPSILON {
                format!(r#" transform="rotate({} {} {})""#, -style.rotation, at.x, at.y)
            } else {
                String::new()
            };
            format!(
                r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{anchor}" font-family="sans-serif"{transform}>{}</text>"#,
                at.x,
                at.y,
                style.size,
                rgba_to_css(style.color),
                escape_xml(text)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_encoder_new() {
        let svg = SvgEncoder::new(800, 600).render();

        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_transparent_background() {
        let svg = SvgEncoder::new(10, 10).background(None).render();
        assert!(!svg.contains("100%"));
    }

    #[test]
    fn test_svg_rect() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.fill_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Rgba::RED);
        let svg = enc.render();

        assert!(svg.contains(r#"<rect x="10" y="20" width="30" height="40" fill="rgb(255,0,0)"/>"#));
    }

    #[test]
    fn test_dashed_line() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.line(
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
            Stroke::dashed(Rgba::BLACK, 2.0, 4.0),
        );
        let svg = enc.render();
        assert!(svg.contains("stroke-width=\"2\""));
        assert!(svg.contains("stroke-dasharray=\"4,4\""));
    }

    #[test]
    fn test_polyline_splits_on_gaps() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.polyline(
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(f32::NAN, 0.0),
                Point::new(3.0, 3.0),
                Point::new(f32::NAN, 0.0),
                Point::new(5.0, 5.0),
                Point::new(6.0, 6.0),
            ],
            Stroke::solid(Rgba::BLUE, 1.5),
        );
        assert_eq!(enc.elements().len(), 2);
    }

    #[test]
    fn test_text_escaped_and_rotated() {
        let mut enc = SvgEncoder::new(100, 100);
        enc.text(
            Point::new(10.0, 50.0),
            "a < b & c",
            TextStyle::new(12.0, Rgba::BLACK, TextAnchor::Middle).rotated(90.0),
        );
        enc.text(Point::new(0.0, 0.0), "", TextStyle::new(12.0, Rgba::BLACK, TextAnchor::Start));
        let svg = enc.render();

        assert!(svg.contains("a &lt; b &amp; c"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("rotate(-90 10 50)"));
        assert_eq!(enc.elements().len(), 1);
    }

    #[test]
    fn test_translucent_fill_css() {
        let mut enc = SvgEncoder::new(10, 10);
        enc.fill_polygon(
            &[Point::new(0.0, 0.0), Point::new(5.0, 0.0), Point::new(5.0, 5.0)],
            Rgba::new(0, 0, 255, 128),
        );
        assert!(enc.render().contains("rgba(0,0,255,0.502)"));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        SvgEncoder::new(20, 20).write_to_file(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
