//! Rasterization of lines, circles, rectangles and polygons.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw an anti-aliased line using Wu's algorithm.
///
/// Two pixels are plotted per step along the major axis, weighted by the
/// fractional distance to the ideal line.
///
/// Wu, X. (1991). "An Efficient Antialiasing Technique." SIGGRAPH '91.
pub fn draw_line_aa(fb: &mut Framebuffer, from: Point, to: Point, color: Rgba) {
    let (x0, y0, x1, y1) = (from.x, from.y, to.x, to.y);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let (x0, y0, x1, y1) = if steep { (y0, x0, y1, x1) } else { (x0, y0, x1, y1) };
    let (x0, y0, x1, y1) = if x0 > x1 { (x1, y1, x0, y0) } else { (x0, y0, x1, y1) };

    let dx = x1 - x0;
    let dy = y1 - y0;
    let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { dy / dx };

    let mut endpoint = |x: f32, y: f32, gap: f32| -> (i32, f32) {
        let xend = x.round();
        let yend = y + gradient * (xend - x);
        let xpxl = xend as i32;
        let ypxl = yend.floor() as i32;
        if steep {
            plot(fb, ypxl, xpxl, color, rfpart(yend) * gap);
            plot(fb, ypxl + 1, xpxl, color, fpart(yend) * gap);
        } else {
            plot(fb, xpxl, ypxl, color, rfpart(yend) * gap);
            plot(fb, xpxl, ypxl + 1, color, fpart(yend) * gap);
        }
        (xpxl, yend)
    };

    let (xpxl1, yend1) = endpoint(x0, y0, rfpart(x0 + 0.5));
    let (xpxl2, _) = endpoint(x1, y1, fpart(x1 + 0.5));

    let mut intery = yend1 + gradient;
    for x in (xpxl1 + 1)..xpxl2 {
        let ipart = intery.floor() as i32;
        if steep {
            plot(fb, ipart, x, color, rfpart(intery));
            plot(fb, ipart + 1, x, color, fpart(intery));
        } else {
            plot(fb, x, ipart, color, rfpart(intery));
            plot(fb, x, ipart + 1, color, fpart(intery));
        }
        intery += gradient;
    }
}

/// Draw a line of the given pixel width.
///
/// Widths up to 1.5 use Wu's algorithm; wider lines are filled as a quad.
pub fn draw_thick_line(fb: &mut Framebuffer, from: Point, to: Point, width: f32, color: Rgba) {
    if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
        return;
    }
    if width <= 1.5 {
        draw_line_aa(fb, from, to, color);
        return;
    }

    let len = from.distance(to);
    if len < f32::EPSILON {
        draw_circle(fb, from.x as i32, from.y as i32, (width / 2.0) as i32, color);
        return;
    }
    let half = width / 2.0;
    let nx = -(to.y - from.y) / len * half;
    let ny = (to.x - from.x) / len * half;
    fill_polygon(
        fb,
        &[
            Point::new(from.x + nx, from.y + ny),
            Point::new(to.x + nx, to.y + ny),
            Point::new(to.x - nx, to.y - ny),
            Point::new(from.x - nx, from.y - ny),
        ],
        color,
    );
}

/// Draw a dashed line; `dash` is the on/off length in pixels.
pub fn draw_dashed_line(
    fb: &mut Framebuffer,
    from: Point,
    to: Point,
    width: f32,
    dash: f32,
    color: Rgba,
) {
    let len = from.distance(to);
    if len < f32::EPSILON || dash <= 0.0 {
        draw_thick_line(fb, from, to, width, color);
        return;
    }
    let ux = (to.x - from.x) / len;
    let uy = (to.y - from.y) / len;
    let mut start = 0.0;
    while start < len {
        let end = (start + dash).min(len);
        draw_thick_line(
            fb,
            Point::new(from.x + ux * start, from.y + uy * start),
            Point::new(from.x + ux * end, from.y + uy * end),
            width,
            color,
        );
        start += 2.0 * dash;
    }
}

#[inline]
fn plot(fb: &mut Framebuffer, x: i32, y: i32, color: Rgba, intensity: f32) {
    if x >= 0 && y >= 0 && x < fb.width() as i32 && y < fb.height() as i32 {
        let alpha = (f32::from(color.a) * intensity.clamp(0.0, 1.0)) as u8;
        fb.blend_pixel(x as u32, y as u32, color.with_alpha(alpha));
    }
}

#[inline]
fn fpart(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Draw a filled rectangle; negative origins are clipped.
pub fn draw_rect(fb: &mut Framebuffer, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
    let (x0, y0) = (x.round().max(0.0), y.round().max(0.0));
    let (x1, y1) = ((x + width).round().max(0.0), (y + height).round().max(0.0));
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    fb.fill_rect(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32, color);
}

/// Draw a rectangle outline with the given thickness.
pub fn draw_rect_outline(
    fb: &mut Framebuffer,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Rgba,
    thickness: f32,
) {
    let t = thickness.max(1.0);
    draw_rect(fb, x, y, width, t, color);
    draw_rect(fb, x, y + height - t, width, t, color);
    draw_rect(fb, x, y + t, t, height - 2.0 * t, color);
    draw_rect(fb, x + width - t, y + t, t, height - 2.0 * t, color);
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            fb.blend_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    // Spans are collected first so translucent fills do not overdraw rows.
    let mut spans = vec![i32::MIN; (2 * radius + 1) as usize];
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (dy, half) in [(y, x), (-y, x), (x, y), (-x, y)] {
            let slot = &mut spans[(dy + radius) as usize];
            *slot = (*slot).max(half);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }

    for (i, &half) in spans.iter().enumerate() {
        if half >= 0 {
            horizontal_span(fb, cx - half, cx + half, cy + i as i32 - radius, color);
        }
    }
}

#[inline]
fn horizontal_span(fb: &mut Framebuffer, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= fb.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).clamp(0, fb.width() as i32) as u32;

    if x_start < x_end {
        fb.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}

// ============================================================================
// Polygon Fill
// ============================================================================

/// Fill a simple polygon with the even-odd rule, sampling pixel centers.
pub fn fill_polygon(fb: &mut Framebuffer, points: &[Point], color: Rgba) {
    if points.len() < 3 || points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return;
    }

    let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let y_start = min_y.floor().max(0.0) as i32;
    let y_end = max_y.ceil().min(fb.height() as f32) as i32;

    let mut crossings = Vec::with_capacity(points.len());
    for y in y_start..y_end {
        let sample = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if (a.y <= sample && b.y > sample) || (b.y <= sample && a.y > sample) {
                let t = (sample - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        crossings.sort_by(f32::total_cmp);

        for pair in crossings.chunks_exact(2) {
            let x0 = (pair[0] - 0.5).ceil() as i32;
            let x1 = (pair[1] - 0.5).floor() as i32;
            if x1 >= x0 {
                horizontal_span(fb, x0, x1, y, color);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
