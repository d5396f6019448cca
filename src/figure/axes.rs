//! A single plotting panel.

use crate::color::{Rgba, TAB10};
use crate::config::StyleConfig;
use crate::error::Result;
use crate::figure::artist::{union, Artist, Extent};
use crate::figure::ticks::{category_ticks, date_ticks, numeric_ticks, Tick};
use crate::figure::Transform;
use crate::geometry::{Insets, Point, Rect};
use crate::render::{Canvas, Stroke, TextAnchor, TextStyle};

/// How an axis interprets its coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AxisKind {
    /// Plain numbers.
    #[default]
    Numeric,
    /// Seconds since the Unix epoch, labelled as dates.
    DateTime,
    /// Named categories at positions `0, 1, 2, ...`.
    Categorical(Vec<String>),
}

/// Fraction of the data span added on each side of an axis.
const PADDING: f64 = 0.05;

/// A panel that records artists and renders them inside its grid cell.
#[derive(Debug, Clone)]
pub struct Axes {
    title: String,
    xlabel: String,
    ylabel: String,
    x_axis: AxisKind,
    y_axis: AxisKind,
    legend: bool,
    invert_y: bool,
    xlim: Option<(f64, f64)>,
    ylim: Option<(f64, f64)>,
    artists: Vec<Artist>,
    cycle: Vec<Rgba>,
    next_color: usize,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(TAB10.to_vec())
    }
}

impl Axes {
    /// Empty axes drawing successive series from `cycle`.
    #[must_use]
    pub fn new(cycle: Vec<Rgba>) -> Self {
        Self {
            title: String::new(),
            xlabel: String::new(),
            ylabel: String::new(),
            x_axis: AxisKind::Numeric,
            y_axis: AxisKind::Numeric,
            legend: false,
            invert_y: false,
            xlim: None,
            ylim: None,
            artists: Vec::new(),
            cycle,
            next_color: 0,
        }
    }

    /// Panel title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the panel title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// X axis label.
    #[must_use]
    pub fn xlabel(&self) -> &str {
        &self.xlabel
    }

    /// Set the x axis label; an empty string clears it.
    pub fn set_xlabel(&mut self, label: impl Into<String>) {
        self.xlabel = label.into();
    }

    /// Y axis label.
    #[must_use]
    pub fn ylabel(&self) -> &str {
        &self.ylabel
    }

    /// Set the y axis label; an empty string clears it.
    pub fn set_ylabel(&mut self, label: impl Into<String>) {
        self.ylabel = label.into();
    }

    /// X axis interpretation.
    #[must_use]
    pub fn x_axis(&self) -> &AxisKind {
        &self.x_axis
    }

    /// Set the x axis interpretation.
    pub fn set_x_axis(&mut self, kind: AxisKind) {
        self.x_axis = kind;
    }

    /// Y axis interpretation.
    #[must_use]
    pub fn y_axis(&self) -> &AxisKind {
        &self.y_axis
    }

    /// Set the y axis interpretation.
    pub fn set_y_axis(&mut self, kind: AxisKind) {
        self.y_axis = kind;
    }

    /// Whether the legend is drawn.
    #[must_use]
    pub fn has_legend(&self) -> bool {
        self.legend
    }

    /// Show or hide the legend of labelled artists.
    pub fn set_legend(&mut self, show: bool) {
        self.legend = show;
    }

    /// Whether y grows downwards.
    #[must_use]
    pub fn is_y_inverted(&self) -> bool {
        self.invert_y
    }

    /// Flip the y axis so the lowest value is at the top.
    pub fn set_invert_y(&mut self, invert: bool) {
        self.invert_y = invert;
    }

    /// Fix the x limits instead of fitting the data.
    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = Some((lo, hi));
    }

    /// Fix the y limits instead of fitting the data.
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = Some((lo, hi));
    }

    /// Recorded artists in drawing order.
    #[must_use]
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// Record an artist.
    pub fn add_artist(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    /// Take the next color of the cycle.
    pub fn next_color(&mut self) -> Rgba {
        let color = if self.cycle.is_empty() {
            TAB10[self.next_color % TAB10.len()]
        } else {
            self.cycle[self.next_color % self.cycle.len()]
        };
        self.next_color += 1;
        color
    }

    /// Labels and colors of labelled artists.
    #[must_use]
    pub fn legend_entries(&self) -> Vec<(&str, Rgba)> {
        self.artists.iter().filter_map(Artist::legend_entry).collect()
    }

    /// Data extent over every artist.
    #[must_use]
    pub fn data_extent(&self) -> Option<Extent> {
        self.artists.iter().fold(None, |acc, a| union(acc, a.extent()))
    }

    /// The x and y limits the panel renders with.
    #[must_use]
    pub fn limits(&self) -> ((f64, f64), (f64, f64)) {
        let ext = self.data_extent();
        let x = resolve_limits(self.xlim, &self.x_axis, ext.map(|e| (e.0, e.1)));
        let y = resolve_limits(self.ylim, &self.y_axis, ext.map(|e| (e.2, e.3)));
        (x, y)
    }

    /// Paint the panel inside `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ScaleDomain`] if the limits are degenerate.
    pub fn render(&self, canvas: &mut dyn Canvas, cell: Rect, style: &StyleConfig) -> Result<()> {
        let insets = Insets::new(
            style.title_size * 2.2,
            cell.width.min(20.0),
            style.tick_size + style.label_size * 2.5,
            style.tick_size * 5.0 + style.label_size * 2.0,
        );
        let area = cell.inset(insets);
        if area.width < 1.0 || area.height < 1.0 {
            tracing::warn!(width = cell.width, height = cell.height, "panel too small to render");
            return Ok(());
        }

        let (xlim, ylim) = self.limits();
        let transform = Transform::new(xlim, ylim, area, self.invert_y)?;
        tracing::trace!(artists = self.artists.len(), ?xlim, ?ylim, "rendering axes");

        for artist in &self.artists {
            artist.draw(canvas, &transform, style.foreground, style.tick_size);
        }

        let ink = Stroke::solid(style.foreground, 1.0);
        canvas.stroke_rect(area, ink);
        self.draw_ticks(canvas, &transform, style, xlim, ylim);

        let center = area.center();
        canvas.text(
            Point::new(center.x, area.y - style.title_size * 0.6),
            &self.title,
            TextStyle::new(style.title_size, style.foreground, TextAnchor::Middle),
        );
        canvas.text(
            Point::new(center.x, cell.bottom() - style.label_size * 0.5),
            &self.xlabel,
            TextStyle::new(style.label_size, style.foreground, TextAnchor::Middle),
        );
        canvas.text(
            Point::new(cell.x + style.label_size * 1.2, center.y),
            &self.ylabel,
            TextStyle::new(style.label_size, style.foreground, TextAnchor::Middle).rotated(90.0),
        );

        if self.legend {
            self.draw_legend(canvas, area, style);
        }
        Ok(())
    }

    fn draw_ticks(
        &self,
        canvas: &mut dyn Canvas,
        transform: &Transform,
        style: &StyleConfig,
        xlim: (f64, f64),
        ylim: (f64, f64),
    ) {
        let area = transform.area();
        let ink = Stroke::solid(style.foreground, 1.0);
        let label_style = |anchor| TextStyle::new(style.tick_size, style.foreground, anchor);

        for tick in axis_ticks(&self.x_axis, xlim, (area.width / 90.0).max(2.0) as usize) {
            let x = transform.x(tick.value);
            canvas.line(Point::new(x, area.bottom()), Point::new(x, area.bottom() + 4.0), ink);
            canvas.text(
                Point::new(x, area.bottom() + 6.0 + style.tick_size),
                &tick.label,
                label_style(TextAnchor::Middle),
            );
        }
        for tick in axis_ticks(&self.y_axis, ylim, (area.height / 50.0).max(2.0) as usize) {
            let y = transform.y(tick.value);
            canvas.line(Point::new(area.x - 4.0, y), Point::new(area.x, y), ink);
            canvas.text(
                Point::new(area.x - 6.0, y + style.tick_size * 0.35),
                &tick.label,
                label_style(TextAnchor::End),
            );
        }
    }

    fn draw_legend(&self, canvas: &mut dyn Canvas, area: Rect, style: &StyleConfig) {
        let entries = self.legend_entries();
        if entries.is_empty() {
            return;
        }
        let row = style.label_size * 1.5;
        let swatch = 20.0;
        let longest = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
        let width = swatch + 18.0 + longest as f32 * style.label_size * 0.6;
        let height = row * entries.len() as f32 + 8.0;
        let frame = Rect::new(area.right() - width - 8.0, area.y + 8.0, width, height);

        canvas.fill_rect(frame, style.background.with_alpha(220));
        canvas.stroke_rect(frame, Stroke::solid(Rgba::rgb(204, 204, 204), 1.0));
        for (i, (label, color)) in entries.into_iter().enumerate() {
            let y = frame.y + 4.0 + row * (i as f32 + 0.5);
            canvas.line(
                Point::new(frame.x + 6.0, y),
                Point::new(frame.x + 6.0 + swatch, y),
                Stroke::solid(color, style.line_width),
            );
            canvas.text(
                Point::new(frame.x + 12.0 + swatch, y + style.label_size * 0.35),
                label,
                TextStyle::new(style.label_size, style.foreground, TextAnchor::Start),
            );
        }
    }
}

fn axis_ticks(kind: &AxisKind, lim: (f64, f64), target: usize) -> Vec<Tick> {
    let (lo, hi) = (lim.0.min(lim.1), lim.0.max(lim.1));
    match kind {
        AxisKind::Numeric => numeric_ticks(lo, hi, target),
        AxisKind::DateTime => date_ticks(lo, hi, target),
        AxisKind::Categorical(labels) => category_ticks(labels),
    }
}

/// Explicit limits win; categories span their slots; data is padded.
fn resolve_limits(explicit: Option<(f64, f64)>, kind: &AxisKind, data: Option<(f64, f64)>) -> (f64, f64) {
    if let Some((lo, hi)) = explicit.filter(|(lo, hi)| lo.is_finite() && hi.is_finite() && lo != hi) {
        return (lo, hi);
    }
    if let AxisKind::Categorical(labels) = kind {
        return (-0.5, labels.len().max(1) as f64 - 0.5);
    }
    match data.filter(|(lo, hi)| lo.is_finite() && hi.is_finite()) {
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * PADDING;
            (lo - pad, hi + pad)
        }
        Some((v, _)) => {
            let pad = (v.abs() * PADDING).max(0.5);
            (v - pad, v + pad)
        }
        None => (0.0, 1.0),
    }
}
