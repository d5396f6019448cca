//! Geometric primitives for figure layout.
//!
//! Panels are placed on a figure as [`Rect`]s in pixel space; the plotting area
//! of a panel is its rect minus the margins reserved for ticks and the title.

/// A 2D point with floating-point pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate the distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Margins around a plotting area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    /// Space above (title).
    pub top: f32,
    /// Space to the right.
    pub right: f32,
    /// Space below (x tick labels).
    pub bottom: f32,
    /// Space to the left (y tick labels).
    pub left: f32,
}

impl Insets {
    /// Create insets from the four sides.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// A rectangle defined by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by the given insets; sizes never go negative.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> Self {
        Self::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0.0),
            (self.height - insets.top - insets.bottom).max(0.0),
        )
    }

    /// The cell of a `nrows x ncols` grid laid over this rectangle.
    ///
    /// `index` is 1-based and runs row by row, the same numbering as
    /// `add_subplot(nrows, ncols, index)`. Returns `None` when out of range.
    #[must_use]
    pub fn grid_cell(&self, nrows: usize, ncols: usize, index: usize) -> Option<Self> {
        if nrows == 0 || ncols == 0 || index == 0 || index > nrows * ncols {
            return None;
        }
        let row = (index - 1) / ncols;
        let col = (index - 1) % ncols;
        let cell_w = self.width / ncols as f32;
        let cell_h = self.height / nrows as f32;
        Some(Self::new(
            self.x + col as f32 * cell_w,
            self.y + row as f32 * cell_h,
            cell_w,
            cell_h,
        ))
    }
}
