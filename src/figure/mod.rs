//! Figures: a pixel canvas holding a grid of panels.
//!
//! Panels are placed with matplotlib's `add_subplot(nrows, ncols, index)`
//! numbering, record artists through [`Axes`], and are painted on demand
//! through the [`Canvas`] seam into a raster [`Framebuffer`] or an SVG
//! document.

mod artist;
mod axes;
mod target;
mod ticks;
mod transform;

pub use artist::{Artist, Extent};
pub use axes::{AxisKind, Axes};
pub use target::{provision_axes, Target};
pub use ticks::{category_ticks, date_ticks, format_tick, nice_step, numeric_ticks, Tick};
pub use transform::Transform;

use crate::config::StyleConfig;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::{PngEncoder, SvgEncoder};
use crate::render::{Canvas, RasterCanvas};
use std::path::Path;

/// Handle of a panel inside its [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

impl AxesId {
    /// Position in creation order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridSpec {
    nrows: usize,
    ncols: usize,
    index: usize,
}

#[derive(Debug, Clone)]
struct Panel {
    grid: GridSpec,
    axes: Axes,
}

/// A figure of fixed pixel size with ordered panels.
#[derive(Debug, Clone)]
pub struct Figure {
    width: u32,
    height: u32,
    style: StyleConfig,
    panels: Vec<Panel>,
}

impl Figure {
    /// Empty figure with the default style.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_style(width, height, StyleConfig::default())
    }

    /// Empty figure with `style`.
    #[must_use]
    pub fn with_style(width: u32, height: u32, style: StyleConfig) -> Self {
        Self {
            width,
            height,
            style,
            panels: Vec::new(),
        }
    }

    /// Figure with one full-size panel.
    #[must_use]
    pub fn single(width: u32, height: u32, style: StyleConfig) -> Self {
        let mut figure = Self::with_style(width, height, style);
        figure.push_panel(GridSpec {
            nrows: 1,
            ncols: 1,
            index: 1,
        });
        figure
    }

    fn push_panel(&mut self, grid: GridSpec) -> AxesId {
        self.panels.push(Panel {
            grid,
            axes: Axes::new(self.style.color_cycle.clone()),
        });
        AxesId(self.panels.len() - 1)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Style used to render.
    #[must_use]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Number of panels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the figure has no panels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Add a panel in cell `index` (1-based, row-major) of an
    /// `nrows x ncols` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterType`] when the grid is empty or `index`
    /// is outside `1..=nrows * ncols`.
    pub fn add_subplot(&mut self, nrows: usize, ncols: usize, index: usize) -> Result<AxesId> {
        if nrows == 0 || ncols == 0 || index == 0 || index > nrows * ncols {
            return Err(Error::parameter(format!(
                "num must be an integer with 1 <= num <= {}, not {index}",
                nrows * ncols
            )));
        }
        Ok(self.push_panel(GridSpec { nrows, ncols, index }))
    }

    /// Panel by handle.
    #[must_use]
    pub fn axes(&self, id: AxesId) -> Option<&Axes> {
        self.panels.get(id.0).map(|p| &p.axes)
    }

    /// Mutable panel by handle.
    pub fn axes_mut(&mut self, id: AxesId) -> Option<&mut Axes> {
        self.panels.get_mut(id.0).map(|p| &mut p.axes)
    }

    /// Handles of all panels in creation order.
    pub fn ids(&self) -> impl Iterator<Item = AxesId> {
        (0..self.panels.len()).map(AxesId)
    }

    /// Panels in creation order.
    pub fn panels(&self) -> impl Iterator<Item = &Axes> {
        self.panels.iter().map(|p| &p.axes)
    }

    /// Pixel rectangle of a panel's grid cell.
    #[must_use]
    pub fn panel_rect(&self, id: AxesId) -> Option<Rect> {
        let grid = self.panels.get(id.0)?.grid;
        self.bounds().grid_cell(grid.nrows, grid.ncols, grid.index)
    }

    pub(crate) fn primary(&self) -> &Axes {
        &self.panels[0].axes
    }

    pub(crate) fn primary_mut(&mut self) -> &mut Axes {
        &mut self.panels[0].axes
    }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Paint background and every panel.
    ///
    /// # Errors
    ///
    /// Returns an error if a panel cannot be laid out.
    pub fn render(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.fill_rect(self.bounds(), self.style.background);
        for (i, panel) in self.panels.iter().enumerate() {
            if let Some(cell) = self.panel_rect(AxesId(i)) {
                panel.axes.render(canvas, cell, &self.style)?;
            }
        }
        Ok(())
    }

    /// Rasterize; text is not drawn on the raster surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a zero-sized figure.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        fb.clear(self.style.background);
        self.render(&mut RasterCanvas::new(&mut fb))?;
        Ok(fb)
    }

    /// Vector rendering with titles, labels and annotations.
    ///
    /// # Errors
    ///
    /// Returns an error if a panel cannot be laid out.
    pub fn to_svg(&self) -> Result<SvgEncoder> {
        let mut svg = SvgEncoder::new(self.width, self.height).background(None);
        self.render(&mut svg)?;
        Ok(svg)
    }

    /// Write a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering, encoding or writing fails.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        PngEncoder::write_to_file(&self.to_framebuffer()?, path)
    }

    /// Write an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.to_svg()?.write_to_file(path)
    }

    /// PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(&self.to_framebuffer()?)
    }

    /// PNG as a `data:image/png;base64,...` URI.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn to_data_uri(&self) -> Result<String> {
        PngEncoder::to_data_uri(&self.to_framebuffer()?)
    }
}

impl batuta_common::display::WithDimensions for Figure {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
