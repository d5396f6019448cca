//! Composite artists with their own statistics and drawing.
//!
//! Simple marks (lines, markers, stems, bands, bars) are plain
//! [`crate::figure::Artist`] variants; the types here carry enough structure
//! to need a module of their own.

mod heatmap;
mod violin;

pub use heatmap::HeatmapCells;
pub use violin::{BoxStats, Violin};
