//! Multi-series charts.

use super::Explorer;
use crate::error::Result;
use crate::figure::{Artist, AxisKind, Axes, Target};
use crate::plots::HeatmapCells;
use crate::scale::ColorMap;
use crate::stats::{correlation_matrix, CorrelationMethod};
use crate::table::Table;

impl Explorer {
    /// Annotated heatmap of the pairwise correlation of the table's columns.
    ///
    /// Row 0 is drawn at the top and column names label both axes. Cells
    /// with fewer than `min_periods` overlapping observations, or involving a
    /// constant column, stay blank.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ParameterType`] for a table without rows.
    pub fn plot_corr_heatmap<'a>(
        &self,
        table: &Table,
        ax: Option<&'a mut Axes>,
        method: CorrelationMethod,
        min_periods: usize,
        color_map: ColorMap,
    ) -> Result<Target<'a>> {
        let matrix = correlation_matrix(table, method, min_periods)?;
        let cells = HeatmapCells::new(matrix.values.clone(), color_map)?;
        tracing::debug!(
            columns = table.ncols(),
            rows = table.nrows(),
            %method,
            %color_map,
            "plot_corr_heatmap"
        );

        let mut target = self.provision(ax);
        target.add_artist(Artist::Heatmap(cells));
        target.set_x_axis(AxisKind::Categorical(matrix.names.clone()));
        target.set_y_axis(AxisKind::Categorical(matrix.names));
        target.set_invert_y(true);
        Ok(target)
    }

    /// [`Explorer::plot_corr_heatmap`] with Pearson correlation,
    /// `min_periods` from the configuration and its heatmap palette.
    ///
    /// # Errors
    ///
    /// As [`Explorer::plot_corr_heatmap`].
    pub fn plot_corr_heatmap_default<'a>(&self, table: &Table, ax: Option<&'a mut Axes>) -> Result<Target<'a>> {
        let analysis = &self.config.analysis;
        self.plot_corr_heatmap(
            table,
            ax,
            CorrelationMethod::default(),
            analysis.min_periods,
            analysis.heatmap_color_map,
        )
    }
}
