//! Report module
//!
//! Presentation layer for the correlation analysis. The core hands a
//! [`HeatmapSpec`] or [`PanelGrid`] to a [`FigureSink`]; the sink decides
//! how to render it. [`TextSink`] renders to any `io::Write` for CLI use.

mod heatmap;
mod panels;
mod text;

pub use heatmap::HeatmapSpec;
pub use panels::{top_window_panels, OverlayPanel, PanelGrid, PANEL_COLS, PANEL_ROWS};
pub use text::{format_lag_table, TextSink};

/// Sink consuming prepared figures
///
/// Implementations render a figure however they see fit; the core consumes
/// no return value beyond success or failure.
pub trait FigureSink {
    /// Render a windowed-correlation heatmap
    fn heatmap(&mut self, spec: &HeatmapSpec) -> anyhow::Result<()>;

    /// Render the top-windows overlay grid
    fn overlay_grid(&mut self, grid: &PanelGrid) -> anyhow::Result<()>;
}
