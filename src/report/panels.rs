//! Top-window overlay panels
//!
//! For the strongest-correlated windows, overlays the lag-shifted segment
//! of one series on the matching segment of the other, both de-meaned, in
//! a fixed 2x3 grid.

use crate::corr::{AnalysisError, ExtractionTable};
use crate::series::TimeSeries;

/// Grid rows in the top-windows view
pub const PANEL_ROWS: usize = 2;
/// Grid columns in the top-windows view
pub const PANEL_COLS: usize = 3;

/// One overlay panel: two de-meaned series segments for a window
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayPanel {
    /// Window start offset
    pub window_start: usize,
    /// Lag of the strongest correlation in the window
    pub lag: i64,
    /// The strongest correlation value
    pub corr: f64,
    /// Panel title: window start, lag, correlation rounded to 2 places
    pub title: String,
    /// Name of the lag-shifted series
    pub name_a: String,
    /// Name of the unshifted series
    pub name_b: String,
    /// De-meaned segment of series A, shifted by the lag
    pub segment_a: Vec<f64>,
    /// De-meaned segment of series B at the window
    pub segment_b: Vec<f64>,
}

/// A fixed grid of overlay panels
#[derive(Debug, Clone, PartialEq)]
pub struct PanelGrid {
    /// Grid height
    pub rows: usize,
    /// Grid width
    pub cols: usize,
    /// Panels in row-major order, exactly `rows * cols` of them
    pub panels: Vec<OverlayPanel>,
}

/// Build the 2x3 top-windows grid from an extraction table.
///
/// Takes the first six qualifying windows and each window's strongest lag.
/// Fewer than six qualifying windows is a [`AnalysisError::TooFewWindows`]
/// error (or [`AnalysisError::EmptyExtraction`] when none qualified);
/// callers get a typed failure instead of an out-of-bounds panic.
pub fn top_window_panels(
    table: &ExtractionTable,
    a: &TimeSeries,
    b: &TimeSeries,
    window_size: usize,
) -> Result<PanelGrid, AnalysisError> {
    let count = PANEL_ROWS * PANEL_COLS;
    let top = table.top(count)?;

    let mut panels = Vec::with_capacity(count);
    for window in top {
        // top() guarantees non-empty rows; rows are sorted strongest first
        let best = window.lags[0];
        let start = window.window_start as i64;

        let segment_a = demean(a.segment(start + best.lag, start + window_size as i64 + best.lag));
        let segment_b = demean(b.segment(start, start + window_size as i64));

        panels.push(OverlayPanel {
            window_start: window.window_start,
            lag: best.lag,
            corr: best.corr,
            title: format!(
                "Window: {} lag: {} corr: {:.2}",
                window.window_start, best.lag, best.corr
            ),
            name_a: a.name().to_string(),
            name_b: b.name().to_string(),
            segment_a,
            segment_b,
        });
    }

    Ok(PanelGrid {
        rows: PANEL_ROWS,
        cols: PANEL_COLS,
        panels,
    })
}

/// Subtract the mean from a segment; NaN values are ignored in the mean
fn demean(segment: &[f64]) -> Vec<f64> {
    let defined: Vec<f64> = segment.iter().copied().filter(|v| !v.is_nan()).collect();
    if defined.is_empty() {
        return segment.to_vec();
    }
    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    segment.iter().map(|v| v - mean).collect()
}
