//! Heatmap figure preparation
//!
//! Turns a correlation matrix into a renderable heatmap spec: title, axis
//! labels, and the x-axis ticks subsampled to roughly 8 evenly spaced lag
//! labels.

use crate::corr::{CorrelationMatrix, WindowMode};

/// Target number of x-axis tick labels
const TICK_TARGET: usize = 8;

/// A prepared heatmap figure
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapSpec {
    /// Figure title naming both series and the analysis mode
    pub title: String,
    /// X-axis label
    pub x_label: String,
    /// Y-axis label
    pub y_label: String,
    /// Column indices carrying a tick label
    pub tick_positions: Vec<usize>,
    /// Lag value shown at each tick position
    pub tick_labels: Vec<i64>,
}

impl HeatmapSpec {
    /// Prepare the heatmap spec for a correlation matrix
    pub fn new(matrix: &CorrelationMatrix) -> Self {
        let title = match matrix.mode {
            WindowMode::Split { .. } => format!(
                "Windowed Time Lagged Cross Correlation between {} and {}",
                matrix.series_a, matrix.series_b
            ),
            WindowMode::Rolling { .. } => format!(
                "Rolling Windowed Time Lagged Cross Correlation between {} and {}",
                matrix.series_a, matrix.series_b
            ),
        };

        // Every step-th lag gets a tick; a short lag set keeps them all
        let step = (matrix.n_lags() / TICK_TARGET).max(1);
        let tick_positions: Vec<usize> = (0..matrix.n_lags()).step_by(step).collect();
        let tick_labels: Vec<i64> = tick_positions.iter().map(|&i| matrix.lags[i]).collect();

        Self {
            title,
            x_label: "Offset".to_string(),
            y_label: "Window".to_string(),
            tick_positions,
            tick_labels,
        }
    }
}
