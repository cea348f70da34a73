//! Correlation analysis types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis errors
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Two series of unequal length passed to the correlator
    #[error("Series length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// Correlation threshold outside (0, 1)
    #[error("Threshold must lie in (0, 1), got {0}")]
    InvalidThreshold(f64),
    /// Lag step of zero
    #[error("Lag step must be positive")]
    InvalidLagStep,
    /// Zero split count, window size, or step size
    #[error("Invalid window parameters: {0}")]
    InvalidWindow(String),
    /// Threshold yielded no qualifying windows at all
    #[error("No window produced a correlation above the threshold")]
    EmptyExtraction,
    /// Fewer qualifying windows than the requested view needs
    #[error("Top-window view needs {required} qualifying windows, only {available} available")]
    TooFewWindows { required: usize, available: usize },
}

/// How the series was partitioned into windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// K contiguous equal splits of the full series
    Split { splits: usize },
    /// Fixed-size window advanced by a fixed step
    Rolling { window_size: usize, step_size: usize },
}

/// Matrix of lagged cross-correlations
///
/// Rows are windows in ascending start order, columns follow the lag set.
/// A cell is NaN when the correlation is undefined for that window/lag
/// (zero variance or fewer than 2 overlapping observations).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    /// Name of the unshifted series
    pub series_a: String,
    /// Name of the lag-shifted series
    pub series_b: String,
    /// Windowing used to produce the rows
    pub mode: WindowMode,
    /// Row labels: split index in split mode, window start offset in rolling mode
    pub window_labels: Vec<usize>,
    /// Lag value for each column
    pub lags: Vec<i64>,
    /// Correlation values, one row per window
    pub rows: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of window rows
    pub fn n_windows(&self) -> usize {
        self.rows.len()
    }

    /// Number of lag columns
    pub fn n_lags(&self) -> usize {
        self.lags.len()
    }

    /// Correlation at window row `w`, lag column `l`
    pub fn cell(&self, w: usize, l: usize) -> f64 {
        self.rows[w][l]
    }
}

/// A single lag/correlation pair extracted from a window row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LagCorr {
    /// Lag in sequence positions
    pub lag: i64,
    /// Pearson correlation at that lag
    pub corr: f64,
}

/// Lags above threshold for one window, strongest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowLags {
    /// Row label of the window (split index or start offset)
    pub window_start: usize,
    /// Qualifying lags sorted descending by |corr|
    pub lags: Vec<LagCorr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_dimensions() {
        let matrix = CorrelationMatrix {
            series_a: "BTCUSDT".to_string(),
            series_b: "ETHUSDT".to_string(),
            mode: WindowMode::Split { splits: 2 },
            window_labels: vec![0, 1],
            lags: vec![-1, 0, 1],
            rows: vec![vec![0.1, 1.0, 0.2], vec![0.3, 0.9, 0.4]],
        };

        assert_eq!(matrix.n_windows(), 2);
        assert_eq!(matrix.n_lags(), 3);
        assert_eq!(matrix.cell(1, 1), 0.9);
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::LengthMismatch { left: 10, right: 8 };
        assert_eq!(err.to_string(), "Series length mismatch: 10 vs 8");

        let err = AnalysisError::TooFewWindows {
            required: 6,
            available: 2,
        };
        assert!(err.to_string().contains("needs 6"));
    }
}
