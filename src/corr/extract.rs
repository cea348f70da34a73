//! Threshold extractor
//!
//! Scans a correlation matrix and keeps, per window, the lags whose
//! absolute correlation exceeds a threshold, ranked strongest first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{AnalysisError, CorrelationMatrix, LagCorr, WindowLags};

/// Windows with at least one lag above threshold, in matrix row order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionTable {
    /// One record per qualifying window; windows with no qualifying lags
    /// are omitted entirely
    pub windows: Vec<WindowLags>,
}

impl ExtractionTable {
    /// Number of qualifying windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// True when no window qualified
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The first `n` qualifying windows, for views that need exactly `n`.
    ///
    /// Errors with [`AnalysisError::EmptyExtraction`] when nothing
    /// qualified at all, and [`AnalysisError::TooFewWindows`] when some
    /// windows qualified but fewer than `n`.
    pub fn top(&self, n: usize) -> Result<&[WindowLags], AnalysisError> {
        if self.windows.is_empty() {
            return Err(AnalysisError::EmptyExtraction);
        }
        if self.windows.len() < n {
            return Err(AnalysisError::TooFewWindows {
                required: n,
                available: self.windows.len(),
            });
        }
        Ok(&self.windows[..n])
    }

    /// Total number of extracted {lag, corr} entries across all windows
    pub fn total_entries(&self) -> usize {
        self.windows.iter().map(|w| w.lags.len()).sum()
    }
}

/// Extract the lags above `threshold` for every matrix row.
///
/// A cell qualifies when `|corr| > threshold` (strictly); NaN cells never
/// qualify. With `drop_zero_lag`, lag 0 entries are removed before a row is
/// considered. Each surviving row's lags are sorted descending by absolute
/// correlation. `threshold` must lie in (0, 1).
pub fn best_lags(
    matrix: &CorrelationMatrix,
    threshold: f64,
    drop_zero_lag: bool,
) -> Result<ExtractionTable, AnalysisError> {
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(AnalysisError::InvalidThreshold(threshold));
    }

    let mut windows = Vec::new();
    for (row, &label) in matrix.rows.iter().zip(matrix.window_labels.iter()) {
        let mut lags: Vec<LagCorr> = row
            .iter()
            .zip(matrix.lags.iter())
            .filter(|(corr, _)| corr.abs() > threshold)
            .map(|(&corr, &lag)| LagCorr { lag, corr })
            .collect();

        if drop_zero_lag {
            lags.retain(|lc| lc.lag != 0);
        }
        if lags.is_empty() {
            continue;
        }

        lags.sort_by(|x, y| {
            y.corr
                .abs()
                .partial_cmp(&x.corr.abs())
                .unwrap_or(Ordering::Equal)
        });

        windows.push(WindowLags {
            window_start: label,
            lags,
        });
    }

    Ok(ExtractionTable { windows })
}
