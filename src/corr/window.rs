//! Window slicer
//!
//! Partitions two aligned series into windows and computes one row of
//! lagged cross-correlations per window.
//!
//! Boundary conventions:
//! - Split mode: window `t` of `K` spans `[t*N/K, (t+1)*N/K)` with integer
//!   floor division. The K ranges cover `[0, N)` exactly, without overlap.
//! - Rolling mode: windows start at offset 0 and advance by `step_size`
//!   while `offset + window_size <= N`. The final partial window is not
//!   included.

use super::types::{AnalysisError, CorrelationMatrix, WindowMode};
use super::{lagged_corr, LagSet};
use crate::series::TimeSeries;

/// Computes lagged cross-correlation matrices over windowed series pairs
pub struct WindowCorrelator {
    lag_set: LagSet,
}

impl WindowCorrelator {
    /// Create a correlator evaluating the given lag set per window
    pub fn new(lag_set: LagSet) -> Self {
        Self { lag_set }
    }

    /// The lag set evaluated per window
    pub fn lag_set(&self) -> &LagSet {
        &self.lag_set
    }

    /// Split-mode matrix: `splits` contiguous equal windows over the series
    ///
    /// Row labels are split indices `0..splits`.
    pub fn split(
        &self,
        a: &TimeSeries,
        b: &TimeSeries,
        splits: usize,
    ) -> Result<CorrelationMatrix, AnalysisError> {
        check_aligned(a, b)?;
        if splits == 0 {
            return Err(AnalysisError::InvalidWindow("split count is zero".into()));
        }

        let n = a.len();
        let mut window_labels = Vec::with_capacity(splits);
        let mut rows = Vec::with_capacity(splits);

        for t in 0..splits {
            let start = t * n / splits;
            let end = (t + 1) * n / splits;
            rows.push(self.window_row(&a.values()[start..end], &b.values()[start..end])?);
            window_labels.push(t);
        }

        Ok(CorrelationMatrix {
            series_a: a.name().to_string(),
            series_b: b.name().to_string(),
            mode: WindowMode::Split { splits },
            window_labels,
            lags: self.lag_set.values().to_vec(),
            rows,
        })
    }

    /// Rolling-mode matrix: fixed `window_size` advanced by `step_size`
    ///
    /// Row labels are window start offsets. Produces
    /// `floor((N - W) / S) + 1` rows, zero when the series is shorter than
    /// the window.
    pub fn rolling(
        &self,
        a: &TimeSeries,
        b: &TimeSeries,
        window_size: usize,
        step_size: usize,
    ) -> Result<CorrelationMatrix, AnalysisError> {
        check_aligned(a, b)?;
        if window_size == 0 {
            return Err(AnalysisError::InvalidWindow("window size is zero".into()));
        }
        if step_size == 0 {
            return Err(AnalysisError::InvalidWindow("step size is zero".into()));
        }

        let n = a.len();
        let mut window_labels = Vec::new();
        let mut rows = Vec::new();

        let mut start = 0;
        while start + window_size <= n {
            let end = start + window_size;
            rows.push(self.window_row(&a.values()[start..end], &b.values()[start..end])?);
            window_labels.push(start);
            start += step_size;
        }

        Ok(CorrelationMatrix {
            series_a: a.name().to_string(),
            series_b: b.name().to_string(),
            mode: WindowMode::Rolling {
                window_size,
                step_size,
            },
            window_labels,
            lags: self.lag_set.values().to_vec(),
            rows,
        })
    }

    /// One matrix row: the lag correlator at every lag over a window pair
    fn window_row(&self, a: &[f64], b: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        self.lag_set
            .values()
            .iter()
            .map(|&lag| lagged_corr(a, b, lag))
            .collect()
    }
}

fn check_aligned(a: &TimeSeries, b: &TimeSeries) -> Result<(), AnalysisError> {
    if a.len() != b.len() {
        return Err(AnalysisError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}
