//! Windowed time-lagged cross-correlation engine
//!
//! The pipeline: a [`LagSet`] defines the lags to test, the
//! [`WindowCorrelator`] slices two aligned series into windows and fills a
//! [`CorrelationMatrix`], [`best_lags`] extracts the lags above a threshold
//! per window, and [`most_common_lags`] tallies them across windows.

mod aggregate;
mod extract;
mod types;
mod window;

pub use aggregate::most_common_lags;
pub use extract::{best_lags, ExtractionTable};
pub use types::{AnalysisError, CorrelationMatrix, LagCorr, WindowLags, WindowMode};
pub use window::WindowCorrelator;

/// Ordered set of lags to evaluate, symmetric around zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagSet {
    values: Vec<i64>,
}

impl LagSet {
    /// Build the lag set `-lags_range..=lags_range` stepped by `lag_steps`
    pub fn new(lags_range: u32, lag_steps: u32) -> Result<Self, AnalysisError> {
        if lag_steps == 0 {
            return Err(AnalysisError::InvalidLagStep);
        }
        let values = (-(lags_range as i64)..=lags_range as i64)
            .step_by(lag_steps as usize)
            .collect();
        Ok(Self { values })
    }

    /// Lag values in order
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// Number of lags
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the set holds no lags
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Pearson correlation between `a` and `b` shifted by `lag` positions.
///
/// Shift semantics match a forward series shift: at lag `L`, `a[i]` pairs
/// with `b[i - L]`. Pairs where either operand is NaN or shifted out of
/// range are dropped. Returns NaN when fewer than 2 valid pairs remain or
/// either operand has zero variance over the overlap.
pub fn lagged_corr(a: &[f64], b: &[f64], lag: i64) -> Result<f64, AnalysisError> {
    if a.len() != b.len() {
        return Err(AnalysisError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let n = a.len() as i64;
    let mut xs = Vec::with_capacity(a.len());
    let mut ys = Vec::with_capacity(a.len());

    for i in 0..n {
        let j = i - lag;
        if j < 0 || j >= n {
            continue;
        }
        let x = a[i as usize];
        let y = b[j as usize];
        if x.is_nan() || y.is_nan() {
            continue;
        }
        xs.push(x);
        ys.push(y);
    }

    Ok(pearson(&xs, &ys))
}

/// Pearson correlation over already-paired observations.
///
/// NaN when fewer than 2 pairs or either side has zero variance.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}
