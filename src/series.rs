//! Named numeric time series
//!
//! The analysis core works on plain `f64` sequences; NaN marks an
//! undefined observation and is pairwise-deleted by the correlator.

use rust_decimal::Decimal;

use crate::source::Candle;

/// An ordered sequence of observations with an identifying name
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    name: String,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from raw values
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a close-price series from candles.
    ///
    /// Decimal closes that do not fit an `f64` become NaN and fall out of
    /// the correlation via pairwise deletion.
    pub fn from_closes(name: impl Into<String>, candles: &[Candle]) -> Self {
        let values = candles.iter().map(|c| decimal_to_f64(c.close)).collect();
        Self::new(name, values)
    }

    /// Series name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Observations in order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A sub-range of the series with the window clamped to its bounds.
    ///
    /// `start` and `end` may lie outside `[0, len)`; the returned slice
    /// covers the overlap, empty when there is none.
    pub fn segment(&self, start: i64, end: i64) -> &[f64] {
        let n = self.values.len() as i64;
        let start = start.clamp(0, n) as usize;
        let end = end.clamp(0, n) as usize;
        if start >= end {
            return &[];
        }
        &self.values[start..end]
    }
}

fn decimal_to_f64(value: Decimal) -> f64 {
    f64::try_from(value).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_series() {
        let series = TimeSeries::new("BTCUSDT", vec![1.0, 2.0, 3.0]);
        assert_eq!(series.name(), "BTCUSDT");
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_segment_in_bounds() {
        let series = TimeSeries::new("A", vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.segment(1, 4), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_segment_clamped() {
        let series = TimeSeries::new("A", vec![0.0, 1.0, 2.0]);
        assert_eq!(series.segment(-2, 2), &[0.0, 1.0]);
        assert_eq!(series.segment(1, 99), &[1.0, 2.0]);
        assert!(series.segment(5, 9).is_empty());
        assert!(series.segment(2, 1).is_empty());
    }
}
