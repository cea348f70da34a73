//! Lag aggregator
//!
//! Tallies how often each lag value appears across all extracted windows.

use super::extract::ExtractionTable;

/// Count lag occurrences across every window of the extraction table.
///
/// Returns `(lag, count)` pairs sorted descending by count. Ties keep the
/// order in which the lags were first seen while iterating the table.
pub fn most_common_lags(table: &ExtractionTable) -> Vec<(i64, usize)> {
    let mut counts: Vec<(i64, usize)> = Vec::new();

    for window in &table.windows {
        for entry in &window.lags {
            match counts.iter_mut().find(|(lag, _)| *lag == entry.lag) {
                Some((_, count)) => *count += 1,
                None => counts.push((entry.lag, 1)),
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corr::{LagCorr, WindowLags};

    fn window(start: usize, lags: &[i64]) -> WindowLags {
        WindowLags {
            window_start: start,
            lags: lags.iter().map(|&lag| LagCorr { lag, corr: 0.99 }).collect(),
        }
    }

    #[test]
    fn test_counts_and_order() {
        let table = ExtractionTable {
            windows: vec![
                window(0, &[5, -3]),
                window(30, &[5, 2]),
                window(60, &[5, -3]),
            ],
        };

        let counts = most_common_lags(&table);
        assert_eq!(counts, vec![(5, 3), (-3, 2), (2, 1)]);
    }

    #[test]
    fn test_counts_sum_to_total_entries() {
        let table = ExtractionTable {
            windows: vec![window(0, &[1, 2, 3]), window(10, &[2, 3]), window(20, &[3])],
        };

        let counts = most_common_lags(&table);
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, table.total_entries());
    }

    #[test]
    fn test_stable_tie_break() {
        // 7 and -7 both appear twice; 7 was seen first and stays first
        let table = ExtractionTable {
            windows: vec![window(0, &[7, -7]), window(10, &[7, -7])],
        };

        let counts = most_common_lags(&table);
        assert_eq!(counts, vec![(7, 2), (-7, 2)]);
    }

    #[test]
    fn test_empty_table() {
        let table = ExtractionTable::default();
        assert!(most_common_lags(&table).is_empty());
    }
}
