//! End-to-end analysis pipeline tests on synthetic series

use lagcorr::corr::{
    best_lags, lagged_corr, most_common_lags, AnalysisError, LagSet, WindowCorrelator,
};
use lagcorr::report::{top_window_panels, FigureSink, HeatmapSpec, TextSink};
use lagcorr::series::TimeSeries;

/// A noisy-looking but deterministic oscillation
fn wave(n: usize, phase: f64) -> Vec<f64> {
    (0..n)
        .map(|i| (i as f64 * 0.7 + phase).sin() + (i as f64 * 0.13).cos() * 0.3)
        .collect()
}

/// b lags a by `delay` positions: b[i] = a[i - delay]
fn delayed(a: &[f64], delay: usize) -> Vec<f64> {
    (0..a.len())
        .map(|i| {
            if i >= delay {
                a[i - delay]
            } else {
                f64::NAN
            }
        })
        .collect()
}

#[test]
fn pipeline_recovers_known_delay() {
    let base = wave(400, 0.0);
    let a = TimeSeries::new("LEAD", base.clone());
    let b = TimeSeries::new("FOLLOW", delayed(&base, 3));

    let correlator = WindowCorrelator::new(LagSet::new(5, 1).unwrap());
    let matrix = correlator.rolling(&a, &b, 50, 25).unwrap();

    // a[i] pairs with b[i - lag]; b[i] = a[i - 3], so lag -3 aligns them
    let table = best_lags(&matrix, 0.95, true).unwrap();
    assert!(!table.is_empty());
    for window in &table.windows {
        assert_eq!(window.lags[0].lag, -3, "window {}", window.window_start);
        assert!(window.lags[0].corr > 0.99);
    }

    let counts = most_common_lags(&table);
    assert_eq!(counts[0].0, -3);
    assert_eq!(counts[0].1, table.len());
}

#[test]
fn identical_series_perfect_at_zero_lag() {
    // A = B = 1..=10, lags -2..=2, windows of 5 stepped by 5
    let values: Vec<f64> = (1..=10).map(f64::from).collect();
    let a = TimeSeries::new("A", values.clone());
    let b = TimeSeries::new("B", values);

    let correlator = WindowCorrelator::new(LagSet::new(2, 1).unwrap());
    let matrix = correlator.rolling(&a, &b, 5, 5).unwrap();
    assert_eq!(matrix.n_windows(), 2);

    let zero_col = matrix.lags.iter().position(|&l| l == 0).unwrap();
    for w in 0..matrix.n_windows() {
        assert!((matrix.cell(w, zero_col) - 1.0).abs() < 1e-12);
        for l in 0..matrix.n_lags() {
            let corr = matrix.cell(w, l);
            assert!(corr.is_nan() || (-1.0..=1.0).contains(&corr));
        }
    }
}

#[test]
fn extraction_respects_threshold_everywhere() {
    let a = TimeSeries::new("A", wave(300, 0.0));
    let b = TimeSeries::new("B", wave(300, 0.4));

    let correlator = WindowCorrelator::new(LagSet::new(10, 1).unwrap());
    let matrix = correlator.rolling(&a, &b, 40, 20).unwrap();

    let threshold = 0.6;
    let table = best_lags(&matrix, threshold, true).unwrap();
    for window in &table.windows {
        assert!(!window.lags.is_empty());
        for entry in &window.lags {
            assert!(entry.corr.abs() > threshold);
            assert_ne!(entry.lag, 0);
        }
        // Ranked descending by |corr|
        for pair in window.lags.windows(2) {
            assert!(pair[0].corr.abs() >= pair[1].corr.abs());
        }
    }

    let counts = most_common_lags(&table);
    let total: usize = counts.iter().map(|(_, c)| c).sum();
    assert_eq!(total, table.total_entries());
    for pair in counts.windows(2) {
        assert!(pair[0].1 >= pair[1].1);
    }
}

#[test]
fn zero_lag_only_matrix_extracts_nothing() {
    // Identical series: only the zero-lag column is reliably above a high
    // threshold once the waveform is non-linear
    let values = wave(200, 0.0);
    let a = TimeSeries::new("A", values.clone());
    let b = TimeSeries::new("B", values);

    let correlator = WindowCorrelator::new(LagSet::new(4, 1).unwrap());
    let matrix = correlator.rolling(&a, &b, 50, 25).unwrap();

    let zero_col = matrix.lags.iter().position(|&l| l == 0).unwrap();
    // Pick a threshold above every off-zero cell
    let max_off_zero = matrix
        .rows
        .iter()
        .flat_map(|row| {
            row.iter()
                .enumerate()
                .filter(|(l, _)| *l != zero_col)
                .map(|(_, c)| c.abs())
        })
        .filter(|c| !c.is_nan())
        .fold(0.0_f64, f64::max);
    let threshold = (max_off_zero + 0.001).min(0.999);

    let table = best_lags(&matrix, threshold, true).unwrap();
    assert!(table.is_empty());

    // The top-6 view then fails explicitly, not with an index panic
    assert_eq!(
        top_window_panels(&table, &a, &b, 50),
        Err(AnalysisError::EmptyExtraction)
    );
}

#[test]
fn split_and_rolling_agree_on_aligned_windows() {
    // 4 splits of a 200-long series == rolling windows of 50 stepped by 50
    let a = TimeSeries::new("A", wave(200, 0.0));
    let b = TimeSeries::new("B", wave(200, 1.1));
    let correlator = WindowCorrelator::new(LagSet::new(3, 1).unwrap());

    let split = correlator.split(&a, &b, 4).unwrap();
    let rolling = correlator.rolling(&a, &b, 50, 50).unwrap();

    assert_eq!(split.n_windows(), rolling.n_windows());
    for w in 0..split.n_windows() {
        for l in 0..split.n_lags() {
            let s = split.cell(w, l);
            let r = rolling.cell(w, l);
            assert!(
                (s.is_nan() && r.is_nan()) || (s - r).abs() < 1e-12,
                "mismatch at window {w} lag column {l}: {s} vs {r}"
            );
        }
    }
}

#[test]
fn full_report_renders() {
    let base = wave(500, 0.0);
    let a = TimeSeries::new("BTCUSDT", base.clone());
    let b = TimeSeries::new("ETHUSDT", delayed(&base, 2));

    let correlator = WindowCorrelator::new(LagSet::new(5, 1).unwrap());
    let matrix = correlator.rolling(&a, &b, 60, 30).unwrap();
    let table = best_lags(&matrix, 0.9, true).unwrap();

    let spec = HeatmapSpec::new(&matrix);
    let grid = top_window_panels(&table, &a, &b, 60).unwrap();
    assert_eq!(grid.panels.len(), 6);

    let mut sink = TextSink::new(matrix, Vec::new());
    sink.heatmap(&spec).unwrap();
    sink.overlay_grid(&grid).unwrap();

    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert!(output.contains("BTCUSDT"));
    assert!(output.contains("ETHUSDT"));
    assert!(output.contains("lag: -2"));
}

#[test]
fn lag_correlator_matches_hand_computation() {
    let a = vec![1.0, 2.0, 4.0, 3.0, 5.0];
    let b = vec![2.0, 1.0, 3.0, 4.0, 6.0];

    // Lag 1: pairs (a[1..5], b[0..4])
    let expected = {
        let xs = &a[1..];
        let ys = &b[..4];
        let mx: f64 = xs.iter().sum::<f64>() / 4.0;
        let my: f64 = ys.iter().sum::<f64>() / 4.0;
        let cov: f64 = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| (x - mx) * (y - my))
            .sum::<f64>();
        let vx: f64 = xs.iter().map(|x| (x - mx) * (x - mx)).sum::<f64>();
        let vy: f64 = ys.iter().map(|y| (y - my) * (y - my)).sum::<f64>();
        cov / (vx * vy).sqrt()
    };

    let actual = lagged_corr(&a, &b, 1).unwrap();
    assert!((actual - expected).abs() < 1e-12);
}
