//! Analyze command implementation
//!
//! Loads two saved candle histories, builds the lagged correlation matrix,
//! renders the configured views, and prints the best-lag summary.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::config::{AnalysisMode, Config};
use crate::corr::{best_lags, most_common_lags, LagSet, WindowCorrelator};
use crate::report::{format_lag_table, top_window_panels, FigureSink, HeatmapSpec, TextSink};
use crate::series::TimeSeries;
use crate::source::CandleSet;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Candle JSON file of the first series
    pub left: PathBuf,

    /// Candle JSON file of the second series
    pub right: PathBuf,

    /// Override the configured correlation threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let left = CandleSet::load(&self.left)
            .with_context(|| format!("Could not load candles from {:?}", self.left))?;
        let right = CandleSet::load(&self.right)
            .with_context(|| format!("Could not load candles from {:?}", self.right))?;

        let a = TimeSeries::from_closes(left.symbol.clone(), &left.candles);
        let b = TimeSeries::from_closes(right.symbol.clone(), &right.candles);

        tracing::info!(
            left = %a.name(),
            right = %b.name(),
            observations = a.len(),
            "Running lagged cross-correlation analysis"
        );

        let analysis = &config.analysis;
        let lag_set = LagSet::new(analysis.lags_range, analysis.lag_steps)?;
        let correlator = WindowCorrelator::new(lag_set);

        let matrix = match analysis.mode {
            AnalysisMode::Split => correlator.split(&a, &b, analysis.splits)?,
            AnalysisMode::Rolling => {
                correlator.rolling(&a, &b, analysis.window_size, analysis.step_size)?
            }
        };

        let threshold = self.threshold.unwrap_or(analysis.threshold);
        let table = best_lags(&matrix, threshold, analysis.drop_zero_lag)?;
        let counts = most_common_lags(&table);

        tracing::info!(
            windows = matrix.n_windows(),
            qualifying = table.len(),
            threshold,
            "Extraction complete"
        );

        let spec = HeatmapSpec::new(&matrix);
        let mut sink = TextSink::new(matrix, std::io::stdout().lock());

        if config.report.heatmap {
            sink.heatmap(&spec)?;
        }

        if config.report.top_windows {
            // Panel slicing needs window start offsets for row labels, which
            // only rolling mode carries; split rows are labeled by index.
            match analysis.mode {
                AnalysisMode::Rolling => {
                    let grid = top_window_panels(&table, &a, &b, analysis.window_size)?;
                    sink.overlay_grid(&grid)?;
                }
                AnalysisMode::Split => {
                    tracing::warn!("Top-windows view requires rolling mode, skipping");
                }
            }
        }

        println!("{}", format_lag_table(&counts));

        Ok(())
    }
}
