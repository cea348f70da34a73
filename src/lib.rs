//! lagcorr: windowed time-lagged cross-correlation analysis for crypto candles
//!
//! This library provides the components for:
//! - Historical candle download from the Binance REST API
//! - Pearson cross-correlation at a range of time lags
//! - Split and rolling window correlation matrices
//! - Threshold extraction and ranking of the strongest lags per window
//! - Lag frequency aggregation across windows
//! - Heatmap and top-window figure preparation with a pluggable sink

pub mod cli;
pub mod config;
pub mod corr;
pub mod report;
pub mod series;
pub mod source;
pub mod telemetry;
