//! CLI interface for lagcorr
//!
//! Provides subcommands for:
//! - `fetch`: Download candle history for one or more symbols
//! - `analyze`: Run the windowed lagged cross-correlation analysis
//! - `config`: Show the effective configuration

mod analyze;
mod fetch;

pub use analyze::AnalyzeArgs;
pub use fetch::FetchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lagcorr")]
#[command(about = "Windowed time-lagged cross-correlation analysis for crypto candle data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Log level when RUST_LOG is not set
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download candle history to JSON files
    Fetch(FetchArgs),
    /// Run the lagged cross-correlation analysis on two saved histories
    Analyze(AnalyzeArgs),
    /// Show the effective configuration
    Config,
}
