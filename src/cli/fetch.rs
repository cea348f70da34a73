//! Fetch command implementation

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use crate::config::Config;
use crate::source::{BinanceClient, BinanceConfig, Interval};

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Symbols to download (e.g. BTCUSDT ETHUSDT)
    #[arg(required = true)]
    pub symbols: Vec<String>,

    /// First day to download, UTC (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// Last day to download, UTC; everything up to now when omitted
    #[arg(short, long)]
    pub end: Option<String>,

    /// Candle interval (1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w, 1M)
    #[arg(short, long, default_value = "1m")]
    pub interval: String,

    /// Output directory for candle JSON files
    #[arg(short, long, default_value = "./data")]
    pub output: PathBuf,
}

impl FetchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let interval: Interval = self.interval.parse()?;
        let start = parse_day(&self.start)?;
        let end = self.end.as_deref().map(parse_day).transpose()?;

        let api_key = config
            .source
            .api_key_env
            .as_ref()
            .and_then(|var| std::env::var(var).ok());

        let client = BinanceClient::with_config(BinanceConfig {
            base_url: config.source.base_url.clone(),
            timeout: Duration::from_secs(config.source.timeout_secs),
            api_key,
        });

        std::fs::create_dir_all(&self.output)
            .with_context(|| format!("Could not create output dir {:?}", self.output))?;

        // Each symbol's table is fetched independently, written once
        let sets = client.fetch_all(&self.symbols, interval, start, end).await?;
        for set in &sets {
            let path = self
                .output
                .join(format!("{}_{}.json", set.symbol, set.interval));
            set.save(&path)?;
            tracing::info!(symbol = %set.symbol, candles = set.len(), path = %path.display(), "Saved candle history");
        }

        Ok(())
    }
}

/// Parse a YYYY-MM-DD day string as UTC midnight
fn parse_day(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let day: NaiveDate = s
        .parse()
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {}", s))?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid date: {}", s))?;
    Ok(midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day() {
        let dt = parse_day("2024-01-15").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_day_invalid() {
        assert!(parse_day("15-01-2024").is_err());
        assert!(parse_day("not a date").is_err());
    }
}
