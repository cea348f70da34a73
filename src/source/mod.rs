//! Candle data source
//!
//! Historical OHLCV candles from an exchange REST API

mod binance;
mod types;

pub use binance::{BinanceClient, BinanceConfig, BINANCE_API_URL};
pub use types::{Candle, CandleSet, Interval};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for historical candle sources
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Fetch the complete candle history for a symbol.
    ///
    /// With no `end`, fetches everything from `start` up to now. Upstream
    /// rejections (bad symbol, auth, rate limiting) surface as errors; a
    /// partial download is never returned silently.
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> anyhow::Result<CandleSet>;
}
