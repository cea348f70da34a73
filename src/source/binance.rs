//! Binance REST kline client
//!
//! Downloads historical candles from `/api/v3/klines`, paginating past the
//! per-request API limit by advancing the start time beyond the last
//! candle's close time.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{Candle, CandleSet, CandleSource, Interval};

/// Binance REST API base URL
pub const BINANCE_API_URL: &str = "https://api.binance.com";

/// Maximum candles per klines request allowed by the API
const KLINES_PAGE_LIMIT: u16 = 1000;

/// Configuration for the Binance client
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// Base URL for the REST API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Optional API key sent as X-MBX-APIKEY
    pub api_key: Option<String>,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            api_key: None,
        }
    }
}

/// Client for Binance's public klines endpoint
pub struct BinanceClient {
    config: BinanceConfig,
    client: Client,
}

impl BinanceClient {
    /// Create a new client with default configuration
    pub fn new() -> Self {
        Self::with_config(BinanceConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: BinanceConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Download the full candle history for several symbols.
    ///
    /// Each symbol's table is built independently and the results are
    /// collected once at the end; a failure for any symbol fails the whole
    /// download.
    pub async fn fetch_all(
        &self,
        symbols: &[String],
        interval: Interval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<CandleSet>> {
        let mut sets = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            tracing::info!(symbol = %symbol, %interval, "Downloading candle history");
            sets.push(self.fetch(symbol, interval, start, end).await?);
        }
        Ok(sets)
    }

    /// Fetch one page of klines starting at `start`
    async fn fetch_page(
        &self,
        symbol: &str,
        interval: Interval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Candle>> {
        let url = format!("{}/api/v3/klines", self.config.base_url);

        let mut query: Vec<(&str, String)> = vec![
            ("symbol", symbol.to_uppercase()),
            ("interval", interval.as_str().to_string()),
            ("startTime", start.timestamp_millis().to_string()),
            ("limit", KLINES_PAGE_LIMIT.to_string()),
        ];
        if let Some(end) = end {
            query.push(("endTime", end.timestamp_millis().to_string()));
        }

        let mut request = self.client.get(&url).query(&query);
        if let Some(ref key) = self.config.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Binance API error: {} - {}", status, body);
        }

        let raw: Vec<RawKline> = response.json().await?;
        raw.into_iter().map(Candle::try_from).collect()
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandleSource for BinanceClient {
    async fn fetch(
        &self,
        symbol: &str,
        interval: Interval,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> anyhow::Result<CandleSet> {
        let mut candles: Vec<Candle> = Vec::new();
        let mut cursor = start;

        loop {
            let page = self.fetch_page(symbol, interval, cursor, end).await?;
            if page.is_empty() {
                break;
            }

            let page_len = page.len();
            let last_close = page[page_len - 1].close_time;
            candles.extend(page);

            tracing::debug!(
                symbol = %symbol,
                fetched = candles.len(),
                "Fetched klines page"
            );

            if page_len < KLINES_PAGE_LIMIT as usize {
                break;
            }

            // Next page starts just past the last candle
            cursor = last_close + chrono::Duration::milliseconds(1);
            if let Some(end) = end {
                if cursor >= end {
                    break;
                }
            }
        }

        tracing::info!(symbol = %symbol, candles = candles.len(), "Candle download complete");

        Ok(CandleSet::new(symbol.to_uppercase(), interval, candles))
    }
}

/// Raw kline row as returned by the API: a heterogeneous JSON array of
/// timestamps, stringified decimals, and a trade count.
#[derive(Debug, Deserialize)]
struct RawKline(
    i64,    // open time (ms)
    String, // open
    String, // high
    String, // low
    String, // close
    String, // volume
    i64,    // close time (ms)
    String, // quote asset volume
    u64,    // number of trades
    String, // taker buy base volume
    String, // taker buy quote volume
    #[allow(dead_code)] serde_json::Value, // ignored trailing field
);

impl TryFrom<RawKline> for Candle {
    type Error = anyhow::Error;

    fn try_from(raw: RawKline) -> anyhow::Result<Self> {
        let open_time = Utc
            .timestamp_millis_opt(raw.0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Invalid kline open time: {}", raw.0))?;
        let close_time = Utc
            .timestamp_millis_opt(raw.6)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Invalid kline close time: {}", raw.6))?;

        Ok(Candle {
            open_time,
            open: parse_decimal(&raw.1, "open")?,
            high: parse_decimal(&raw.2, "high")?,
            low: parse_decimal(&raw.3, "low")?,
            close: parse_decimal(&raw.4, "close")?,
            volume: parse_decimal(&raw.5, "volume")?,
            close_time,
            quote_asset_volume: parse_decimal(&raw.7, "quote asset volume")?,
            num_trades: raw.8,
            taker_buy_base_volume: parse_decimal(&raw.9, "taker buy base volume")?,
            taker_buy_quote_volume: parse_decimal(&raw.10, "taker buy quote volume")?,
        })
    }
}

fn parse_decimal(s: &str, field: &str) -> anyhow::Result<Decimal> {
    Decimal::from_str(s).map_err(|e| anyhow::anyhow!("Invalid kline {}: {} - {}", field, s, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_kline() -> RawKline {
        serde_json::from_str(
            r#"[
                1704067200000,
                "42500.50",
                "42600.00",
                "42400.00",
                "42550.25",
                "123.456",
                1704067259999,
                "5250000.00",
                4321,
                "60.5",
                "2570000.00",
                "0"
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_binance_client_creation() {
        let client = BinanceClient::new();
        assert_eq!(client.config.base_url, BINANCE_API_URL);
        assert!(client.config.api_key.is_none());
    }

    #[test]
    fn test_parse_raw_kline() {
        let candle = Candle::try_from(raw_kline()).unwrap();
        assert_eq!(candle.open, dec!(42500.50));
        assert_eq!(candle.close, dec!(42550.25));
        assert_eq!(candle.num_trades, 4321);
        assert_eq!(candle.open_time.timestamp_millis(), 1704067200000);
        assert_eq!(candle.close_time.timestamp_millis(), 1704067259999);
    }

    #[test]
    fn test_parse_invalid_price() {
        let raw: RawKline = serde_json::from_str(
            r#"[
                1704067200000,
                "not_a_number",
                "1", "1", "1", "1",
                1704067259999,
                "1", 1, "1", "1", "0"
            ]"#,
        )
        .unwrap();
        assert!(Candle::try_from(raw).is_err());
    }

    #[test]
    fn test_parse_kline_array_shape_mismatch() {
        let result: Result<Vec<RawKline>, _> = serde_json::from_str(r#"[[1, 2, 3]]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_custom() {
        let config = BinanceConfig {
            base_url: "https://testnet.binance.vision".to_string(),
            timeout: Duration::from_secs(30),
            api_key: Some("key".to_string()),
        };
        let client = BinanceClient::with_config(config);
        assert_eq!(client.config.base_url, "https://testnet.binance.vision");
        assert_eq!(client.config.api_key.as_deref(), Some("key"));
    }
}
