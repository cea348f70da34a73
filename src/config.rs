//! Configuration types for lagcorr

use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Candle source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Exchange REST base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the API key, if one is used
    #[serde(default)]
    pub api_key_env: Option<String>,
}

fn default_base_url() -> String {
    crate::source::BINANCE_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 10,
            api_key_env: None,
        }
    }
}

/// Windowing mode selector
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Fixed number of contiguous splits
    Split,
    /// Sliding window with fixed size and step
    #[default]
    Rolling,
}

/// Correlation analysis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Lags tested from -lags_range to +lags_range
    #[serde(default = "default_lags_range")]
    pub lags_range: u32,

    /// Step between tested lags
    #[serde(default = "default_lag_steps")]
    pub lag_steps: u32,

    /// Windowing mode
    #[serde(default)]
    pub mode: AnalysisMode,

    /// Number of splits in split mode
    #[serde(default = "default_splits")]
    pub splits: usize,

    /// Window size in rolling mode
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Window step in rolling mode
    #[serde(default = "default_step_size")]
    pub step_size: usize,

    /// Minimum absolute correlation for a lag to qualify
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Exclude lag 0 from extraction
    #[serde(default = "default_true")]
    pub drop_zero_lag: bool,
}

fn default_lags_range() -> u32 {
    30
}
fn default_lag_steps() -> u32 {
    1
}
fn default_splits() -> usize {
    10
}
fn default_window_size() -> usize {
    300
}
fn default_step_size() -> usize {
    30
}
fn default_threshold() -> f64 {
    0.95
}
fn default_true() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            lags_range: 30,
            lag_steps: 1,
            mode: AnalysisMode::Rolling,
            splits: 10,
            window_size: 300,
            step_size: 30,
            threshold: 0.95,
            drop_zero_lag: true,
        }
    }
}

/// Report configuration: which views to render
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Render the correlation heatmap
    #[serde(default = "default_true")]
    pub heatmap: bool,

    /// Render the top-windows overlay grid
    #[serde(default = "default_true")]
    pub top_windows: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            heatmap: true,
            top_windows: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
