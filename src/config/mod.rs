//! Configuration module - environment variable parsing

use std::env;
use std::time::Duration;

use crate::util::time::DEFAULT_TICK_RATE_MS;

/// Runtime configuration loaded from environment variables.
///
/// Everything here has a default; a variable that is set but malformed is
/// a hard error rather than a silent fallback.
#[derive(Clone, Debug)]
pub struct Config {
    /// Simulation tick period in milliseconds
    pub tick_rate_ms: u64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Seconds of launch countdown before the descent starts
    pub countdown_secs: u32,
    /// Final report rendering (text or json)
    pub report_format: ReportFormat,
}

/// How the final mission report is rendered on stdout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let tick_rate_ms = match env::var("TICK_RATE_MS") {
            Ok(raw) => parse_tick_rate(&raw)?,
            Err(_) => DEFAULT_TICK_RATE_MS,
        };

        let countdown_secs = match env::var("COUNTDOWN_SECS") {
            Ok(raw) => parse_countdown(&raw)?,
            Err(_) => 3,
        };

        let report_format = match env::var("REPORT_FORMAT") {
            Ok(raw) => parse_report_format(&raw)?,
            Err(_) => ReportFormat::Text,
        };

        Ok(Self {
            tick_rate_ms,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            countdown_secs,
            report_format,
        })
    }

    /// Tick period as a [`Duration`]
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

fn parse_tick_rate(raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .ok_or_else(|| ConfigError::Invalid("TICK_RATE_MS", raw.to_string()))
}

fn parse_countdown(raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>()
        .map_err(|_| ConfigError::Invalid("COUNTDOWN_SECS", raw.to_string()))
}

fn parse_report_format(raw: &str) -> Result<ReportFormat, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "text" => Ok(ReportFormat::Text),
        "json" => Ok(ReportFormat::Json),
        _ => Err(ConfigError::Invalid("REPORT_FORMAT", raw.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
