//! Service configuration from the environment.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use pantry_ai::{ComposerConfig, DEFAULT_BATCH_SIZE, DEFAULT_CALL_TIMEOUT};
use pantry_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the text-generation backend; `None` disables generation.
    pub textgen_url: Option<String>,
    pub textgen_timeout: Duration,
    pub outreach_batch: usize,
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Read `PANTRY_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank means default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = get("PANTRY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| ConfigError::invalid("PANTRY_BIND_ADDR", &bind_raw, e))?;

        let textgen_timeout = match get("PANTRY_TEXTGEN_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => return Err(ConfigError::invalid("PANTRY_TEXTGEN_TIMEOUT_MS", &raw, "must be positive")),
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => return Err(ConfigError::invalid("PANTRY_TEXTGEN_TIMEOUT_MS", &raw, e)),
            },
            None => DEFAULT_CALL_TIMEOUT,
        };

        let outreach_batch = match get("PANTRY_OUTREACH_BATCH") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => return Err(ConfigError::invalid("PANTRY_OUTREACH_BATCH", &raw, "must be positive")),
                Ok(n) => n,
                Err(e) => return Err(ConfigError::invalid("PANTRY_OUTREACH_BATCH", &raw, e)),
            },
            None => DEFAULT_BATCH_SIZE,
        };

        let log_format = match get("PANTRY_LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("PANTRY_LOG_FORMAT", &raw, e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            textgen_url: get("PANTRY_TEXTGEN_URL"),
            textgen_timeout,
            outreach_batch,
            log_format,
        })
    }

    pub fn composer(&self) -> ComposerConfig {
        ComposerConfig {
            batch_size: self.outreach_batch,
            call_timeout: self.textgen_timeout,
        }
    }
}
