use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::utils::error::{ConfigError, KcResult};

pub const DEFAULT_TRACE_URL: &str = "https://1.1.1.1/cdn-cgi/trace";
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 100;

/// Tool configuration, optionally loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToolConfig {
    pub trace_url: String,
    pub request_timeout_secs: Option<u64>,
    pub refresh_interval_ms: u64,
    pub color: ColorChoice,
}

/// When to decorate output with ANSI colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            trace_url: DEFAULT_TRACE_URL.to_string(),
            request_timeout_secs: None,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            color: ColorChoice::Auto,
        }
    }
}

impl ToolConfig {
    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load(path: Option<&Path>) -> KcResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> KcResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(config)
    }

    pub fn validate(&self) -> KcResult<()> {
        let url = Url::parse(&self.trace_url).map_err(|e| ConfigError::Invalid {
            field: "trace_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "trace_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }

        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh_interval_ms",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
