//! Configuration for a feed session
//!
//! Loaded from YAML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```yaml
//! base_url: http://developerslife.ru/
//! log_level: debug
//! default_category: hot
//! http:
//!   timeout_seconds: 10
//!   max_retries: 1
//!   retry_backoff:
//!     type: constant
//!     initial_ms: 250
//!   rate_limit:
//!     requests_per_second: 2
//!     burst_size: 4
//! cursor:
//!   max_empty_pages: 2
//! ```

use crate::cursor::CursorConfig;
use crate::error::{Error, Result};
use crate::feed::Category;
use crate::types::{BackoffType, LogLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed host; category and page are appended as path segments
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Category shown when a session starts
    #[serde(default)]
    pub default_category: Category,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub cursor: CursorConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: LogLevel::default(),
            default_category: Category::default(),
            http: HttpConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://developerslife.ru/".to_string()
}

impl FeedConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.http.retry_backoff.initial_ms > self.http.retry_backoff.max_ms {
            return Err(Error::invalid_value(
                "http.retry_backoff",
                "initial_ms exceeds max_ms",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per page request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting; `null` disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimitConfig>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
            user_agent: None,
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    2
}

fn default_rate_limit() -> Option<RateLimitConfig> {
    Some(RateLimitConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl BackoffConfig {
    /// Delay before retry number `attempt + 1`, capped at `max_ms`
    pub fn delay(&self, attempt: u32) -> Duration {
        let initial = Duration::from_millis(self.initial_ms);
        let delay = match self.backoff_type {
            BackoffType::Constant => initial,
            BackoffType::Linear => initial.saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => initial.saturating_mul(2u32.saturating_pow(attempt)),
        };
        delay.min(Duration::from_millis(self.max_ms))
    }
}

fn default_initial_ms() -> u64 {
    200
}

fn default_max_ms() -> u64 {
    5000
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

fn default_rps() -> u32 {
    5
}

fn default_burst() -> u32 {
    5
}
