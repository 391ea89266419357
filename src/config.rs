//! Tap configuration
//!
//! The tap is configured through a JSON document (file or inline string)
//! exposing the access token, the report date range, an optional user agent,
//! and the target environment. HTTP transport tuning lives in an optional
//! `http` block.

use crate::error::{Error, Result};
use crate::types::BackoffType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Production API base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.direct.yandex.com/json/v5";

/// Sandbox API base URL
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.direct.yandex.com/json/v5";

// ============================================================================
// Tap Config
// ============================================================================

/// Complete tap configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// OAuth access token used as the bearer token
    pub access_token: String,

    /// Earliest report date to sync (inclusive)
    pub start_date: NaiveDate,

    /// Latest report date to sync (inclusive)
    pub end_date: NaiveDate,

    /// Optional User-Agent header value for all requests
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Which API environment to target
    #[serde(default)]
    pub environment: Environment,

    /// HTTP transport tuning
    #[serde(default)]
    pub http: HttpSettings,
}

impl TapConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| Error::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if self.access_token.is_empty() {
            return Err(Error::missing_field("access_token"));
        }
        if self.end_date < self.start_date {
            return Err(Error::InvalidConfigValue {
                field: "end_date".to_string(),
                message: format!(
                    "end_date {} is before start_date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        // The base URLs are compile-time constants; parse anyway so a future
        // edit that breaks one fails loudly at startup.
        url::Url::parse(self.environment.base_url())?;
        Ok(())
    }

    /// Base URL for the configured environment
    pub fn base_url(&self) -> &'static str {
        self.environment.base_url()
    }
}

/// API environment selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Live advertising data
    #[default]
    Production,
    /// Vendor sandbox for test accounts
    Sandbox,
}

impl Environment {
    /// Base URL for this environment
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_BASE_URL,
            Environment::Sandbox => SANDBOX_BASE_URL,
        }
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffSettings,

    /// Requests per second limit (token bucket)
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffSettings::default(),
            requests_per_second: default_rps(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    5
}

fn default_rps() -> u32 {
    5
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffSettings {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffSettings {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}
