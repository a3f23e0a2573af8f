//! Client configuration
//!
//! A [`ClientConfig`] can be built in code, read from environment variables,
//! or loaded from a YAML file:
//!
//! ```yaml
//! api_key: KEY0123456789
//! base_url: https://api.telco.example/v2
//! timeout_seconds: 20
//! max_retries: 3
//! retry_backoff:
//!   type: exponential
//!   initial_ms: 250
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 5
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.telco.example/v2";

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "TELCO_API_KEY";

/// Environment variable overriding the API root
pub const ENV_BASE_URL: &str = "TELCO_BASE_URL";

/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT: &str = "TELCO_TIMEOUT_SECS";

/// Environment variable overriding the retry count
pub const ENV_MAX_RETRIES: &str = "TELCO_MAX_RETRIES";

/// Upper bound accepted for `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to talk to the API
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key sent as a bearer token
    pub api_key: String,

    /// API root, requests are resolved relative to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Retries on 429, 5xx, timeouts and connection errors
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retries
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side request throttle, `None` to disable
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

#[allow(clippy::unnecessary_wraps)]
fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Retry backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
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

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    500
}

fn default_max_ms() -> u64 {
    8000
}

impl ClientConfig {
    /// Config with defaults and the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(ENV_API_KEY)
            .none_if_empty()
            .ok_or_else(|| Error::missing_field(ENV_API_KEY))?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(ENV_BASE_URL).none_if_empty() {
            config.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT).none_if_empty() {
            config.timeout_seconds = parse_number(ENV_TIMEOUT, &timeout)?;
        }
        if let Some(retries) = lookup(ENV_MAX_RETRIES).none_if_empty() {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &retries)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    /// Override the API root
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_seconds = timeout.as_secs().max(1);
        self
    }

    /// Override the retry count
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Override the retry backoff
    #[must_use]
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set or disable the client-side rate limit
    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: Option<RateLimiterConfig>) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Check the configuration for obvious mistakes
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }
        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value("timeout_seconds", "must be positive"));
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(Error::invalid_value(
                "max_retries",
                format!("must be at most {MAX_RETRIES_LIMIT}, got {}", self.max_retries),
            ));
        }
        if self.retry_backoff.initial_ms > self.retry_backoff.max_ms {
            return Err(Error::invalid_value(
                "retry_backoff",
                "initial_ms exceeds max_ms",
            ));
        }
        Ok(())
    }

    /// Transport settings derived from this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.trim_end_matches('/'))
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.retry_backoff.backoff_type,
                Duration::from_millis(self.retry_backoff.initial_ms),
                Duration::from_millis(self.retry_backoff.max_ms),
            )
            .header("Accept", "application/json");
        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Credentials derived from this config
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::bearer(self.api_key.clone())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff", &self.retry_backoff)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

fn parse_number<N: std::str::FromStr>(field: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_value(field, format!("'{value}' is not a number")))
}
