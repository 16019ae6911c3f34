//! Client configuration and timeout defaults.
//!
//! Trellis configuration is loaded from TOML files with caller overrides.
//! The `[timeouts]` section carries the per-service timeout defaults an
//! operation falls back to when no explicit timeout is supplied; the
//! `[retry]` section selects and tunes the retry strategy.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::request::ServiceType;
use crate::retry::{BestEffortRetryStrategy, FailFastRetryStrategy, RetryStrategy};

/// Default timeout for key-value operations in milliseconds.
pub const DEFAULT_KV_TIMEOUT_MS: u64 = 2_500;

/// Default timeout for view, query, analytics, search, and management
/// operations in milliseconds.
pub const DEFAULT_SERVICE_TIMEOUT_MS: u64 = 75_000;

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Per-service timeout defaults.
    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Retry strategy selection and backoff tuning.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.timeouts.validate()?;
        self.retry.validate()?;
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeouts: TimeoutConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Per-service timeout defaults in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Key-value operation timeout.
    #[serde(default = "default_kv_timeout_ms")]
    pub kv_ms: u64,

    /// View operation timeout.
    #[serde(default = "default_service_timeout_ms")]
    pub view_ms: u64,

    /// Query operation timeout.
    #[serde(default = "default_service_timeout_ms")]
    pub query_ms: u64,

    /// Analytics operation timeout.
    #[serde(default = "default_service_timeout_ms")]
    pub analytics_ms: u64,

    /// Search operation timeout.
    #[serde(default = "default_service_timeout_ms")]
    pub search_ms: u64,

    /// Management operation timeout.
    #[serde(default = "default_service_timeout_ms")]
    pub management_ms: u64,
}

fn default_kv_timeout_ms() -> u64 {
    DEFAULT_KV_TIMEOUT_MS
}

fn default_service_timeout_ms() -> u64 {
    DEFAULT_SERVICE_TIMEOUT_MS
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            kv_ms: DEFAULT_KV_TIMEOUT_MS,
            view_ms: DEFAULT_SERVICE_TIMEOUT_MS,
            query_ms: DEFAULT_SERVICE_TIMEOUT_MS,
            analytics_ms: DEFAULT_SERVICE_TIMEOUT_MS,
            search_ms: DEFAULT_SERVICE_TIMEOUT_MS,
            management_ms: DEFAULT_SERVICE_TIMEOUT_MS,
        }
    }
}

impl TimeoutConfig {
    /// The configured default timeout for a service.
    pub fn for_service(&self, service: ServiceType) -> Duration {
        let ms = match service {
            ServiceType::Kv => self.kv_ms,
            ServiceType::View => self.view_ms,
            ServiceType::Query => self.query_ms,
            ServiceType::Analytics => self.analytics_ms,
            ServiceType::Search => self.search_ms,
            ServiceType::Management => self.management_ms,
        };
        Duration::from_millis(ms)
    }

    /// Resolve an operation's timeout.
    ///
    /// An explicit per-operation timeout takes precedence over the service
    /// default.
    pub fn resolve(&self, service: ServiceType, explicit: Option<Duration>) -> Duration {
        explicit.unwrap_or_else(|| self.for_service(service))
    }

    /// Validate the timeout configuration.
    pub fn validate(&self) -> Result<()> {
        for (name, ms) in [
            ("kv_ms", self.kv_ms),
            ("view_ms", self.view_ms),
            ("query_ms", self.query_ms),
            ("analytics_ms", self.analytics_ms),
            ("search_ms", self.search_ms),
            ("management_ms", self.management_ms),
        ] {
            if ms == 0 {
                bail!("timeouts.{} must be > 0", name);
            }
        }
        Ok(())
    }
}

/// Retry strategy selection and backoff tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Strategy: "best_effort" or "fail_fast".
    #[serde(default = "default_retry_strategy")]
    pub strategy: String,

    /// Backoff base delay in milliseconds (first retry).
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Backoff cap in milliseconds.
    #[serde(default = "default_backoff_cap_ms")]
    pub backoff_cap_ms: u64,
}

fn default_retry_strategy() -> String {
    "best_effort".to_string()
}

fn default_backoff_base_ms() -> u64 {
    1
}

fn default_backoff_cap_ms() -> u64 {
    500
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            strategy: default_retry_strategy(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_cap_ms: default_backoff_cap_ms(),
        }
    }
}

impl RetryConfig {
    /// Validate the retry configuration.
    pub fn validate(&self) -> Result<()> {
        if self.backoff_base_ms == 0 {
            bail!("retry.backoff_base_ms must be > 0");
        }
        if self.backoff_cap_ms < self.backoff_base_ms {
            bail!("retry.backoff_cap_ms must be >= retry.backoff_base_ms");
        }
        match self.strategy.as_str() {
            "best_effort" | "fail_fast" => Ok(()),
            other => bail!("retry.strategy must be \"best_effort\" or \"fail_fast\", got \"{}\"", other),
        }
    }

    /// Construct the configured retry strategy.
    pub fn build_strategy(&self) -> Result<Arc<dyn RetryStrategy>> {
        self.validate()?;
        let strategy: Arc<dyn RetryStrategy> = match self.strategy.as_str() {
            "fail_fast" => Arc::new(FailFastRetryStrategy),
            _ => Arc::new(BestEffortRetryStrategy::new(
                Duration::from_millis(self.backoff_base_ms),
                Duration::from_millis(self.backoff_cap_ms),
            )),
        };
        Ok(strategy)
    }
}
