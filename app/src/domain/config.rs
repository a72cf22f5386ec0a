//! Domain types and validators for agentdesk configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::time::Duration;

use agentdesk_core::Locale;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::user::DEFAULT_HISTORY_LIMIT;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.agentdesk/config.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Locale used to render dates: `es-ES` (default), `en-US` or `en-GB`.
    pub locale: String,
    /// Login records returned when the caller gives no usable limit.
    pub login_history_limit: usize,
    /// Retry policy for persistence calls.
    pub retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default().tag().to_string(),
            login_history_limit: DEFAULT_HISTORY_LIMIT,
            retry: RetryConfig::default(),
        }
    }
}

/// Fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl AppConfig {
    /// Parsed locale.
    ///
    /// # Errors
    ///
    /// Returns an error if `locale` is not a supported tag.
    pub fn locale(&self) -> Result<Locale, ConfigError> {
        self.locale
            .parse()
            .map_err(|_| ConfigError::UnknownLocale(self.locale.clone()))
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locale()?;
        if self.login_history_limit == 0 {
            return Err(ConfigError::NotPositive {
                key: "login_history_limit",
            });
        }
        if self.retry.max_retries == 0 {
            return Err(ConfigError::NotPositive {
                key: "retry.max_retries",
            });
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
