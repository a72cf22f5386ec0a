//! Infrastructure implementation of the `ConfigStore` port, plus
//! `AGENTDESK_*` environment overrides.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;

/// Prefix shared by every environment variable the config layer reads.
pub const ENV_PREFIX: &str = "AGENTDESK_";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
///
/// The file lives at `$AGENTDESK_CONFIG` when set, otherwise at
/// `~/.agentdesk/config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigStore {
    path: Option<PathBuf>,
}

impl YamlConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bound to an explicit file (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<AppConfig> {
        let path = self.path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content).with_context(|| format!("cannot write {}", path.display()))
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var("AGENTDESK_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".agentdesk").join("config.yaml"))
    }
}

// ── Environment overrides ────────────────────────────────────────────────────

/// Flat view of the overridable settings.
///
/// Each field maps to `AGENTDESK_<FIELD>`:
///   - `AGENTDESK_LOCALE`
///   - `AGENTDESK_LOGIN_HISTORY_LIMIT`
///   - `AGENTDESK_RETRY_MAX_RETRIES`
///   - `AGENTDESK_RETRY_DELAY_MS`
#[derive(Debug, Default, Deserialize)]
struct EnvOverrides {
    locale: Option<String>,
    login_history_limit: Option<usize>,
    retry_max_retries: Option<u32>,
    retry_delay_ms: Option<u64>,
}

impl EnvOverrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(limit) = self.login_history_limit {
            config.login_history_limit = limit;
        }
        if let Some(max_retries) = self.retry_max_retries {
            config.retry.max_retries = max_retries;
        }
        if let Some(delay_ms) = self.retry_delay_ms {
            config.retry.delay_ms = delay_ms;
        }
    }
}

/// Overlay `AGENTDESK_*` variables from `vars` onto `config`.
///
/// # Errors
///
/// Returns an error if a variable is set but cannot be parsed.
pub fn overrides_from<I>(mut config: AppConfig, vars: I) -> Result<AppConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let overrides: EnvOverrides = envy::prefixed(ENV_PREFIX)
        .from_iter(vars)
        .context("failed to read AGENTDESK_* overrides")?;
    overrides.apply(&mut config);
    Ok(config)
}

/// Overlay the process environment onto `config`.
///
/// # Errors
///
/// Returns an error if an `AGENTDESK_*` variable cannot be parsed.
pub fn apply_env_overrides(config: AppConfig) -> Result<AppConfig> {
    overrides_from(config, std::env::vars())
}

/// Load from `store`, apply environment overrides, then validate.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an override is
/// malformed, or the result fails validation.
pub fn load_config(store: &impl ConfigStore) -> Result<AppConfig> {
    let config = apply_env_overrides(store.load()?)?;
    config.validate()?;
    tracing::debug!(locale = %config.locale, "config loaded");
    Ok(config)
}
