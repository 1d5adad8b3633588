use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::loader::LoaderOptions;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Delay in seconds before the first retry; doubles after each attempt.
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 2.0,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    /// Out-of-range delays (negative, NaN, infinite, too large) never panic:
    /// negative and NaN mean no delay, anything too large is capped at
    /// `max_delay_secs`.
    pub fn to_policy(&self) -> RetryPolicy {
        let max_delay = Duration::from_secs(self.max_delay_secs);
        let base_delay = if self.base_delay_secs.is_nan() || self.base_delay_secs <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(self.base_delay_secs)
                .map_or(max_delay, |delay| delay.min(max_delay))
        };
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }
}

/// Global configuration loaded from `~/.config/page-loader/config.toml`.
/// Every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLoaderConfig {
    /// User-Agent header sent with every request (None = `page-loader/<version>`).
    pub user_agent: Option<String>,
    /// Seconds allowed for establishing a connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for one whole request, body included.
    pub request_timeout_secs: u64,
    /// Resources downloaded at once; 1 downloads them one after another.
    pub max_concurrent_downloads: usize,
    /// Optional retry policy; if missing, built-in defaults are used.
    pub retry: Option<RetryConfig>,
}

impl Default for PageLoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            connect_timeout_secs: 15,
            request_timeout_secs: 120,
            max_concurrent_downloads: 1,
            retry: None,
        }
    }
}

impl PageLoaderConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        let mut options = FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchOptions::default()
        };
        if let Some(ua) = self.user_agent.as_deref().filter(|ua| !ua.trim().is_empty()) {
            options.user_agent = ua.to_string();
        }
        options
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            retry: self.retry_policy(),
            max_concurrent_downloads: self.max_concurrent_downloads.max(1),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("page-loader")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PageLoaderConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = PageLoaderConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<PageLoaderConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: PageLoaderConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
