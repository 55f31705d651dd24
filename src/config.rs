//! Client configuration.
//!
//! Loaded from environment variables; a `.env` file is honoured outside of
//! tests.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_STORAGE_DIR: &str = ".estate";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Root for all REST calls, e.g. `http://host:5000/api`
    pub base_url: String,
    /// Host prepended to `/uploads/...` photo paths
    pub asset_host: String,
    pub request_timeout: Duration,
    pub storage_dir: PathBuf,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let asset_host = asset_host_for(&base_url);
        Self {
            base_url,
            asset_host,
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }

    /// Points at another backend, moving the asset host along with it.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        let moved = Self::new(base_url);
        Self {
            request_timeout: self.request_timeout,
            storage_dir: self.storage_dir,
            ..moved
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("ESTATE_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue(
                "ESTATE_API_BASE_URL".to_string(),
                format!("'{}' is not an http(s) URL", base_url),
            ));
        }

        let mut config = Self::new(base_url);

        if let Some(host) = lookup("ESTATE_ASSET_HOST") {
            config.asset_host = host.trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("ESTATE_REQUEST_TIMEOUT_MS") {
            let millis = raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("ESTATE_REQUEST_TIMEOUT_MS".to_string(), e.to_string())
            })?;
            config.request_timeout = Duration::from_millis(millis);
        }

        if let Some(dir) = lookup("ESTATE_STORAGE_DIR") {
            config.storage_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// `http://host:5000/api` -> `http://host:5000`
fn asset_host_for(base_url: &str) -> String {
    base_url
        .strip_suffix("/api")
        .unwrap_or(base_url)
        .to_string()
}
