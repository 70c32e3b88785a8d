//! Explicit runtime configuration.
//!
//! Built once at start-up and passed down; nothing here is global. `from_env`
//! reads the process environment, `from_lookup` takes any key lookup so tests
//! do not have to mutate the environment.

use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "SMDB_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "SMDB_TIMEOUT_MS";
pub const FALLBACK_IMAGE_VAR: &str = "SMDB_FALLBACK_IMAGE";
pub const STATUS_RESET_VAR: &str = "SMDB_STATUS_RESET_MS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_FALLBACK_IMAGE: &str = "https://fakeimg.pl/250x330";
pub const DEFAULT_STATUS_RESET: Duration = Duration::from_millis(1_500);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where the REST service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Collection URL, `<base>/api/movies`.
    pub fn api_root(&self) -> String {
        format!("{}/api/movies", self.base_url)
    }
}

/// Presentation settings shared by the views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub fallback_image: String,
    pub status_reset: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
            status_reset: DEFAULT_STATUS_RESET,
        }
    }
}

/// Everything the shell needs at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub view: ViewConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(BASE_URL_VAR))?;

        let mut client = ClientConfig::new(base_url.trim());
        if let Some(timeout) = millis(&lookup, TIMEOUT_VAR)? {
            client.timeout = timeout;
        }

        let mut view = ViewConfig::default();
        if let Some(fallback) = lookup(FALLBACK_IMAGE_VAR).filter(|v| !v.trim().is_empty()) {
            view.fallback_image = fallback;
        }
        if let Some(reset) = millis(&lookup, STATUS_RESET_VAR)? {
            view.status_reset = reset;
        }

        Ok(Self { client, view })
    }
}

fn millis<F>(lookup: &F, var: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}
