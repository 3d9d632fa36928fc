//! Process-wide configuration, read once at startup

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "grok-beta";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Relay configuration. Immutable once built; handed to the completion client.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Provider bearer credential (`XAI_API_KEY`)
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub port: u16,
    /// Upper bound on a single outbound completion call
    pub request_timeout: Duration,
    /// Bounded retries around the completion client; 0 disables
    pub max_retries: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: 0,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let timeout_secs = parse_var(&lookup, "SOUS_CHEF_REQUEST_TIMEOUT_SECS", "number of seconds")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key: lookup("XAI_API_KEY").filter(|k| !k.is_empty()),
            base_url: lookup("XAI_BASE_URL").unwrap_or(defaults.base_url),
            model: lookup("XAI_MODEL").unwrap_or(defaults.model),
            port: parse_var(&lookup, "SOUS_CHEF_PORT", "port number")?.unwrap_or(defaults.port),
            request_timeout: Duration::from_secs(timeout_secs),
            max_retries: parse_var(&lookup, "SOUS_CHEF_MAX_RETRIES", "retry count")?
                .unwrap_or(defaults.max_retries),
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
    }
}
