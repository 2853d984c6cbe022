//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$WORLDWISE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/worldwise/config.toml`
//! 3. `~/.worldwise/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Config values are validated after parsing; `api_base` must address a
//! collection over http or https.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::remote::http::{cities_endpoint, is_http_url};

/// How `getCity` results are applied when several are in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOrdering {
    /// Results apply in the order responses arrive. A slow response for an
    /// older request can replace the current city chosen by a newer one.
    #[default]
    Completion,
    /// Only the most recently requested city may become current; responses
    /// for superseded requests are dropped.
    LatestRequest,
}

impl SelectionOrdering {
    /// Name used in configuration files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            SelectionOrdering::Completion => "completion",
            SelectionOrdering::LatestRequest => "latest-request",
        }
    }
}

impl std::fmt::Display for SelectionOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// api_base = "http://localhost:8000/"
/// ordering = "completion"
/// user_agent = "worldwise-kiosk"
/// geocode_url = "https://api.bigdatacloud.net/data/reverse-geocode-client"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Base URL of the API serving the city collection
    pub api_base: Option<String>,

    /// Ordering of concurrent city fetches
    pub ordering: Option<SelectionOrdering>,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,

    /// Reverse geocoding endpoint used to fill in new cities
    pub geocode_url: Option<String>,
}

impl GlobalConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref base) = self.api_base {
            validate_api_base(base)?;
        }

        if let Some(ref url) = self.geocode_url {
            if !is_http_url(url.trim()) {
                return Err(ConfigError::InvalidValue(format!(
                    "geocode_url '{}' is not an http(s) URL",
                    url
                )));
            }
        }

        if let Some(ref agent) = self.user_agent {
            if agent.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "user_agent cannot be empty".into(),
                ));
            }
        }

        Ok(())
    }

    /// Set a value by key, as `worldwise config set` does.
    ///
    /// The result is validated, and `self` is left unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.clone();
        let value = value.trim().to_string();

        match key {
            "api_base" => next.api_base = Some(value),
            "ordering" => {
                let ordering = match value.as_str() {
                    "completion" => SelectionOrdering::Completion,
                    "latest-request" => SelectionOrdering::LatestRequest,
                    other => {
                        return Err(ConfigError::InvalidValue(format!(
                            "ordering must be 'completion' or 'latest-request', not '{}'",
                            other
                        )))
                    }
                };
                next.ordering = Some(ordering);
            }
            "user_agent" => next.user_agent = Some(value),
            "geocode_url" => next.geocode_url = Some(value),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown configuration key '{}'",
                    key
                )))
            }
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Check that a base URL can address the city collection.
pub fn validate_api_base(base: &str) -> Result<(), ConfigError> {
    cities_endpoint(base)
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidValue(format!("api_base '{}' is not an http(s) URL", base)))
}
