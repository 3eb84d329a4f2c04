//! Gateway client configuration.
//!
//! Loaded via the `config` crate from `COACH_GATEWAY__*` environment
//! variables, e.g. `COACH_GATEWAY__ENDPOINT`.

use serde::Deserialize;
use std::time::Duration;

/// Where and how to reach the LLM gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayClientConfig {
    /// Full URL of the gateway function.
    pub endpoint: String,

    /// Key sent as bearer token and `apikey` header, if the gateway needs one.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Upper bound on one gateway round trip, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl GatewayClientConfig {
    /// Creates a configuration for `endpoint` with no key and the default timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Returns the timeout as a duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("COACH_GATEWAY")
                    .prefix_separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
