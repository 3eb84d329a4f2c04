//! Centralized gateway configuration.
//!
//! Loaded via the `config` crate from environment variables, using `__` to
//! separate nested keys (`GEMINI__API_KEY`, `GEMINI__MODEL`, `BIND_ADDRESS`).
//!
//! See [`GeminiConfig`] for model provider settings.

use interview_coach_ai::GeminiConfig;
use serde::Deserialize;

/// Gateway server configuration.
#[derive(Debug, Deserialize)]
pub struct GatewayServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Gemini model provider configuration.
    pub gemini: GeminiConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0:8787".to_string()
}

impl GatewayServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
