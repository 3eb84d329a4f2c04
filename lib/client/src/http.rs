//! HTTP transport to the LLM gateway.

use crate::config::GatewayClientConfig;
use crate::dispatch::Gateway;
use crate::error::DispatchError;
use async_trait::async_trait;
use interview_coach_core::GatewayRequest;
use serde_json::Value as JsonValue;
use tracing::warn;

/// Gateway reached over HTTP with a JSON `POST`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpGateway {
    /// Creates an HTTP gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is blank or the HTTP client cannot
    /// be built.
    pub fn new(config: &GatewayClientConfig) -> Result<Self, DispatchError> {
        if config.endpoint.trim().is_empty() {
            return Err(DispatchError::InvalidConfig {
                reason: "gateway endpoint is empty".to_string(),
            });
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| DispatchError::InvalidConfig {
                reason: format!("HTTP client error: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn invoke(&self, request: &GatewayRequest) -> Result<JsonValue, DispatchError> {
        let mut builder = self.client.post(&self.endpoint).json(request);

        if let Some(api_key) = &self.api_key {
            builder = builder
                .header("Authorization", format!("Bearer {api_key}"))
                .header("apikey", api_key);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, endpoint = %self.endpoint, "Failed to reach gateway");
            DispatchError::Transport {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                endpoint = %self.endpoint,
                %status,
                body = %body,
                "Gateway returned error status"
            );
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<JsonValue>()
            .await
            .map_err(|e| DispatchError::Decode {
                reason: e.to_string(),
            })
    }
}
