//! Prompt dispatch to the LLM gateway.
//!
//! [`Gateway`] is the transport seam; [`Dispatcher`] wraps one with the
//! call policy: one attempt, a bounded timeout, and rejection of error
//! objects the gateway returns with a success status.

use crate::error::DispatchError;
use async_trait::async_trait;
use interview_coach_core::{ERROR_KEY, GatewayRequest, GatewayRequestId, RAW_RESPONSE_KEY};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Transport to the LLM gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Sends one request and returns the raw response body.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, or a body
    /// that is not JSON.
    async fn invoke(&self, request: &GatewayRequest) -> Result<JsonValue, DispatchError>;
}

#[async_trait]
impl<G: Gateway + ?Sized> Gateway for Arc<G> {
    async fn invoke(&self, request: &GatewayRequest) -> Result<JsonValue, DispatchError> {
        (**self).invoke(request).await
    }
}

/// Applies the call policy around a [`Gateway`].
#[derive(Debug, Clone)]
pub struct Dispatcher<G> {
    gateway: G,
    timeout: Duration,
}

impl<G: Gateway> Dispatcher<G> {
    /// Creates a dispatcher.
    #[must_use]
    pub fn new(gateway: G, timeout: Duration) -> Self {
        Self { gateway, timeout }
    }

    /// Sends `request` once and returns the gateway's payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway fails, exceeds the timeout, or
    /// answers with an error object that carries no raw response.
    #[instrument(
        skip_all,
        fields(request_id = %GatewayRequestId::new(), action = %request.action())
    )]
    pub async fn dispatch(
        &self,
        request: &GatewayRequest,
    ) -> interview_coach_core::Result<JsonValue, DispatchError> {
        let payload = tokio::time::timeout(self.timeout, self.gateway.invoke(request))
            .await
            .map_err(|_| DispatchError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            })??;

        reject_error_object(&payload)?;
        debug!("Gateway returned payload");
        Ok(payload)
    }
}

/// Fails on `{ "error": ... }` bodies that have nothing to extract from.
///
/// An error next to a `rawResponse` is the gateway saying it could not parse
/// the model text itself, so the text is still worth extracting.
fn reject_error_object(payload: &JsonValue) -> Result<(), DispatchError> {
    let Some(map) = payload.as_object() else {
        return Ok(());
    };
    if map.contains_key(RAW_RESPONSE_KEY) {
        return Ok(());
    }
    match map.get(ERROR_KEY) {
        Some(JsonValue::String(message)) => Err(DispatchError::GatewayReported {
            message: message.clone(),
        }),
        Some(other) if !other.is_null() => Err(DispatchError::GatewayReported {
            message: other.to_string(),
        }),
        _ => Ok(()),
    }
}
