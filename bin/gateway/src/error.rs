//! Domain error types for gateway requests.
//!
//! Every error becomes a JSON `{ "error": ... }` body so clients can tell a
//! gateway failure from model output.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use interview_coach_ai::{LlmError, PromptError};
use interview_coach_core::ERROR_KEY;
use std::fmt;

/// Errors while serving one gateway request.
#[derive(Debug)]
pub enum GatewayError {
    /// The `action` field named no known action.
    InvalidAction,
    /// The `data` field did not fit the action.
    InvalidRequest { reason: String },
    /// The prompt could not be rendered.
    Prompt(PromptError),
    /// The model provider call failed.
    Llm(LlmError),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAction => write!(f, "Invalid action specified"),
            Self::InvalidRequest { reason } => write!(f, "invalid request data: {reason}"),
            Self::Prompt(e) => write!(f, "{e}"),
            Self::Llm(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<PromptError> for GatewayError {
    fn from(e: PromptError) -> Self {
        Self::Prompt(e)
    }
}

impl From<LlmError> for GatewayError {
    fn from(e: LlmError) -> Self {
        Self::Llm(e)
    }
}

impl GatewayError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAction | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Prompt(_) | Self::Llm(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ ERROR_KEY: self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
