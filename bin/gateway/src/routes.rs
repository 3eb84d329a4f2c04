//! HTTP routes for the LLM gateway.

use crate::error::GatewayError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderName, Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use interview_coach_ai::{LlmBackend, PromptRegistry, shape_model_text};
use interview_coach_core::{GatewayAction, GatewayRequest, GatewayRequestId};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

/// Shared state for gateway handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn LlmBackend>,
    pub prompts: Arc<PromptRegistry>,
}

impl AppState {
    /// Creates state with the default interview prompts.
    #[must_use]
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            prompts: Arc::new(PromptRegistry::interview_defaults()),
        }
    }
}

/// Builds the gateway router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-client-info"),
        ]);

    Router::new()
        .route("/", post(invoke))
        .route("/ai", post(invoke))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<JsonValue> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Renders the prompt for one action, calls the model and shapes its text.
#[instrument(skip_all, fields(request_id = %GatewayRequestId::new()))]
async fn invoke(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JsonValue>, GatewayError> {
    let request = parse_request(&body)?;
    let action = request.action();

    let llm_request = state.prompts.render_request(&request)?;
    let response = state.backend.generate(&llm_request).await.map_err(|e| {
        warn!(%action, error = %e, "Model call failed");
        GatewayError::from(e)
    })?;

    info!(
        %action,
        model = %response.model,
        total_tokens = response.usage.total(),
        "Model call completed"
    );

    Ok(Json(shape_model_text(&response.content)))
}

fn parse_request(body: &[u8]) -> Result<GatewayRequest, GatewayError> {
    let body: JsonValue =
        serde_json::from_slice(body).map_err(|e| GatewayError::InvalidRequest {
            reason: e.to_string(),
        })?;

    let action = body
        .get("action")
        .cloned()
        .map(serde_json::from_value::<GatewayAction>);
    if !matches!(action, Some(Ok(_))) {
        return Err(GatewayError::InvalidAction);
    }

    serde_json::from_value(body).map_err(|e| GatewayError::InvalidRequest {
        reason: e.to_string(),
    })
}
