use interview_coach_ai::GeminiBackend;
use interview_coach_gateway::{AppState, GatewayServerConfig, router};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = GatewayServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(model = %config.gemini.model, "Loaded configuration");

    let backend = GeminiBackend::new(config.gemini).expect("failed to create Gemini backend");
    let app = router(AppState::new(Arc::new(backend)));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on http://{}", &config.bind_address);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
