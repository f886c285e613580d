use std::sync::Arc;

use dispatch_assist::api;
use dispatch_assist::config::{Config, GeminiConfig};
use dispatch_assist::error::AppError;
use dispatch_assist::llm::{GeminiClient, LlmAdapter};
use dispatch_assist::state::AppState;
use dispatch_assist::store::SqliteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let store = SqliteStore::new(&config.database_path);
    store.init().await?;
    tracing::info!(database = %config.database_path, "database ready");

    let llm = build_llm_adapter(&config.gemini);
    let shared_state = Arc::new(AppState::new(store, llm));

    let app = api::rest::router(shared_state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

fn build_llm_adapter(config: &GeminiConfig) -> LlmAdapter {
    match &config.api_key {
        Some(api_key) => {
            tracing::info!(model = %config.model, "llm client configured");
            LlmAdapter::new(
                GeminiClient::new(api_key.clone())
                    .with_base_url(config.base_url.clone())
                    .with_model(config.model.clone()),
            )
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set; llm replies will report the service as unavailable");
            LlmAdapter::Unavailable
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
