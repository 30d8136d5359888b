//! MindMate - mood-aware mental health chat companion
//!
//! Classifies each message with a keyword lexicon, asks an LLM for a short
//! supportive reply and tracks the mood trajectory per session.

mod api;
mod config;
mod llm;
mod mood;
mod reply_generator;
mod runtime;
mod state_machine;
mod store;
mod system_prompt;

use api::{create_router, AppState};
use config::AppConfig;
use llm::ModelRegistry;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmate=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let llm_registry = match ModelRegistry::new(&config.llm) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize LLM registry");
            std::process::exit(1);
        }
    };
    tracing::info!(
        models = ?llm_registry.available_models(),
        default = %llm_registry.default_model_id(),
        "LLM registry initialized"
    );

    let state = AppState::new(llm_registry);
    let _reaper = state
        .sessions
        .spawn_reaper(runtime::SESSION_TTL, runtime::SWEEP_INTERVAL);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("MindMate server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
