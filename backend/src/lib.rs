pub mod config;
pub mod handlers;
pub mod services;
pub mod utils;

use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use services::{GeminiClient, Orchestrator};

/// Build the orchestrator from the loaded configuration.
///
/// The API key is injected here, once; a missing key produces an
/// orchestrator that rejects every request with the configuration error
/// instead of failing startup.
pub fn build_orchestrator(config: &Config) -> Arc<Orchestrator> {
    if config.gemini.api_key.is_empty() {
        Arc::new(Orchestrator::without_generator())
    } else {
        let client = GeminiClient::new(&config.gemini);
        Arc::new(Orchestrator::new(Arc::new(client)))
    }
}

/// Build the application router.
///
/// Non-POST methods on the generate route fall through to a plain-text 405
/// instead of axum's default empty response.
pub fn create_app(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route(
            "/api/generate",
            post(handlers::generate::generate).fallback(handlers::generate::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(orchestrator)
}

#[cfg(test)]
mod tests;
