use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use bureau_core::{AppConfig, Vocabulary};
use bureau_extraction::{BatchExtractor, GeminiClient};

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("bureau=info".parse().expect("static directive is valid")),
        )
        .init();

    let config = AppConfig::from_env();
    if !config.gemini.has_api_key() {
        tracing::warn!("GEMINI_API_KEY is not set; every extraction will fail until it is configured");
    }

    let host = config.server_host.clone();
    let port = config.server_port;
    let body_limit = config.max_upload_bytes;

    let client = GeminiClient::new(&config.gemini).expect("Failed to build Gemini client");
    let vocabulary = Vocabulary::default();
    let extractor = BatchExtractor::new(Arc::new(client), vocabulary.clone())
        .with_concurrency(config.extraction_concurrency);

    let state = AppState {
        config,
        vocabulary,
        extractor: Arc::new(extractor),
    };

    let app = routes::create_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    tracing::info!("Bureau extractor listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
