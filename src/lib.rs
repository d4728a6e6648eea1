//! MSE Signals - technical analysis service for Macedonian Stock Exchange history

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

use axum::Router;
use config::Config;
use services::analyzer::StockAnalyzer;
use services::storage::{BlobStore, MemoryBlobStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub analyzer: Arc<StockAnalyzer>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn BlobStore>) -> Self {
        Self {
            config: Arc::new(config),
            analyzer: Arc::new(StockAnalyzer::new(store)),
        }
    }

    /// State backed by an empty in-memory store.
    pub fn in_memory(config: Config) -> Self {
        let store = Arc::new(MemoryBlobStore::new(config.key_prefix.clone()));
        Self::new(config, store)
    }
}

/// Build the full application with middleware.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
