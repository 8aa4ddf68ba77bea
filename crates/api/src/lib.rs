//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The upload page and two-step upload/download handshake
//! - Direct download and JSON/CSV statement endpoints
//! - JSON error responses

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use cashflow_core::Pipeline;
use cashflow_core::storage::StagingStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger-to-statement conversion.
    pub pipeline: Arc<Pipeline>,
    /// Staging area for workbooks awaiting download.
    pub staging: Arc<StagingStore>,
    /// Maximum accepted request body in bytes.
    pub upload_limit: usize,
}

impl AppState {
    /// Creates application state.
    #[must_use]
    pub fn new(pipeline: Pipeline, staging: StagingStore, upload_limit: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            staging: Arc::new(staging),
            upload_limit,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::page_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(state.upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
