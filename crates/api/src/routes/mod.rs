//! Route definitions.

use axum::Router;

use crate::AppState;

mod form;
pub mod health;
pub mod index;
pub mod statements;
pub mod upload;

/// Browser-facing routes: upload page, upload handshake and download.
pub fn page_routes() -> Router<AppState> {
    Router::new().merge(index::routes()).merge(upload::routes())
}

/// Versioned JSON API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(statements::routes())
}
