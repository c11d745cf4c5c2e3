//! API routes for the Diploma server.

pub mod certificates;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::service::CertificateService;

/// Creates the main API router with all routes mounted.
pub fn create_router(service: Arc<CertificateService>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes(service))
        .layer(TraceLayer::new_for_http())
}

/// Creates the v1 API routes.
fn api_v1_routes(service: Arc<CertificateService>) -> Router {
    Router::new().nest("/certificates", certificates::router(service))
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}
