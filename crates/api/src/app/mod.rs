//! HTTP application wiring (Axum router + shared services).
//!
//! - `services.rs`: engine config and external backends
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: request/response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new().nest("/api", routes::router()).layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_span))
            .layer(Extension(services)),
    )
}
