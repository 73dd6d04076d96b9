use axum::{routing::get, Router};

pub mod analysis;
pub mod common;
pub mod outreach;
pub mod suppliers;
pub mod system;

/// Router for every `/api` endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(analysis::router())
        .merge(suppliers::router())
        .merge(outreach::router())
}
