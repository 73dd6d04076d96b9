use axum::{routing::post, Json, Router};

use pantry_suppliers::segment_suppliers;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::common;

pub fn router() -> Router {
    Router::new().route("/segment-suppliers", post(segment))
}

pub async fn segment(Json(body): Json<dto::SuppliersRequest>) -> Result<Json<dto::SegmentsResponse>, ApiError> {
    let reference = common::reference_time(body.reference_date.as_deref())?;
    let normalized = common::require_suppliers(body.suppliers)?;
    let segments = segment_suppliers(&normalized.suppliers, reference);
    tracing::info!(
        hot = segments.hot.len(),
        warm = segments.warm.len(),
        cold = segments.cold.len(),
        "suppliers segmented"
    );
    Ok(Json(dto::SegmentsResponse {
        counts: (&segments).into(),
        rejected: normalized.rejected.len(),
        segments,
    }))
}
