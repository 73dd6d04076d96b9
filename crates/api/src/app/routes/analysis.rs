use std::sync::Arc;

use axum::{extract::Extension, routing::post, Json, Router};

use pantry_inventory::{
    analyze_inventory, high_priority_count, DashboardSummary, InventoryAnalysis, InventorySnapshot,
    PriorityScorer,
};

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/analyze-inventory", post(analyze))
        .route("/priority-items", post(priority_items))
        .route("/dashboard", post(dashboard))
}

pub async fn analyze(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::InventoryRequest>,
) -> Result<Json<InventoryAnalysis>, ApiError> {
    let reference = common::reference_time(body.reference_date.as_deref())?;
    let snapshot = InventorySnapshot::from_raw(body.inventory, body.analytics)?;
    let analysis = analyze_inventory(&snapshot, reference, &services.analysis);
    tracing::info!(
        items = analysis.active_item_count,
        critical = analysis.critical_categories.len(),
        expiring = analysis.expiring_items.len(),
        "inventory analyzed"
    );
    Ok(Json(analysis))
}

pub async fn priority_items(
    Json(body): Json<dto::InventoryRequest>,
) -> Result<Json<dto::PriorityItemsResponse>, ApiError> {
    let reference = common::reference_time(body.reference_date.as_deref())?;
    let snapshot = InventorySnapshot::from_raw(body.inventory, body.analytics)?;
    let crisis = snapshot.analytics.active_crisis();

    let mut items = PriorityScorer.rank(&snapshot.items, &snapshot.analytics.demand, crisis, reference);
    let high = high_priority_count(&items);
    if let Some(n) = body.top_n {
        items.truncate(n);
    }
    Ok(Json(dto::PriorityItemsResponse {
        count: items.len(),
        high_priority_count: high,
        items,
    }))
}

pub async fn dashboard(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DashboardRequest>,
) -> Result<Json<DashboardSummary>, ApiError> {
    let reference = common::reference_time(body.reference_date.as_deref())?;
    let snapshot = InventorySnapshot::from_raw(body.inventory, body.analytics)?;
    let distributions = common::distributions(body.distributions);
    Ok(Json(DashboardSummary::build(&snapshot, &distributions, reference, &services.analysis)))
}
