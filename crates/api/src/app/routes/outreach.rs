use std::sync::Arc;

use axum::{extract::Extension, routing::post, Json, Router};

use pantry_ai::{CrisisSignal, CrisisSummary, NeedSummary};
use pantry_core::Category;
use pantry_inventory::{analyze_inventory, normalize_analytics, InventorySnapshot};
use pantry_suppliers::suppliers_for_category;

use crate::app::dto;
use crate::app::errors::ApiError;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/generate-emails", post(generate_emails))
        .route("/detect-crisis", post(detect_crisis))
        .route("/full-workflow", post(full_workflow))
}

pub async fn generate_emails(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::GenerateEmailsRequest>,
) -> Result<Json<dto::EmailsResponse>, ApiError> {
    let category: Category = body
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::validation("category is required"))?
        .parse()?;
    let days_of_supply = body
        .days_of_supply
        .filter(|d| d.is_finite())
        .ok_or_else(|| ApiError::validation("days_of_supply is required"))?;
    let reference = common::reference_time(body.reference_date.as_deref())?;

    let inventory = InventorySnapshot::from_raw(body.inventory, None)?;
    let suppliers = common::require_suppliers(body.suppliers)?;
    let crisis = body.crisis_context.and_then(dto::CrisisContext::into_summary);

    let emails = services
        .composer
        .generate_outreach(
            &category,
            days_of_supply,
            &inventory.items,
            &suppliers.suppliers,
            crisis.as_ref(),
            reference,
            &services.analysis,
        )
        .await;
    Ok(Json(emails.into()))
}

pub async fn detect_crisis(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::DetectCrisisRequest>,
) -> Json<CrisisSignal> {
    let analytics = normalize_analytics(body.analytics);
    let signal = services
        .detector
        .detect(analytics.crisis.as_ref(), body.scenario.as_deref())
        .await;
    Json(signal)
}

/// Analyze, resolve the crisis signal, then draft outreach for the most
/// critical category (none when nothing is critical).
pub async fn full_workflow(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::WorkflowRequest>,
) -> Result<Json<dto::WorkflowResponse>, ApiError> {
    let reference = common::reference_time(body.reference_date.as_deref())?;
    let snapshot = InventorySnapshot::from_raw(body.inventory, body.analytics)?;
    let suppliers = common::require_suppliers(body.suppliers)?;

    let analysis = analyze_inventory(&snapshot, reference, &services.analysis);
    let crisis = services
        .detector
        .detect(snapshot.analytics.crisis.as_ref(), body.scenario.as_deref())
        .await;

    let emails = match analysis.most_critical() {
        Some(gap) => {
            let need = NeedSummary::from_gap(gap, &snapshot.items);
            let candidates = suppliers_for_category(&suppliers.suppliers, &gap.category, reference);
            let summary = CrisisSummary::from_signal(&crisis);
            services.composer.compose(&need, &candidates, summary.as_ref()).await
        }
        None => {
            tracing::info!("no critical category; skipping outreach");
            Vec::new()
        }
    };

    Ok(Json(dto::WorkflowResponse {
        email_count: emails.len(),
        analysis,
        crisis,
        emails,
    }))
}
