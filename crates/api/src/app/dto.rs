use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use pantry_ai::{CrisisSignal, CrisisSummary, OutreachResult};
use pantry_core::RecordSet;
use pantry_inventory::{CrisisState, InventoryAnalysis, RawAnalytics, ScoredItem};
use pantry_suppliers::Segments;

// -------------------------
// Request DTOs
// -------------------------

/// Raw store collections are kept untyped here; normalization decides per
/// record what is usable.
#[derive(Debug, Default, Deserialize)]
pub struct InventoryRequest {
    pub inventory: Option<RecordSet<JsonValue>>,
    pub analytics: Option<RawAnalytics>,
    pub reference_date: Option<String>,
    pub top_n: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuppliersRequest {
    pub suppliers: Option<RecordSet<JsonValue>>,
    pub reference_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateEmailsRequest {
    pub category: Option<String>,
    #[serde(alias = "daysOfSupply")]
    pub days_of_supply: Option<f64>,
    #[serde(alias = "crisisContext")]
    pub crisis_context: Option<CrisisContext>,
    pub inventory: Option<RecordSet<JsonValue>>,
    pub suppliers: Option<RecordSet<JsonValue>>,
    pub reference_date: Option<String>,
}

/// Caller-supplied crisis context for outreach.
///
/// Accepts the `/detect-crisis` reply as-is; a context flagged `is_crisis:
/// false` contributes nothing to the briefs.
#[derive(Debug, Clone, Deserialize)]
pub struct CrisisContext {
    #[serde(default, alias = "isCrisis")]
    pub is_crisis: Option<bool>,
    pub event_type: String,
    pub severity: Option<String>,
    pub demand_multiplier: Option<f64>,
    pub description: Option<String>,
}

impl CrisisContext {
    /// Summary for an active context; `None` when flagged as no crisis.
    pub fn into_summary(self) -> Option<CrisisSummary> {
        if self.is_crisis == Some(false) {
            return None;
        }
        let mut state = CrisisState::active(self.event_type.clone(), self.demand_multiplier.unwrap_or(1.0));
        state.description = self.description.unwrap_or_default();
        Some(CrisisSummary {
            event_type: self.event_type,
            severity: self.severity.unwrap_or_else(|| "medium".to_string()),
            description: state.description.clone(),
            demand_multiplier: state.effective_multiplier(),
            demand_increase_pct: state.demand_increase_pct(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DetectCrisisRequest {
    pub analytics: Option<RawAnalytics>,
    /// Free-text scenario (headlines, alerts) for the classifier.
    pub scenario: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardRequest {
    pub inventory: Option<RecordSet<JsonValue>>,
    pub analytics: Option<RawAnalytics>,
    pub distributions: Option<RecordSet<JsonValue>>,
    pub reference_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkflowRequest {
    pub inventory: Option<RecordSet<JsonValue>>,
    pub analytics: Option<RawAnalytics>,
    pub suppliers: Option<RecordSet<JsonValue>>,
    pub scenario: Option<String>,
    pub reference_date: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct PriorityItemsResponse {
    pub items: Vec<ScoredItem>,
    pub count: usize,
    pub high_priority_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SegmentsResponse {
    #[serde(flatten)]
    pub segments: Segments,
    pub counts: SegmentCounts,
    pub rejected: usize,
}

#[derive(Debug, Serialize)]
pub struct SegmentCounts {
    pub hot: usize,
    pub warm: usize,
    pub cold: usize,
}

impl From<&Segments> for SegmentCounts {
    fn from(s: &Segments) -> Self {
        Self {
            hot: s.hot.len(),
            warm: s.warm.len(),
            cold: s.cold.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmailsResponse {
    pub emails: Vec<OutreachResult>,
    pub count: usize,
}

impl From<Vec<OutreachResult>> for EmailsResponse {
    fn from(emails: Vec<OutreachResult>) -> Self {
        Self {
            count: emails.len(),
            emails,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkflowResponse {
    pub analysis: InventoryAnalysis,
    pub crisis: CrisisSignal,
    pub emails: Vec<OutreachResult>,
    pub email_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_accepts_camel_case_fields() {
        let req: GenerateEmailsRequest = serde_json::from_value(json!({
            "category": "protein",
            "daysOfSupply": 1.2,
            "crisisContext": { "event_type": "winter_storm", "severity": "high" }
        }))
        .unwrap();
        assert_eq!(req.days_of_supply, Some(1.2));
        let summary = req.crisis_context.unwrap().into_summary().unwrap();
        assert_eq!(summary.severity, "high");
        assert_eq!(summary.demand_multiplier, 1.0);
    }

    #[test]
    fn crisis_context_defaults() {
        let ctx = CrisisContext {
            is_crisis: None,
            event_type: "flood".to_string(),
            severity: None,
            demand_multiplier: Some(2.0),
            description: None,
        };
        let summary = ctx.into_summary().unwrap();
        assert_eq!(summary.severity, "medium");
        assert_eq!(summary.demand_increase_pct, 100.0);
    }

    #[test]
    fn no_crisis_context_is_dropped() {
        let req: GenerateEmailsRequest = serde_json::from_value(json!({
            "category": "protein",
            "daysOfSupply": 1.2,
            "crisisContext": {
                "is_crisis": false,
                "event_type": "none",
                "severity": "low",
                "demand_multiplier": 1.0,
                "reasoning": "No crisis indicators found"
            }
        }))
        .unwrap();
        assert!(req.crisis_context.unwrap().into_summary().is_none());

        let ctx: CrisisContext = serde_json::from_value(json!({
            "isCrisis": true,
            "event_type": "heat_wave",
            "demand_multiplier": 1.5
        }))
        .unwrap();
        assert_eq!(ctx.into_summary().unwrap().event_type, "heat_wave");
    }
}
