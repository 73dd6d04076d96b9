use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pantry_ai::{AiError, ComposerConfig, CrisisClassifier, OutreachBrief, TextGenerator};
use pantry_api::app::{build_app, services::AppServices};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Deterministic stand-in for the language backend.
///
/// Outreach replies use the labelled format; supplier `broken` always fails.
/// Scenarios mentioning "storm" are classified as a winter storm.
struct StubBackend;

#[async_trait]
impl TextGenerator for StubBackend {
    async fn generate(&self, brief: &OutreachBrief) -> Result<String, AiError> {
        if brief.supplier_id.as_str() == "broken" {
            return Err(AiError::Unavailable("stub failure".to_string()));
        }
        let crisis = brief
            .crisis
            .as_ref()
            .map(|c| format!(" ({} expected)", c.event_label()))
            .unwrap_or_default();
        Ok(format!(
            "SUBJECT: {} needed{}\nBODY:\nDear {},\nwe are short on {}.",
            brief.need.category,
            crisis,
            brief.supplier_name,
            brief.need.specific_items.join(", ")
        ))
    }
}

#[async_trait]
impl CrisisClassifier for StubBackend {
    async fn classify(&self, scenario: &str) -> Result<String, AiError> {
        if scenario.contains("storm") {
            Ok("```json\n{\"is_crisis\": true, \"event_type\": \"winter_storm\", \"severity\": \"high\", \"demand_multiplier\": 2.5, \"reasoning\": \"storm warning\"}\n```".to_string())
        } else {
            Ok(r#"{"is_crisis": false, "event_type": "none", "severity": "low", "demand_multiplier": 1.0, "reasoning": "quiet"}"#.to_string())
        }
    }
}

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    async fn with_stub() -> Self {
        let stub = Arc::new(StubBackend);
        let composer = ComposerConfig {
            batch_size: 5,
            call_timeout: Duration::from_secs(5),
        };
        Self::spawn(AppServices::new(stub.clone(), stub, composer)).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(format!("{}/api/{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        let body = res.json().await.unwrap();
        (status, body)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

const REFERENCE: &str = "2025-11-16";

fn inventory() -> Value {
    json!({
        "inv_001": { "name": "Chicken Breast", "foodCategory": "protein", "quantity": 10, "unitType": "lbs", "bestByDate": "2025-11-18" },
        "inv_002": { "item_name": "Rice", "category": "grain", "quantity": "900", "perish_date": "2026-05-01" },
        "inv_003": { "name": "Mystery", "quantity": 4 }
    })
}

fn analytics() -> Value {
    json!({ "averageDailyDemand": { "protein": 5, "grain": 90 } })
}

fn suppliers() -> Value {
    json!([
        { "supplierId": "cold_farm", "name": "Cold Farm", "email": "cold@example.com" },
        { "supplierId": "warm_dairy", "name": "Warm Dairy", "email": "warm@example.com", "lastContactDate": "2025-09-01" },
        { "supplierId": "hot_market", "name": "Hot Market", "email": "hot@example.com", "lastContactDate": "2025-11-10",
          "donationHistory": [{ "date": "2025-11-10", "items": ["chicken"], "quantity": 40, "unit": "lbs" }] },
        { "supplier_id": "veg_only", "supplier_name": "Veg Only", "contact_email": "veg@example.com",
          "preferred_donation_categories": ["vegetable"], "last_contact_date": "2025-11-15" }
    ])
}

#[tokio::test]
async fn health_reports_ok_and_tags_request_id() {
    let srv = TestServer::with_stub().await;
    let res = srv
        .client
        .get(format!("{}/api/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_inventory_flags_critical_and_expiring_stock() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv
        .post(
            "analyze-inventory",
            json!({ "inventory": inventory(), "analytics": analytics(), "reference_date": REFERENCE }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let critical = body["critical_categories"].as_array().unwrap();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0]["category"], "protein");
    assert_eq!(critical[0]["status"], "CRITICAL");
    assert_eq!(critical[0]["days_of_supply_rounded"], 2.0);
    assert_eq!(body["supply_gaps"]["grain"]["status"], "OK");

    let expiring = body["expiring_items"].as_array().unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0]["name"], "Chicken Breast");
    assert_eq!(expiring[0]["days_until_expiration"], 2);

    // The uncategorized record is rejected, not analyzed.
    assert_eq!(body["active_item_count"], 2);
    assert_eq!(body["rejected"][0]["key"], "inv_003");
}

#[tokio::test]
async fn missing_inventory_is_a_bad_request() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv.post("analyze-inventory", json!({ "analytics": analytics() })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_data");
}

#[tokio::test]
async fn priority_items_are_ranked_and_truncated() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv
        .post(
            "priority-items",
            json!({ "inventory": inventory(), "analytics": analytics(), "reference_date": REFERENCE, "top_n": 1 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["items"][0]["name"], "Chicken Breast");
    assert_eq!(body["items"][0]["priority"], 80.0);
}

#[tokio::test]
async fn suppliers_are_segmented_by_last_contact() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv
        .post("segment-suppliers", json!({ "suppliers": suppliers(), "reference_date": REFERENCE }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["counts"], json!({ "hot": 2, "warm": 1, "cold": 1 }));
    assert_eq!(body["warm"][0]["id"], "warm_dairy");
    assert_eq!(body["cold"][0]["tier"], "cold");
}

#[tokio::test]
async fn generate_emails_orders_by_tier_and_isolates_failures() {
    let srv = TestServer::with_stub().await;
    let mut list = suppliers().as_array().unwrap().clone();
    list.push(json!({ "supplierId": "broken", "name": "Broken", "email": "b@example.com", "lastContactDate": "2025-11-01" }));

    let (status, body) = srv
        .post(
            "generate-emails",
            json!({
                "category": "protein",
                "daysOfSupply": 2.0,
                "inventory": inventory(),
                "suppliers": list,
                "reference_date": REFERENCE
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    let emails = body["emails"].as_array().unwrap();
    let ids: Vec<&str> = emails.iter().map(|e| e["supplier_id"].as_str().unwrap()).collect();
    // veg_only does not accept protein.
    assert_eq!(ids, vec!["hot_market", "broken", "warm_dairy", "cold_farm"]);

    assert_eq!(emails[0]["subject"], "protein needed");
    assert_eq!(emails[0]["body"], "Dear Hot Market,\nwe are short on Chicken Breast.");
    assert_eq!(emails[0]["urgency"], "urgent");
    assert!(emails[0]["fallback"].is_null());

    assert_eq!(emails[1]["subject"], "[Subject missing]");
    assert_eq!(emails[1]["body"], "[Body missing]");
    assert!(emails[1]["fallback"].is_string());
}

#[tokio::test]
async fn generate_emails_requires_a_category() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv
        .post(
            "generate-emails",
            json!({ "daysOfSupply": 2.0, "inventory": inventory(), "suppliers": suppliers() }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn detect_crisis_prefers_configured_state() {
    let srv = TestServer::with_stub().await;
    let analytics = json!({
        "currentCrisis": { "active": true, "type": "flood", "description": "river over banks", "projectedDemandIncrease": 2.0 }
    });
    let (status, body) = srv
        .post("detect-crisis", json!({ "analytics": analytics, "scenario": "calm day" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_crisis"], true);
    assert_eq!(body["event_type"], "flood");
    assert_eq!(body["severity"], "medium");
    assert_eq!(body["demand_multiplier"], 2.0);

    let graded = json!({
        "currentCrisis": { "active": true, "type": "flood", "severity": "high", "projectedDemandIncrease": 2.0 }
    });
    let (_, body) = srv.post("detect-crisis", json!({ "analytics": graded })).await;
    assert_eq!(body["severity"], "high");
}

#[tokio::test]
async fn detect_crisis_classifies_scenarios() {
    let srv = TestServer::with_stub().await;

    let (_, storm) = srv
        .post("detect-crisis", json!({ "scenario": "Major winter storm warning" }))
        .await;
    assert_eq!(storm["is_crisis"], true);
    assert_eq!(storm["event_type"], "winter_storm");
    assert_eq!(storm["demand_multiplier"], 2.5);

    let (_, calm) = srv.post("detect-crisis", json!({})).await;
    assert_eq!(calm["is_crisis"], false);
    assert_eq!(calm["demand_multiplier"], 1.0);
}

#[tokio::test]
async fn no_crisis_signal_is_not_passed_to_outreach() {
    let srv = TestServer::with_stub().await;
    let (_, calm) = srv
        .post("detect-crisis", json!({ "scenario": "quiet week" }))
        .await;
    assert_eq!(calm["is_crisis"], false);

    let (status, body) = srv
        .post(
            "generate-emails",
            json!({
                "category": "protein",
                "daysOfSupply": 2.0,
                "crisisContext": calm,
                "inventory": inventory(),
                "suppliers": suppliers(),
                "reference_date": REFERENCE
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let emails = body["emails"].as_array().unwrap();
    assert!(!emails.is_empty());
    assert!(emails.iter().all(|e| e["subject"] == "protein needed"));
}

#[tokio::test]
async fn dashboard_summarizes_inventory() {
    let srv = TestServer::with_stub().await;
    let distributions = json!({
        "d1": { "timestamp": "2025-11-14T10:00:00Z", "recipientName": "A", "householdSize": 3, "items": [] },
        "d2": { "timestamp": "2025-11-15T10:00:00Z", "recipientName": "B", "householdSize": 2, "items": [] }
    });
    let (status, body) = srv
        .post(
            "dashboard",
            json!({
                "inventory": inventory(),
                "analytics": analytics(),
                "distributions": distributions,
                "reference_date": REFERENCE
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active_items"], 2);
    assert_eq!(body["expiring_count"], 1);
    assert_eq!(body["low_stock_categories"][0]["category"], "protein");
    assert_eq!(body["recent_distributions"][0]["id"], "d2");
}

#[tokio::test]
async fn full_workflow_drafts_outreach_for_most_critical_category() {
    let srv = TestServer::with_stub().await;
    let (status, body) = srv
        .post(
            "full-workflow",
            json!({
                "inventory": inventory(),
                "analytics": analytics(),
                "suppliers": suppliers(),
                "scenario": "winter storm incoming",
                "reference_date": REFERENCE
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crisis"]["event_type"], "winter_storm");
    assert_eq!(body["email_count"], 3);
    assert_eq!(body["emails"][0]["subject"], "protein needed (winter storm expected)");
    assert_eq!(body["analysis"]["critical_categories"][0]["category"], "protein");
}

#[tokio::test]
async fn offline_backend_falls_back_to_placeholders() {
    let srv = TestServer::spawn(AppServices::offline(ComposerConfig::default())).await;
    let (status, body) = srv
        .post(
            "generate-emails",
            json!({
                "category": "protein",
                "daysOfSupply": 1.0,
                "inventory": inventory(),
                "suppliers": suppliers(),
                "reference_date": REFERENCE
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    for email in body["emails"].as_array().unwrap() {
        assert_eq!(email["subject"], "[Subject missing]");
        assert!(email["fallback"].is_string());
    }
}
