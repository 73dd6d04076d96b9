//! Crisis signal: whether an event is currently inflating demand.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use pantry_inventory::CrisisState;

use crate::composer::DEFAULT_CALL_TIMEOUT;
use crate::generator::CrisisClassifier;
use crate::reply::strip_code_fence;
use crate::result::AiError;

pub const DEFAULT_SEVERITY: &str = "medium";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisSignal {
    pub is_crisis: bool,
    pub event_type: String,
    pub severity: String,
    pub demand_multiplier: f64,
    pub reasoning: String,
}

impl CrisisSignal {
    pub fn none() -> Self {
        Self {
            is_crisis: false,
            event_type: "none".to_string(),
            severity: "low".to_string(),
            demand_multiplier: 1.0,
            reasoning: "No crisis indicators found".to_string(),
        }
    }

    /// Signal for a configured crisis state (inactive states yield `none`).
    pub fn from_state(state: &CrisisState) -> Self {
        if !state.active {
            return Self::none();
        }
        let reasoning = if state.description.is_empty() {
            format!("Active {} crisis in analytics", state.kind)
        } else {
            state.description.clone()
        };
        Self {
            is_crisis: true,
            event_type: state.kind.clone(),
            severity: severity_of(state),
            demand_multiplier: state.effective_multiplier(),
            reasoning,
        }
    }

    /// Parse a classifier reply (JSON, optionally code-fenced).
    ///
    /// Missing fields fall back to the `none` values; a multiplier below 1 is
    /// raised to 1.
    pub fn parse(raw: &str) -> Result<Self, AiError> {
        let text = strip_code_fence(raw);
        let value: JsonValue =
            serde_json::from_str(text).map_err(|e| AiError::MalformedReply(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| AiError::MalformedReply("expected a JSON object".to_string()))?;

        let none = Self::none();
        let str_field = |key: &str, default: String| {
            obj.get(key)
                .and_then(JsonValue::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map_or(default, str::to_string)
        };
        let is_crisis = obj.get("is_crisis").and_then(JsonValue::as_bool).unwrap_or(false);
        let demand_multiplier = obj
            .get("demand_multiplier")
            .and_then(JsonValue::as_f64)
            .filter(|m| m.is_finite() && *m >= 1.0)
            .unwrap_or(1.0);

        Ok(Self {
            is_crisis,
            event_type: str_field("event_type", none.event_type),
            severity: str_field("severity", none.severity),
            demand_multiplier: if is_crisis { demand_multiplier } else { 1.0 },
            reasoning: str_field("reasoning", none.reasoning),
        })
    }

    /// Equivalent crisis state for demand analysis; `None` when no crisis.
    pub fn to_state(&self) -> Option<CrisisState> {
        self.is_crisis.then(|| {
            CrisisState::active(self.event_type.clone(), self.demand_multiplier)
                .with_description(self.reasoning.clone())
                .with_severity(self.severity.clone())
        })
    }
}

/// Recorded severity, or [`DEFAULT_SEVERITY`].
pub(crate) fn severity_of(state: &CrisisState) -> String {
    state.severity.clone().unwrap_or_else(|| DEFAULT_SEVERITY.to_string())
}

/// Resolve the current crisis signal.
///
/// An active configured crisis wins; otherwise a classifier reply is parsed
/// (unparsable replies are logged and ignored); otherwise no crisis.
pub fn detect_crisis(configured: Option<&CrisisState>, classifier_reply: Option<&str>) -> CrisisSignal {
    if let Some(state) = configured.filter(|s| s.active) {
        return CrisisSignal::from_state(state);
    }
    match classifier_reply.map(CrisisSignal::parse) {
        Some(Ok(signal)) => signal,
        Some(Err(error)) => {
            tracing::warn!(%error, "ignoring unparsable crisis classification");
            CrisisSignal::none()
        }
        None => CrisisSignal::none(),
    }
}

/// Crisis detection backed by an external classifier.
#[derive(Clone)]
pub struct CrisisDetector {
    classifier: Arc<dyn CrisisClassifier>,
    call_timeout: Duration,
}

impl CrisisDetector {
    pub fn new(classifier: Arc<dyn CrisisClassifier>) -> Self {
        Self {
            classifier,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Configured crisis first; the classifier is consulted only for a
    /// non-blank scenario. Classifier failures mean "no crisis".
    pub async fn detect(&self, configured: Option<&CrisisState>, scenario: Option<&str>) -> CrisisSignal {
        if let Some(state) = configured.filter(|s| s.active) {
            return CrisisSignal::from_state(state);
        }
        let Some(scenario) = scenario.map(str::trim).filter(|s| !s.is_empty()) else {
            return CrisisSignal::none();
        };

        let reply = match tokio::time::timeout(self.call_timeout, self.classifier.classify(scenario)).await {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.call_timeout)),
        };
        match reply {
            Ok(raw) => detect_crisis(None, Some(&raw)),
            Err(error) => {
                tracing::warn!(%error, "crisis classification failed; assuming no crisis");
                CrisisSignal::none()
            }
        }
    }
}
