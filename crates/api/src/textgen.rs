//! HTTP adapter for the external language backend.
//!
//! Wire protocol: `POST {base}/outreach` with the [`OutreachBrief`] as JSON,
//! and `POST {base}/crisis` with `{"scenario": ...}`. Both answer with the
//! raw generated text, either as a plain body or as `{"text": ...}`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use pantry_ai::{AiError, CrisisClassifier, OutreachBrief, TextGenerator};

#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TextEnvelope {
    text: String,
}

impl HttpTextGenerator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn post(&self, path: &str, payload: serde_json::Value) -> Result<String, AiError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Unavailable(format!("{url} answered {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::MalformedReply(e.to_string()))?;
        Ok(unwrap_envelope(body))
    }
}

/// `{"text": ...}` bodies carry the reply in a field; anything else is the reply.
fn unwrap_envelope(body: String) -> String {
    match serde_json::from_str::<TextEnvelope>(&body) {
        Ok(envelope) => envelope.text,
        Err(_) => body,
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, brief: &OutreachBrief) -> Result<String, AiError> {
        let payload = serde_json::to_value(brief).map_err(|e| AiError::InvalidInput(e.to_string()))?;
        self.post("outreach", payload).await
    }
}

#[async_trait]
impl CrisisClassifier for HttpTextGenerator {
    async fn classify(&self, scenario: &str) -> Result<String, AiError> {
        self.post("crisis", json!({ "scenario": scenario })).await
    }
}
