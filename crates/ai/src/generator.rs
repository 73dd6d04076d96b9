use async_trait::async_trait;

use crate::brief::OutreachBrief;
use crate::result::AiError;

/// External text-generation capability.
///
/// Implementations receive an immutable brief and return raw reply text
/// (JSON `{subject, body}` or the labelled `SUBJECT:`/`BODY:` form). They must
/// be safe to call concurrently.
#[async_trait]
pub trait TextGenerator: Send + Sync + 'static {
    async fn generate(&self, brief: &OutreachBrief) -> Result<String, AiError>;
}

/// Generator used when no backend is configured: every call is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _brief: &OutreachBrief) -> Result<String, AiError> {
        Err(AiError::Unavailable("no text generation backend configured".to_string()))
    }
}

/// External crisis classifier: reads a free-text scenario (news, alerts) and
/// replies with a JSON crisis assessment, possibly code-fenced.
#[async_trait]
pub trait CrisisClassifier: Send + Sync + 'static {
    async fn classify(&self, scenario: &str) -> Result<String, AiError>;
}

#[async_trait]
impl CrisisClassifier for DisabledGenerator {
    async fn classify(&self, _scenario: &str) -> Result<String, AiError> {
        Err(AiError::Unavailable("no crisis classifier configured".to_string()))
    }
}
