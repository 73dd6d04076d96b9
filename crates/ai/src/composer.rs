//! Outreach composition: one generation call per selected supplier, run
//! concurrently, each bounded by a timeout and isolated from the others.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;

use pantry_core::Category;
use pantry_inventory::{AnalysisConfig, InventoryItem};
use pantry_suppliers::{suppliers_for_category, RankedSupplier, Supplier};

use crate::brief::{CrisisSummary, NeedSummary, OutreachBrief};
use crate::generator::TextGenerator;
use crate::reply::{parse_reply, MessageText};
use crate::result::{AiError, OutreachResult};

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Maximum suppliers contacted per batch.
    pub batch_size: usize,
    /// Bound on each individual generation call.
    pub call_timeout: Duration,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }
}

#[derive(Clone)]
pub struct OutreachComposer {
    generator: Arc<dyn TextGenerator>,
    config: ComposerConfig,
}

impl OutreachComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            config: ComposerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ComposerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Briefs for the first `batch_size` candidates, in candidate order.
    pub fn briefs(
        &self,
        need: &NeedSummary,
        candidates: &[RankedSupplier],
        crisis: Option<&CrisisSummary>,
    ) -> Vec<OutreachBrief> {
        candidates
            .iter()
            .take(self.config.batch_size)
            .map(|c| OutreachBrief::build(c, need, crisis))
            .collect()
    }

    /// Compose outreach for up to `batch_size` candidates.
    ///
    /// Output order matches candidate order. A failed or timed-out call only
    /// affects its own supplier, which receives placeholder text.
    pub async fn compose(
        &self,
        need: &NeedSummary,
        candidates: &[RankedSupplier],
        crisis: Option<&CrisisSummary>,
    ) -> Vec<OutreachResult> {
        let briefs = self.briefs(need, candidates, crisis);
        tracing::info!(
            category = %need.category,
            requested = candidates.len(),
            batch = briefs.len(),
            "composing supplier outreach"
        );
        join_all(briefs.iter().map(|brief| self.compose_one(brief))).await
    }

    async fn compose_one(&self, brief: &OutreachBrief) -> OutreachResult {
        let outcome = match tokio::time::timeout(self.config.call_timeout, self.generator.generate(brief)).await {
            Ok(result) => result,
            Err(_) => Err(AiError::Timeout(self.config.call_timeout)),
        };

        let (message, fallback) = match outcome {
            Ok(raw) => {
                let message = parse_reply(&raw).into_message();
                let fallback = (!message.missing.is_empty())
                    .then(|| format!("reply missing {}", message.missing.join(" and ")));
                (message, fallback)
            }
            Err(error) => {
                tracing::warn!(
                    supplier_id = %brief.supplier_id,
                    %error,
                    "outreach generation failed; using placeholder text"
                );
                (MessageText::placeholder(), Some(error.to_string()))
            }
        };

        OutreachResult {
            supplier_id: brief.supplier_id.clone(),
            supplier_name: brief.supplier_name.clone(),
            supplier_email: brief.supplier_email.clone(),
            lead_tier: brief.lead_tier,
            urgency: brief.urgency,
            need_status: brief.need.status,
            subject: message.subject,
            body: message.body,
            fallback,
        }
    }

    /// End-to-end outreach for one category: select suppliers that accept it
    /// (hot before warm before cold), build the need, and compose.
    #[allow(clippy::too_many_arguments)]
    pub async fn generate_outreach(
        &self,
        category: &Category,
        days_of_supply: f64,
        items: &[InventoryItem],
        suppliers: &[Supplier],
        crisis: Option<&CrisisSummary>,
        reference: DateTime<Utc>,
        analysis: &AnalysisConfig,
    ) -> Vec<OutreachResult> {
        let need = NeedSummary::from_days(category.clone(), days_of_supply, items, analysis);
        let candidates = suppliers_for_category(suppliers, category, reference);
        self.compose(&need, &candidates, crisis).await
    }
}
