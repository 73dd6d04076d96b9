//! Service wiring: the engine configuration and the external backends,
//! shared by every handler.

use std::sync::Arc;

use pantry_ai::{ComposerConfig, CrisisClassifier, CrisisDetector, DisabledGenerator, OutreachComposer, TextGenerator};
use pantry_inventory::AnalysisConfig;

use crate::config::ApiConfig;
use crate::textgen::HttpTextGenerator;

#[derive(Clone)]
pub struct AppServices {
    pub analysis: AnalysisConfig,
    pub composer: OutreachComposer,
    pub detector: CrisisDetector,
}

impl AppServices {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        classifier: Arc<dyn CrisisClassifier>,
        composer: ComposerConfig,
    ) -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            composer: OutreachComposer::new(generator).with_config(composer),
            detector: CrisisDetector::new(classifier).with_timeout(composer.call_timeout),
        }
    }

    pub fn with_analysis(mut self, analysis: AnalysisConfig) -> Self {
        self.analysis = analysis;
        self
    }

    /// Backends without any external service: outreach falls back to
    /// placeholders and crisis detection relies on configured state only.
    pub fn offline(composer: ComposerConfig) -> Self {
        Self::new(Arc::new(DisabledGenerator), Arc::new(DisabledGenerator), composer)
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let Some(url) = config.textgen_url.as_deref() else {
            tracing::warn!("PANTRY_TEXTGEN_URL not set; outreach will use placeholder text");
            return Ok(Self::offline(config.composer()));
        };
        // The composer enforces the per-call timeout; the client timeout is a backstop.
        let http = Arc::new(HttpTextGenerator::new(url, config.textgen_timeout * 2)?);
        tracing::info!(textgen_url = url, "text generation backend configured");
        Ok(Self::new(http.clone(), http, config.composer()))
    }
}
