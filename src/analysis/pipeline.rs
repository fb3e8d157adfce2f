// Per-request menu analysis pipeline

use super::extract::extract_analysis;
use super::mock::sample_analysis;
use super::models::{AnalysisSource, MenuAnalysis};
use super::normalize::normalize_analysis;
use super::preprocess::prepare_image;
use super::prompt::MENU_ANALYSIS_PROMPT;
use crate::config::ProviderConfig;
use crate::error::Result;
use crate::metrics;
use crate::provider::{FallbackCaller, InferenceProvider, OpenRouterClient};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Turns a stored menu photo into a [`MenuAnalysis`].
///
/// Only preprocessing can fail. Once the image is prepared, the result is
/// either a normalized model answer or the fixed sample analysis.
pub struct MenuAnalyzer<P> {
    caller: FallbackCaller<P>,
}

impl<P: InferenceProvider> MenuAnalyzer<P> {
    pub fn new(caller: FallbackCaller<P>) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &FallbackCaller<P> {
        &self.caller
    }

    #[instrument(skip(self, image_path), fields(path = %image_path.display()))]
    pub async fn analyze(&self, image_path: &Path) -> Result<MenuAnalysis> {
        let started = Instant::now();
        let image = match prepare_image(image_path).await {
            Ok(image) => image,
            Err(e) => {
                metrics::record_analysis("error");
                return Err(e);
            }
        };
        metrics::record_preprocess(started.elapsed().as_secs_f64());

        let (analysis, source) = match self
            .caller
            .first_accepted(MENU_ANALYSIS_PROMPT, &image, extract_analysis)
            .await
        {
            Some(accepted) => {
                info!("Using analysis from {}", accepted.model);
                (normalize_analysis(&accepted.value), AnalysisSource::Model)
            }
            None => {
                info!("Falling back to sample analysis");
                (sample_analysis(), AnalysisSource::Mock)
            }
        };

        metrics::record_analysis(source.as_str());
        Ok(analysis)
    }
}

impl MenuAnalyzer<OpenRouterClient> {
    /// Analyzer over the configured OpenRouter-compatible endpoint.
    ///
    /// The credential is resolved here, once; without one no request ever
    /// leaves the process.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.credential();
        if api_key.is_none() {
            warn!("Provider API key not set, menu analysis will return sample data");
        }

        let caller = FallbackCaller::new(
            OpenRouterClient::new(config)?,
            config.models.clone(),
            api_key,
            Duration::from_secs(config.timeout_seconds),
        );
        Ok(Self::new(caller))
    }
}
