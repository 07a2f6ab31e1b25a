//! Resolution service
//!
//! Orchestrates canonicalize → engine call → normalize behind one
//! request/response contract, translating every failure mode into the
//! closed `ResolveError` taxonomy. Stateless and idempotent per call;
//! retry policy belongs to the caller.

use crate::canonical::{Canonicalizer, HttpProbe, RedirectProbe};
use crate::extractor::{EngineVersion, ExtractionEngine, RemoteEngine};
use crate::normalize::{Normalizer, VideoResult};
use crate::utils::config::AppSettings;
use crate::utils::error::{EngineError, ResolveError};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ResolveService {
    canonicalizer: Canonicalizer,
    engine: Arc<dyn ExtractionEngine>,
    normalizer: Normalizer,
    version: EngineVersion,
}

impl ResolveService {
    pub fn new(
        settings: &AppSettings,
        probe: Arc<dyn RedirectProbe>,
        engine: Arc<dyn ExtractionEngine>,
    ) -> Self {
        let canonicalizer = Canonicalizer::new(
            probe,
            settings.canonical_token.clone(),
            settings.alternate_token.clone(),
        );
        let normalizer = Normalizer::new(settings.candidates.clone(), settings.story_segment.clone());

        Self {
            canonicalizer,
            engine,
            normalizer,
            version: settings.engine_version,
        }
    }

    /// Wire up the production collaborators from settings
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let probe = Arc::new(HttpProbe::new()?);
        let engine = Arc::new(RemoteEngine::new(settings.engine_endpoint.clone()));
        info!("Using extraction engine at: {}", engine.endpoint());
        Ok(Self::new(settings, probe, engine))
    }

    /// Resolve a raw input link into the canonical result, short-circuiting
    /// on the first failure. No retries.
    pub async fn resolve(&self, raw: &str) -> Result<VideoResult, ResolveError> {
        let request = self.canonicalizer.canonicalize(raw).await?;
        debug!(
            "Resolving {} via {}",
            request.target_url,
            self.engine.id()
        );

        let raw_result = self
            .engine
            .fetch(&request.target_url, self.version)
            .await
            .map_err(|e| {
                let message = e.to_string();
                match e {
                    EngineError::Transport(_) => ResolveError::UpstreamUnavailable(message),
                    EngineError::Decode(_) => ResolveError::Internal(message),
                }
            })?;

        self.normalizer.normalize(&raw_result, &request.target_url)
    }
}
