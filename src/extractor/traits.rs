use crate::extractor::models::{EngineVersion, RawEngineResult};
use crate::utils::error::EngineError;
use async_trait::async_trait;

/// Core trait for the extraction engine boundary
///
/// This trait isolates the application from how raw video metadata is
/// actually obtained (remote HTTP engine, in-process scraper, test double).
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Returns a unique identifier for this engine (e.g., "remote-http")
    fn id(&self) -> &'static str;

    /// Fetches the raw, engine-defined payload for a canonical URL
    async fn fetch(
        &self,
        url: &str,
        version: EngineVersion,
    ) -> Result<RawEngineResult, EngineError>;
}
