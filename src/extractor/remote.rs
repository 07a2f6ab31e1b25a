//! HTTP client for the remote extraction engine
//!
//! The engine is an external collaborator: it receives a canonical URL plus
//! a version selector and answers with a `{status, result?, message?}`
//! envelope whose payload fields vary across engine versions.

use crate::extractor::models::{EngineVersion, RawEngineResult};
use crate::extractor::traits::ExtractionEngine;
use crate::utils::error::EngineError;
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

/// Extraction engine reached over HTTP
pub struct RemoteEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteEngine {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint the engine is reached at
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ExtractionEngine for RemoteEngine {
    fn id(&self) -> &'static str {
        "remote-http"
    }

    async fn fetch(
        &self,
        url: &str,
        version: EngineVersion,
    ) -> Result<RawEngineResult, EngineError> {
        debug!("Requesting extraction for URL: {}", url);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "url": url, "version": version.as_str() }))
            .send()
            .await?
            .error_for_status()?;

        // Decode from text so envelope decode failures stay distinguishable
        // from transport failures.
        let body = response.text().await?;
        let raw: RawEngineResult = serde_json::from_str(&body).map_err(|e| {
            error!("Engine returned an undecodable body: {}", e);
            e
        })?;

        debug!("Engine answered with status: {:?}", raw.status);
        Ok(raw)
    }
}
