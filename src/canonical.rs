//! URL canonicalization
//!
//! Turns an arbitrary user-supplied link into a resolvable target URL.
//! Links on the alternate domain redirect to the canonical one; the probe
//! follows exactly one redirect and the host token is rewritten. A failed
//! probe degrades to the original string, never to an error, since the
//! engine may still resolve the alternate-domain URL directly.

use crate::utils::error::ResolveError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// A validated, resolvable request target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub target_url: String,
    pub is_alternate_domain: bool,
}

/// Header-only redirect lookup
///
/// Sits at a trait seam so tests can stand in for the network.
#[async_trait]
pub trait RedirectProbe: Send + Sync {
    /// Issues a HEAD-equivalent request and returns the redirect target
    async fn resolve_location(&self, url: &str) -> Result<String>;
}

/// Redirect probe backed by reqwest
///
/// Auto-following is disabled so exactly one redirect is observed; only the
/// `Location` header of the first response is read.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectProbe for HttpProbe {
    async fn resolve_location(&self, url: &str) -> Result<String> {
        let response = self.client.head(url).send().await?;

        if response.status().is_redirection() {
            if let Some(location) = response
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
            {
                return Ok(location.to_string());
            }
        }

        Err(anyhow!("no redirect location returned for {}", url))
    }
}

/// True when the input carries a recognizable domain token.
///
/// Shared between canonicalization and the request controller's input
/// validation so both reject the same links.
pub fn is_supported_link(input: &str, canonical_token: &str, alternate_token: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty()
        && (trimmed.contains(canonical_token) || trimmed.contains(alternate_token))
}

/// URL canonicalizer
pub struct Canonicalizer {
    probe: Arc<dyn RedirectProbe>,
    canonical_token: String,
    alternate_token: String,
}

impl Canonicalizer {
    pub fn new(
        probe: Arc<dyn RedirectProbe>,
        canonical_token: impl Into<String>,
        alternate_token: impl Into<String>,
    ) -> Self {
        Self {
            probe,
            canonical_token: canonical_token.into(),
            alternate_token: alternate_token.into(),
        }
    }

    /// Validate and normalize a raw input string. Single attempt, no retries.
    pub async fn canonicalize(&self, raw: &str) -> Result<CanonicalRequest, ResolveError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ResolveError::InvalidInput("url is required".to_string()));
        }

        if !is_supported_link(trimmed, &self.canonical_token, &self.alternate_token) {
            return Err(ResolveError::InvalidInput(format!(
                "unsupported link: {}",
                trimmed
            )));
        }

        if !trimmed.contains(&self.alternate_token) {
            return Ok(CanonicalRequest {
                target_url: trimmed.to_string(),
                is_alternate_domain: false,
            });
        }

        match self.probe.resolve_location(trimmed).await {
            Ok(resolved) => {
                let target_url = resolved.replacen(&self.alternate_token, &self.canonical_token, 1);
                debug!("Rewrote alternate-domain link to: {}", target_url);
                Ok(CanonicalRequest {
                    target_url,
                    is_alternate_domain: true,
                })
            }
            Err(e) => {
                // Degrade to the original link; the engine may still
                // resolve it directly.
                warn!("Redirect probe failed, keeping original link: {}", e);
                Ok(CanonicalRequest {
                    target_url: trimmed.to_string(),
                    is_alternate_domain: true,
                })
            }
        }
    }
}
