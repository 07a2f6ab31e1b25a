//! Error handling for tiklink

use thiserror::Error;

/// Closed error taxonomy exposed at the resolution boundary.
///
/// The resolution service is the only place that produces these; callers
/// (HTTP layer, request controller) treat every kind uniformly as
/// "show the message, allow resubmission".
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Invalid URL: {0}")]
    InvalidInput(String),

    #[error("Extraction engine unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("No video data found: {0}")]
    NoData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors local to the extraction engine boundary.
///
/// Transport and decode failures are kept apart so the resolution service
/// can classify them into the public taxonomy without string matching.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("engine response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
