//! Raw data structures returned by the extraction engine

use serde::{Deserialize, Serialize};

/// Field map of the engine's result payload.
///
/// The payload shape is engine-defined and has shifted between versions, so
/// it is kept as an opaque JSON map and interpreted by the normalizer
/// against configured candidate field names.
pub type RawFields = serde_json::Map<String, serde_json::Value>;

/// Envelope the extraction engine answers with.
///
/// Only the envelope is stable; `result` is untrusted input and any of its
/// fields may be missing, null, or of unexpected shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEngineResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<RawFields>,
}

impl RawEngineResult {
    /// True when the engine answered but flagged the attempt as failed.
    pub fn is_engine_error(&self) -> bool {
        self.status.as_deref() == Some("error")
    }
}

/// Engine API version selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineVersion {
    V1,
    V2,
    V3,
}

impl EngineVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineVersion::V1 => "v1",
            EngineVersion::V2 => "v2",
            EngineVersion::V3 => "v3",
        }
    }
}
