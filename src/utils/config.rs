//! Application configuration

use crate::banner::BannerConfig;
use crate::extractor::EngineVersion;
use crate::normalize::VariantKind;
use serde::{Deserialize, Serialize};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Server bind address
    pub bind_addr: String,

    /// Server port
    pub port: u16,

    /// Outer HTTP request timeout (seconds). Transport hygiene only; the
    /// resolution path itself carries no timeout.
    pub http_timeout_secs: u64,

    /// Extraction engine endpoint
    pub engine_endpoint: String,

    /// Engine API version to request
    pub engine_version: EngineVersion,

    /// Domain token every supported link must carry
    pub canonical_token: String,

    /// Redirecting secondary domain token
    pub alternate_token: String,

    /// Path segment that marks a story link
    pub story_segment: String,

    /// Base URL of the download proxy used to build save-as links
    pub download_proxy: Option<String>,

    /// Candidate raw-field names per variant kind
    pub candidates: VariantCandidates,

    /// Banner slot configuration
    pub banner: BannerConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8320,
            http_timeout_secs: 30,
            engine_endpoint: "http://127.0.0.1:8900/download".to_string(),
            engine_version: EngineVersion::V3,
            canonical_token: "tiktok.com".to_string(),
            alternate_token: "douyin".to_string(),
            story_segment: "/story/".to_string(),
            download_proxy: Some("https://dl.tiktokiocdn.workers.dev/api/download".to_string()),
            candidates: VariantCandidates::default(),
            banner: BannerConfig::default(),
        }
    }
}

/// Ordered candidate raw-field names for each variant kind.
///
/// The engine has emitted the same media URL under different keys across
/// versions; the first candidate holding a non-empty value wins. New engine
/// field names are added here, not in the normalizer's control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCandidates {
    pub sd: Vec<String>,
    pub hd: Vec<String>,
    pub watermarked: Vec<String>,
    pub audio: Vec<String>,
}

impl VariantCandidates {
    /// Candidate field names for one variant kind, in evaluation order
    pub fn for_kind(&self, kind: VariantKind) -> &[String] {
        match kind {
            VariantKind::Sd => &self.sd,
            VariantKind::Hd => &self.hd,
            VariantKind::Watermarked => &self.watermarked,
            VariantKind::AudioOnly => &self.audio,
        }
    }
}

impl Default for VariantCandidates {
    fn default() -> Self {
        Self {
            sd: vec!["videoSD".to_string(), "video".to_string()],
            hd: vec!["videoHD".to_string(), "video_hd".to_string()],
            watermarked: vec!["videoWatermark".to_string()],
            audio: vec!["music".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert!(config.port > 0);
        assert!(config.http_timeout_secs > 0);
        assert_eq!(config.canonical_token, "tiktok.com");
        assert_eq!(config.alternate_token, "douyin");
        assert!(config.download_proxy.is_some());
    }

    #[test]
    fn test_default_candidates_cover_all_kinds() {
        let candidates = VariantCandidates::default();
        assert!(!candidates.sd.is_empty());
        assert!(!candidates.hd.is_empty());
        assert!(!candidates.watermarked.is_empty());
        assert!(!candidates.audio.is_empty());
        assert_eq!(candidates.hd.first().map(String::as_str), Some("videoHD"));
    }
}
