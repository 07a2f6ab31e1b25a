//! Response normalization
//!
//! Maps the engine's raw, partially-optional payload into the stable
//! `VideoResult` contract. Every downstream field is either a well-typed
//! value or an explicit absence; variant extraction walks configured
//! candidate field names instead of branching on engine versions. Pure and
//! deterministic given identical raw input.

use crate::extractor::models::{RawEngineResult, RawFields};
use crate::utils::config::VariantCandidates;
use crate::utils::error::ResolveError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nickname used when the engine omitted author data
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Classified content kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Story,
    Image,
    Unknown,
}

/// One downloadable rendition of the media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantKind {
    Sd,
    Hd,
    Watermarked,
    AudioOnly,
}

impl VariantKind {
    /// Fixed preference order for the `variants` list
    pub const ORDER: [VariantKind; 4] = [
        VariantKind::Sd,
        VariantKind::Hd,
        VariantKind::Watermarked,
        VariantKind::AudioOnly,
    ];

    pub fn file_extension(&self) -> &'static str {
        match self {
            VariantKind::AudioOnly => "mp3",
            _ => "mp4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub kind: VariantKind,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub avatar: Option<String>,
    pub nickname: String,
}

impl Author {
    fn unknown() -> Self {
        Self {
            avatar: None,
            nickname: UNKNOWN_AUTHOR.to_string(),
        }
    }
}

/// Canonical resolution result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    pub content_type: ContentType,
    pub author: Author,
    pub description: String,
    /// Ordered sd > hd > watermarked > audio-only; never null, may be empty
    pub variants: Vec<Variant>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Response normalizer
///
/// Holds the candidate table and the story path marker so `normalize`
/// itself stays a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Normalizer {
    candidates: VariantCandidates,
    story_segment: String,
}

impl Normalizer {
    pub fn new(candidates: VariantCandidates, story_segment: impl Into<String>) -> Self {
        Self {
            candidates,
            story_segment: story_segment.into(),
        }
    }

    pub fn normalize(
        &self,
        raw: &RawEngineResult,
        request_url: &str,
    ) -> Result<VideoResult, ResolveError> {
        if raw.is_engine_error() {
            let message = raw
                .message
                .clone()
                .unwrap_or_else(|| "extraction engine reported failure".to_string());
            return Err(ResolveError::UpstreamUnavailable(message));
        }

        let fields = raw
            .result
            .as_ref()
            .ok_or_else(|| ResolveError::NoData("engine returned no result payload".to_string()))?;

        // The engine misclassifies story links; the request URL wins.
        let content_type = if request_url.contains(&self.story_segment) {
            ContentType::Story
        } else {
            reported_content_type(fields)
        };

        let author = fields
            .get("author")
            .and_then(Value::as_object)
            .map(|obj| Author {
                avatar: non_empty_string(obj.get("avatar")),
                nickname: non_empty_string(obj.get("nickname"))
                    .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            })
            .unwrap_or_else(Author::unknown);

        let description = non_empty_string(fields.get("desc")).unwrap_or_default();

        let mut variants = Vec::new();
        for kind in VariantKind::ORDER {
            if let Some(url) = self.first_candidate(fields, kind) {
                variants.push(Variant { kind, url });
            }
        }

        let uploaded_at = fields
            .get("create_time")
            .and_then(epoch_seconds)
            .and_then(|secs| DateTime::from_timestamp(secs, 0));

        Ok(VideoResult {
            content_type,
            author,
            description,
            variants,
            uploaded_at,
        })
    }

    /// First configured candidate field holding a usable URL for this kind
    fn first_candidate(&self, fields: &RawFields, kind: VariantKind) -> Option<String> {
        self.candidates
            .for_kind(kind)
            .iter()
            .find_map(|key| candidate_url(fields, key))
    }
}

fn reported_content_type(fields: &RawFields) -> ContentType {
    match fields.get("type").and_then(Value::as_str) {
        Some("story") => ContentType::Story,
        Some("image") => ContentType::Image,
        // An absent classification still means a plain video; Unknown is
        // reserved for values this build does not recognize.
        None | Some("video") => ContentType::Video,
        Some(_) => ContentType::Unknown,
    }
}

/// A candidate value is a non-empty string, or the first element of an
/// ordered collection when the engine emitted one.
fn candidate_url(fields: &RawFields, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Array(items) => items
            .first()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn epoch_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build a save-as link through the download proxy.
///
/// The proxy forces a content-disposition download with the author's name as
/// the filename; url and title travel percent-encoded.
pub fn proxied_download_url(base: &str, variant: &Variant, title: &str) -> String {
    format!(
        "{}?url={}&type=.{}&title={}",
        base,
        urlencoding::encode(&variant.url),
        variant.kind.file_extension(),
        urlencoding::encode(title)
    )
}
