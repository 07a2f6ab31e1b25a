//! tiklink library

pub mod backend;
pub mod banner;
pub mod canonical;
pub mod extractor;
pub mod normalize;
pub mod resolver;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use backend::{ControllerActor, ControllerCommand, ControllerEvent, Phase, RequestOutcome};
pub use banner::{BannerConfig, BannerNetwork, BannerPhase, BannerSlot, ScriptLoader};
pub use canonical::{CanonicalRequest, Canonicalizer, HttpProbe, RedirectProbe};
pub use extractor::{EngineVersion, ExtractionEngine, RawEngineResult, RemoteEngine};
pub use normalize::{Author, ContentType, Normalizer, Variant, VariantKind, VideoResult};
pub use resolver::ResolveService;
pub use utils::{AppSettings, EngineError, ResolveError, VariantCandidates};
