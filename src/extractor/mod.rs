//! Extraction engine boundary

pub mod models;
pub mod remote;
pub mod traits;

pub use models::{EngineVersion, RawEngineResult, RawFields};
pub use remote::RemoteEngine;
pub use traits::ExtractionEngine;
