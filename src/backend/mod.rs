//! Client request controller

pub mod actor;
pub mod messages;

pub use actor::{ControllerActor, Phase};
pub use messages::{ControllerCommand, ControllerEvent, RequestOutcome};
