//! Audio playback engine.
//!
//! [`AudioEngine`] is the seam the transport machine drives; the production
//! implementation ([`RodioEngine`]) decodes and mixes with `rodio`.

mod backend;
mod output;

pub use backend::{AudioEngine, EngineError};
pub use output::RodioEngine;
