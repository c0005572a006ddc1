//! Synthesis engine abstraction.
//!
//! The acoustic model runs in an external server process; this module defines
//! the capability trait the session depends on and the HTTP client that talks
//! to the real backend. Tests substitute a mock engine.

mod http;
mod types;

pub use http::HttpEngine;
pub use types::{EngineError, HealthResponse, UtteranceRequest};

/// Trait for the synthesis backend.
///
/// Abstracts the model server so the session controller can be tested against
/// a deterministic engine.
#[cfg_attr(test, mockall::automock)]
pub trait SynthesisEngine: Send + Sync {
    /// Check backend health status.
    fn health(&self) -> Result<HealthResponse, EngineError>;

    /// Synthesize one utterance.
    ///
    /// # Returns
    /// Raw WAV audio data in the cloned voice.
    fn synthesize(&self, request: &UtteranceRequest) -> Result<Vec<u8>, EngineError>;
}
