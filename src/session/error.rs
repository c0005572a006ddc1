//! Session-level error kinds.

use thiserror::Error;

use super::params::ParamError;
use crate::audio::SinkError;
use crate::engine::EngineError;
use crate::voice::VoiceError;

/// Errors surfaced at the session controller boundary.
///
/// In interactive mode every kind is caught, reported, and the loop continues;
/// in one-shot mode any kind aborts the process with a non-zero exit code.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ParamError),

    #[error("Nothing to synthesize: input is empty")]
    EmptyInput,

    #[error("Voice sample error: {0}")]
    NotFound(#[from] VoiceError),

    #[error("Synthesis error: {0}")]
    Engine(#[from] EngineError),

    #[error("Playback error: {0}")]
    Playback(#[from] SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown directive: /{0} (try /help)")]
    UnknownDirective(String),
}
