//! Synthesis request and backend response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::SynthesisParameters;
use crate::voice::VoiceSample;

/// Errors that can occur when talking to the synthesis backend.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Reference audio not found: {0}")]
    FileNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Synthesis failed: {0}")]
    Synthesis(String),
}

/// Health check response from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub device: String,
}

/// One synthesis call: text, the active reference sample, and a snapshot of
/// the session parameters. Built per utterance and consumed immediately.
#[derive(Debug, Clone)]
pub struct UtteranceRequest {
    pub text: String,
    /// Reference sample to clone; `None` means the backend's default voice.
    pub sample: Option<VoiceSample>,
    pub params: SynthesisParameters,
}

impl UtteranceRequest {
    pub fn new(
        text: impl Into<String>,
        sample: Option<VoiceSample>,
        params: SynthesisParameters,
    ) -> Self {
        Self {
            text: text.into(),
            sample,
            params,
        }
    }
}
