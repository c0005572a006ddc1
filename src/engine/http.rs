//! Blocking HTTP client for a local synthesis model server.

use super::SynthesisEngine;
use super::types::{EngineError, HealthResponse, UtteranceRequest};

const DEFAULT_PORT: u16 = 9270;

/// HTTP-based synthesis engine client.
pub struct HttpEngine {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpEngine {
    /// Create a client for the model server on the given host.
    pub fn new(host: &str) -> Self {
        let base_url = format!("http://{host}:{DEFAULT_PORT}");

        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Get the base URL for this backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the multipart form for one utterance. Parameter names follow the
    /// backend's API: exaggeration and classifier-free guidance weight.
    fn build_form(
        request: &UtteranceRequest,
    ) -> Result<reqwest::blocking::multipart::Form, EngineError> {
        let mut form = reqwest::blocking::multipart::Form::new()
            .text("text", request.text.clone())
            .text("exaggeration", request.params.expressiveness().to_string())
            .text("cfg_weight", request.params.pacing_weight().to_string());

        if let Some(sample) = &request.sample {
            let audio_data = std::fs::read(sample.path())
                .map_err(|_| EngineError::FileNotFound(sample.path().display().to_string()))?;

            let file_part = reqwest::blocking::multipart::Part::bytes(audio_data)
                .file_name(sample.file_name())
                .mime_str("audio/wav")
                .map_err(|e| EngineError::RequestFailed(e.to_string()))?;

            form = form.part("reference", file_part);
        }

        Ok(form)
    }
}

impl SynthesisEngine for HttpEngine {
    fn health(&self) -> Result<HealthResponse, EngineError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EngineError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }

    fn synthesize(&self, request: &UtteranceRequest) -> Result<Vec<u8>, EngineError> {
        let url = format!("{}/synthesize", self.base_url);
        let form = Self::build_form(request)?;

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(EngineError::Synthesis(format!(
                "Status: {}",
                response.status()
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))
    }
}
