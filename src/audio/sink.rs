//! Playback sink backed by rodio.

use std::io::Cursor;

use thiserror::Error;

use super::AudioSink;

/// Errors that can occur during audio playback.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("No audio output device: {0}")]
    DeviceUnavailable(String),

    #[error("Could not decode waveform: {0}")]
    Decode(String),
}

/// Plays WAV audio through the default output device.
pub struct RodioSink;

impl RodioSink {
    pub fn new() -> Self {
        Self
    }
}

impl AudioSink for RodioSink {
    fn play(&self, wav: &[u8]) -> Result<(), SinkError> {
        let (_stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| SinkError::DeviceUnavailable(e.to_string()))?;

        let sink = rodio::Sink::try_new(&handle)
            .map_err(|e| SinkError::DeviceUnavailable(e.to_string()))?;

        let source = rodio::Decoder::new(Cursor::new(wav.to_vec()))
            .map_err(|e| SinkError::Decode(e.to_string()))?;

        sink.append(source);
        // Blocks until playback finishes; one utterance at a time.
        sink.sleep_until_end();

        Ok(())
    }
}

impl Default for RodioSink {
    fn default() -> Self {
        Self::new()
    }
}
