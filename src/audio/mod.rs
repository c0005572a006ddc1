//! Audio output: playback sink and WAV file writing.

mod sink;
mod writer;

pub use sink::{RodioSink, SinkError};
pub use writer::write_wav;

/// Trait for emitting a synthesized waveform audibly.
///
/// Abstracted so tests can record playback calls instead of touching an
/// audio device.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink {
    /// Play WAV audio data, blocking until playback completes.
    fn play(&self, wav: &[u8]) -> Result<(), SinkError>;
}
