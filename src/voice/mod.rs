//! Voice sample discovery for the configured sample directory.
//!
//! Reference samples are plain WAV files dropped into one directory; this
//! module enumerates them and validates a sample before it becomes active.

mod locator;

pub use locator::{SampleLocator, VoiceError, VoiceSample};
