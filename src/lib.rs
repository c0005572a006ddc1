//! voice-clone-rs: Interactive voice-cloning text-to-speech CLI.
//!
//! This crate provides a command-line interface for synthesizing speech in a
//! target voice from a short reference WAV sample, delegating the acoustic
//! modeling to a local synthesis backend.

pub mod audio;
pub mod cli;
pub mod engine;
pub mod session;
pub mod voice;
