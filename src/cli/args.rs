//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::session::Preset;

/// Voice cloning text-to-speech CLI.
#[derive(Parser, Debug)]
#[command(name = "voice-clone-rs")]
#[command(about = "Synthesize speech in a cloned voice from a reference WAV sample")]
#[command(version)]
pub struct Args {
    /// Text to synthesize; omit to enter interactive mode
    pub text: Option<String>,

    /// Voice sample to clone: an index from --list-samples or a WAV path
    #[arg(short, long)]
    pub voice: Option<String>,

    /// Save output to this WAV file (omit to only play audio)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emotional intensity of delivery (0.0 to 1.0)
    #[arg(long, default_value = "0.5")]
    pub expressiveness: f32,

    /// Guidance weight trading delivery pace against naturalness (0.0 to 1.0)
    #[arg(long, default_value = "0.5")]
    pub pacing_weight: f32,

    /// Apply a named parameter preset, overriding the individual flags
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// List available voice samples and exit
    #[arg(short, long)]
    pub list_samples: bool,

    /// Don't play audio (useful with --output)
    #[arg(long)]
    pub no_play: bool,

    /// Directory containing reference voice samples
    #[arg(long)]
    pub samples_dir: Option<PathBuf>,

    /// Synthesis backend host address
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

/// Voice sample selector: an index into the enumerated sample list, or an
/// explicit file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSelector {
    Index(usize),
    Path(PathBuf),
}

impl SampleSelector {
    /// Parse a selector string. All-digit input is an index; anything else is
    /// treated as a path.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(index) => SampleSelector::Index(index),
            Err(_) => SampleSelector::Path(PathBuf::from(input)),
        }
    }
}
