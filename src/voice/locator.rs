//! Reference sample discovery and validation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cli::SampleSelector;

/// Errors that can occur while locating voice samples.
#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Voice sample directory not found: {0}")]
    DirNotFound(String),

    #[error("No voice sample at index {index} ({count} samples available)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Voice sample not found: {0}")]
    NotFound(String),

    #[error("Not a readable WAV file: {path}: {reason}")]
    InvalidSample { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A validated reference to a speaker sample on disk.
///
/// Immutable once constructed; the file has been confirmed to exist and carry
/// a parseable WAV header at selection time.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSample {
    path: PathBuf,
    duration_secs: f32,
}

impl VoiceSample {
    /// Open a WAV file as a reference sample, validating its header.
    pub fn open(path: &Path) -> Result<Self, VoiceError> {
        if !path.exists() {
            return Err(VoiceError::NotFound(path.display().to_string()));
        }

        let reader = hound::WavReader::open(path).map_err(|e| VoiceError::InvalidSample {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let spec = reader.spec();
        let duration_secs = reader.duration() as f32 / spec.sample_rate as f32;

        Ok(Self {
            path: path.to_path_buf(),
            duration_secs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, lossily decoded.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn duration_secs(&self) -> f32 {
        self.duration_secs
    }
}

/// Enumerates and resolves voice samples in a configured directory.
pub struct SampleLocator {
    samples_dir: PathBuf,
}

impl SampleLocator {
    /// Create a locator over the default sample directory.
    pub fn new() -> Self {
        let samples_dir = dirs::home_dir()
            .expect("Could not find home directory")
            .join(".voice-clone-rs")
            .join("samples");

        Self { samples_dir }
    }

    /// Create a locator over a custom directory.
    pub fn with_dir(samples_dir: PathBuf) -> Self {
        Self { samples_dir }
    }

    pub fn samples_dir(&self) -> &Path {
        &self.samples_dir
    }

    /// List the WAV files in the sample directory, sorted by file name.
    ///
    /// Files that are not valid WAVs are skipped. A missing directory is an
    /// error; an empty one is not.
    pub fn list(&self) -> Result<Vec<VoiceSample>, VoiceError> {
        if !self.samples_dir.exists() {
            return Err(VoiceError::DirNotFound(
                self.samples_dir.display().to_string(),
            ));
        }

        let mut paths = Vec::new();

        for entry in std::fs::read_dir(&self.samples_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
            {
                paths.push(path);
            }
        }

        paths.sort();

        Ok(paths
            .iter()
            .filter_map(|p| VoiceSample::open(p).ok())
            .collect())
    }

    /// Resolve a selector into a validated sample.
    ///
    /// Indices refer to the sorted enumeration returned by [`list`](Self::list).
    pub fn resolve(&self, selector: &SampleSelector) -> Result<VoiceSample, VoiceError> {
        match selector {
            SampleSelector::Path(path) => VoiceSample::open(path),
            SampleSelector::Index(index) => {
                let samples = self.list()?;
                let count = samples.len();
                samples
                    .into_iter()
                    .nth(*index)
                    .ok_or(VoiceError::IndexOutOfRange {
                        index: *index,
                        count,
                    })
            }
        }
    }

    /// First enumerated sample, if any.
    pub fn first(&self) -> Result<Option<VoiceSample>, VoiceError> {
        Ok(self.list()?.into_iter().next())
    }
}

impl Default for SampleLocator {
    fn default() -> Self {
        Self::new()
    }
}
