//! Synthesis parameter state and presets.

use clap::ValueEnum;
use thiserror::Error;

/// Errors that can occur when adjusting synthesis parameters.
#[derive(Error, Debug)]
pub enum ParamError {
    #[error("Unknown parameter: '{0}'. Expected 'expressiveness' or 'pacing-weight'")]
    UnknownName(String),

    #[error("{name} must be between 0.0 and 1.0, got {value}")]
    OutOfRange { name: &'static str, value: f32 },

    #[error("Not a number: '{0}'")]
    NotANumber(String),

    #[error("Unknown preset: '{0}'. Expected 'dramatic' or 'calm'")]
    UnknownPreset(String),
}

/// The two adjustable synthesis parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamName {
    Expressiveness,
    PacingWeight,
}

impl ParamName {
    /// Parse a parameter name as typed in a `/set` directive.
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        match input {
            "expressiveness" => Ok(ParamName::Expressiveness),
            "pacing-weight" | "pacing_weight" => Ok(ParamName::PacingWeight),
            other => Err(ParamError::UnknownName(other.to_string())),
        }
    }

    /// Returns the user-facing name of the parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamName::Expressiveness => "expressiveness",
            ParamName::PacingWeight => "pacing-weight",
        }
    }
}

/// Per-session synthesis controls, both always within [0.0, 1.0].
///
/// Expressiveness maps to the backend's exaggeration control, pacing weight
/// to its classifier-free guidance weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisParameters {
    expressiveness: f32,
    pacing_weight: f32,
}

impl SynthesisParameters {
    /// Create a parameter pair, validating both values.
    pub fn new(expressiveness: f32, pacing_weight: f32) -> Result<Self, ParamError> {
        let mut params = Self::default();
        params.set(ParamName::Expressiveness, expressiveness)?;
        params.set(ParamName::PacingWeight, pacing_weight)?;
        Ok(params)
    }

    pub fn expressiveness(&self) -> f32 {
        self.expressiveness
    }

    pub fn pacing_weight(&self) -> f32 {
        self.pacing_weight
    }

    /// Assign one parameter. Out-of-range (or NaN) values are rejected and
    /// the current value is left untouched.
    pub fn set(&mut self, name: ParamName, value: f32) -> Result<(), ParamError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ParamError::OutOfRange {
                name: name.as_str(),
                value,
            });
        }

        match name {
            ParamName::Expressiveness => self.expressiveness = value,
            ParamName::PacingWeight => self.pacing_weight = value,
        }

        Ok(())
    }

    /// Parse and assign one named parameter from directive input.
    ///
    /// Returns the newly assigned value so callers can echo it back.
    pub fn set_from_str(&mut self, name: &str, value: &str) -> Result<f32, ParamError> {
        let name = ParamName::parse(name)?;
        let parsed: f32 = value
            .trim()
            .parse()
            .map_err(|_| ParamError::NotANumber(value.to_string()))?;

        self.set(name, parsed)?;
        Ok(parsed)
    }
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self {
            expressiveness: 0.5,
            pacing_weight: 0.5,
        }
    }
}

/// Named parameter pairs applied atomically.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// High expressiveness, low pacing weight
    Dramatic,
    /// Low expressiveness, high pacing weight
    Calm,
}

impl Preset {
    /// Parse a preset name as typed in a `/preset` directive.
    pub fn parse(input: &str) -> Result<Self, ParamError> {
        match input {
            "dramatic" => Ok(Preset::Dramatic),
            "calm" => Ok(Preset::Calm),
            other => Err(ParamError::UnknownPreset(other.to_string())),
        }
    }

    /// The fixed parameter pair this preset stands for.
    pub fn parameters(&self) -> SynthesisParameters {
        let (expressiveness, pacing_weight) = match self {
            Preset::Dramatic => (0.8, 0.3),
            Preset::Calm => (0.3, 0.7),
        };

        SynthesisParameters {
            expressiveness,
            pacing_weight,
        }
    }

    /// Returns the user-facing name of the preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Dramatic => "dramatic",
            Preset::Calm => "calm",
        }
    }
}
