//! Interactive session state and dispatch.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::audio::{AudioSink, write_wav};
use crate::cli::SampleSelector;
use crate::engine::{SynthesisEngine, UtteranceRequest};
use crate::voice::{SampleLocator, VoiceSample};

use super::error::SessionError;
use super::params::{Preset, SynthesisParameters};

/// Session configuration, fixed at construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where to save synthesized audio; `None` means playback only.
    pub output: Option<PathBuf>,
    /// Whether to play synthesized audio.
    pub playback: bool,
    /// Parameter values at session start.
    pub defaults: SynthesisParameters,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output: None,
            playback: true,
            defaults: SynthesisParameters::default(),
        }
    }
}

/// Controller lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Awaiting input.
    Idle,
    /// An utterance is in flight with the engine or sink.
    Processing,
    /// Explicit quit, end of input, or interrupt.
    Stopped,
}

/// Owns the interactive loop, the parameter state, and dispatch between
/// synthesis and control directives.
pub struct SessionController<E: SynthesisEngine, S: AudioSink> {
    engine: E,
    sink: S,
    locator: SampleLocator,
    config: SessionConfig,
    params: SynthesisParameters,
    sample: Option<VoiceSample>,
    state: SessionState,
    interrupted: Arc<AtomicBool>,
}

impl<E: SynthesisEngine, S: AudioSink> SessionController<E, S> {
    pub fn new(engine: E, sink: S, locator: SampleLocator, config: SessionConfig) -> Self {
        let params = config.defaults;

        Self {
            engine,
            sink,
            locator,
            config,
            params,
            sample: None,
            state: SessionState::Idle,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &SynthesisParameters {
        &self.params
    }

    pub fn active_sample(&self) -> Option<&VoiceSample> {
        self.sample.as_ref()
    }

    /// Shared flag a signal handler can set to stop the loop after the
    /// in-flight utterance completes.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Assign one named parameter from string input.
    ///
    /// On failure the prior value is retained. Returns the new value.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<f32, SessionError> {
        Ok(self.params.set_from_str(name, value)?)
    }

    /// Replace both parameters with the preset's pair atomically.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.params = preset.parameters();
    }

    /// Resolve and activate a voice sample.
    ///
    /// On failure the previously active sample is retained.
    pub fn select_sample(&mut self, selector: &SampleSelector) -> Result<&VoiceSample, SessionError> {
        let sample = self.locator.resolve(selector)?;
        Ok(&*self.sample.insert(sample))
    }

    /// Activate the first enumerated sample, if the directory has any.
    pub fn select_first_sample(&mut self) -> Result<Option<&VoiceSample>, SessionError> {
        match self.locator.first()? {
            Some(sample) => Ok(Some(&*self.sample.insert(sample))),
            None => Ok(None),
        }
    }

    /// Synthesize `text` with the current parameters and active sample, then
    /// play and/or save the result per the session configuration.
    ///
    /// Blank text is rejected before the engine is called.
    pub fn synthesize_and_emit(&mut self, text: &str) -> Result<(), SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        self.state = SessionState::Processing;
        let result = self.emit(text);
        self.state = SessionState::Idle;
        result
    }

    fn emit(&mut self, text: &str) -> Result<(), SessionError> {
        let request = UtteranceRequest::new(text, self.sample.clone(), self.params);
        let wav = self.engine.synthesize(&request)?;

        if let Some(path) = &self.config.output {
            write_wav(path, &wav)?;
            println!("Saved to: {}", path.display());
        }

        if self.config.playback {
            self.sink.play(&wav)?;
        }

        Ok(())
    }

    /// Classify one input line as a directive or literal text and act on it.
    pub fn handle_line(&mut self, line: &str) -> Result<(), SessionError> {
        let line = line.trim();

        if let Some(directive) = line.strip_prefix('/') {
            return self.handle_directive(directive);
        }

        self.synthesize_and_emit(line)
    }

    fn handle_directive(&mut self, directive: &str) -> Result<(), SessionError> {
        let mut parts = directive.split_whitespace();

        match parts.next() {
            Some("set") => {
                let (name, value) = match (parts.next(), parts.next()) {
                    (Some(name), Some(value)) => (name, value),
                    _ => {
                        return Err(SessionError::Usage(
                            "/set <expressiveness|pacing-weight> <0.0..1.0>",
                        ));
                    }
                };
                let new_value = self.set_parameter(name, value)?;
                println!("{name} = {new_value:.2}");
                Ok(())
            }
            Some("preset") => {
                let name = parts
                    .next()
                    .ok_or(SessionError::Usage("/preset <dramatic|calm>"))?;
                let preset = Preset::parse(name).map_err(SessionError::Validation)?;
                self.apply_preset(preset);
                println!(
                    "Preset '{}': expressiveness = {:.2}, pacing-weight = {:.2}",
                    preset.as_str(),
                    self.params.expressiveness(),
                    self.params.pacing_weight()
                );
                Ok(())
            }
            Some("voice") => {
                let selector = parts
                    .next()
                    .ok_or(SessionError::Usage("/voice <index|path>"))?;
                let sample = self.select_sample(&SampleSelector::parse(selector))?;
                println!("Voice sample: {}", sample.file_name());
                Ok(())
            }
            Some("list") => self.print_samples(),
            Some("help") => {
                Self::print_help();
                Ok(())
            }
            Some("quit") | Some("exit") => {
                println!("Goodbye!");
                self.state = SessionState::Stopped;
                Ok(())
            }
            Some(other) => Err(SessionError::UnknownDirective(other.to_string())),
            None => Err(SessionError::Usage("directives start with '/'; try /help")),
        }
    }

    fn print_samples(&self) -> Result<(), SessionError> {
        let samples = self.locator.list()?;

        if samples.is_empty() {
            println!(
                "No voice samples found in {}",
                self.locator.samples_dir().display()
            );
            return Ok(());
        }

        println!("Available voice samples:");
        for (index, sample) in samples.iter().enumerate() {
            println!(
                "  [{index}] {} ({:.2}s)",
                sample.file_name(),
                sample.duration_secs()
            );
        }

        Ok(())
    }

    fn print_help() {
        println!("Directives:");
        println!("  /set <param> <value>   set expressiveness or pacing-weight (0.0 to 1.0)");
        println!("  /preset <name>         apply the 'dramatic' or 'calm' preset");
        println!("  /voice <index|path>    switch the active voice sample");
        println!("  /list                  list available voice samples");
        println!("  /help                  show this help");
        println!("  /quit                  end the session");
        println!("Any other non-empty line is synthesized as speech.");
    }

    /// Run the interactive loop until quit, end of input, or interrupt.
    ///
    /// Every error is reported and the loop continues; one failed utterance
    /// never ends the session.
    pub fn run(&mut self, mut input: impl BufRead) -> Result<(), SessionError> {
        let mut line = String::new();

        loop {
            if self.interrupted.load(Ordering::Relaxed) {
                break;
            }

            print!("> ");
            std::io::stdout().flush()?;

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                // Interrupt during the blocking read; stop cleanly.
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => break,
                Err(e) => return Err(e.into()),
            }

            if let Err(e) = self.handle_line(&line) {
                eprintln!("Error: {e}");
            }

            if self.state == SessionState::Stopped {
                return Ok(());
            }
        }

        self.state = SessionState::Stopped;
        Ok(())
    }
}
