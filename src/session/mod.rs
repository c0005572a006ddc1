//! Session control: parameter state, presets, and the interactive loop.

mod controller;
mod error;
mod params;

pub use controller::{SessionConfig, SessionController, SessionState};
pub use error::SessionError;
pub use params::{ParamError, ParamName, Preset, SynthesisParameters};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MockAudioSink;
    use crate::cli::SampleSelector;
    use crate::engine::MockSynthesisEngine;
    use crate::voice::SampleLocator;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_test_wav(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..2205 {
            writer.write_sample((i % 128) as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn sample_dir(names: &[&str]) -> (TempDir, SampleLocator) {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            write_test_wav(&temp_dir.path().join(name));
        }
        let locator = SampleLocator::with_dir(temp_dir.path().to_path_buf());
        (temp_dir, locator)
    }

    fn quiet_engine() -> MockSynthesisEngine {
        let mut mock = MockSynthesisEngine::new();
        mock.expect_synthesize().never();
        mock
    }

    fn quiet_sink() -> MockAudioSink {
        let mut mock = MockAudioSink::new();
        mock.expect_play().never();
        mock
    }

    fn controller_with(
        engine: MockSynthesisEngine,
        sink: MockAudioSink,
        locator: SampleLocator,
        config: SessionConfig,
    ) -> SessionController<MockSynthesisEngine, MockAudioSink> {
        SessionController::new(engine, sink, locator, config)
    }

    // ===========================================
    // Parameter handling
    // ===========================================

    #[test]
    fn test_set_parameter_in_range() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let value = controller.set_parameter("expressiveness", "0.75").unwrap();
        assert_eq!(value, 0.75);
        assert_eq!(controller.params().expressiveness(), 0.75);
    }

    #[test]
    fn test_set_parameter_out_of_range_keeps_prior_value() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.set_parameter("expressiveness", "0.6").unwrap();

        let result = controller.set_parameter("expressiveness", "1.5");
        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(controller.params().expressiveness(), 0.6);

        let result = controller.set_parameter("pacing-weight", "-0.2");
        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(controller.params().pacing_weight(), 0.5);
    }

    #[test]
    fn test_set_parameter_malformed_value() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let result = controller.set_parameter("pacing-weight", "fast");
        assert!(matches!(result, Err(SessionError::Validation(_))));
        assert_eq!(controller.params().pacing_weight(), 0.5);
    }

    #[test]
    fn test_preset_application_is_idempotent() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.apply_preset(Preset::Dramatic);
        let direct = *controller.params();

        controller.apply_preset(Preset::Calm);
        controller.apply_preset(Preset::Dramatic);

        assert_eq!(*controller.params(), direct);
    }

    // ===========================================
    // Voice sample selection
    // ===========================================

    #[test]
    fn test_select_sample_by_index() {
        let (_dir, locator) = sample_dir(&["a.wav", "b.wav", "c.wav"]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let sample = controller.select_sample(&SampleSelector::Index(1)).unwrap();
        assert_eq!(sample.file_name(), "b.wav");
    }

    #[test]
    fn test_select_sample_out_of_range_keeps_active_sample() {
        let (_dir, locator) = sample_dir(&["a.wav", "b.wav", "c.wav"]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.select_sample(&SampleSelector::Index(0)).unwrap();

        let result = controller.select_sample(&SampleSelector::Index(7));
        assert!(matches!(result, Err(SessionError::NotFound(_))));
        assert_eq!(controller.active_sample().unwrap().file_name(), "a.wav");
    }

    #[test]
    fn test_select_first_sample() {
        let (_dir, locator) = sample_dir(&["b.wav", "a.wav"]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let sample = controller.select_first_sample().unwrap().unwrap();
        assert_eq!(sample.file_name(), "a.wav");
    }

    #[test]
    fn test_select_first_sample_empty_directory() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        assert!(controller.select_first_sample().unwrap().is_none());
        assert!(controller.active_sample().is_none());
    }

    // ===========================================
    // Synthesis dispatch
    // ===========================================

    #[test]
    fn test_blank_input_never_reaches_engine() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        for text in ["", "   ", "\t"] {
            let result = controller.synthesize_and_emit(text);
            assert!(matches!(result, Err(SessionError::EmptyInput)));
            assert_eq!(controller.state(), SessionState::Idle);
        }
    }

    #[test]
    fn test_playback_only_plays_once_and_writes_nothing() {
        let (dir, locator) = sample_dir(&["a.wav"]);

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"RIFF fake wav".to_vec()));

        let mut sink = MockAudioSink::new();
        sink.expect_play()
            .withf(|wav: &[u8]| wav == b"RIFF fake wav")
            .times(1)
            .returning(|_| Ok(()));

        let mut controller =
            controller_with(engine, sink, locator, SessionConfig::default());
        controller.select_sample(&SampleSelector::Index(0)).unwrap();

        controller.synthesize_and_emit("Hello world").unwrap();

        // Only the reference sample exists; no output file was produced.
        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
        assert_eq!(controller.state(), SessionState::Idle);
    }

    #[test]
    fn test_output_without_playback_writes_once() {
        let (dir, locator) = sample_dir(&["a.wav"]);
        let out_path = dir.path().join("out.wav");

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"RIFF saved wav".to_vec()));

        let config = SessionConfig {
            output: Some(out_path.clone()),
            playback: false,
            defaults: SynthesisParameters::default(),
        };

        let mut controller = controller_with(engine, quiet_sink(), locator, config);
        controller.select_sample(&SampleSelector::Index(0)).unwrap();

        controller.synthesize_and_emit("Hello world").unwrap();

        assert_eq!(std::fs::read(&out_path).unwrap(), b"RIFF saved wav");
    }

    #[test]
    fn test_request_carries_params_and_sample() {
        let (_dir, locator) = sample_dir(&["a.wav"]);

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .withf(|req| {
                req.text == "Hello"
                    && req.params.expressiveness() == 0.8
                    && req.params.pacing_weight() == 0.3
                    && req.sample.as_ref().is_some_and(|s| s.file_name() == "a.wav")
            })
            .times(1)
            .returning(|_| Ok(b"RIFF".to_vec()));

        let mut sink = MockAudioSink::new();
        sink.expect_play().times(1).returning(|_| Ok(()));

        let mut controller =
            controller_with(engine, sink, locator, SessionConfig::default());
        controller.select_sample(&SampleSelector::Index(0)).unwrap();
        controller.apply_preset(Preset::Dramatic);

        controller.synthesize_and_emit("Hello").unwrap();
    }

    #[test]
    fn test_engine_failure_is_nonfatal() {
        let (_dir, locator) = sample_dir(&[]);

        let mut engine = MockSynthesisEngine::new();
        engine.expect_synthesize().times(1).returning(|_| {
            Err(crate::engine::EngineError::Synthesis(
                "CUDA out of memory".to_string(),
            ))
        });

        let mut controller =
            controller_with(engine, quiet_sink(), locator, SessionConfig::default());

        let result = controller.synthesize_and_emit("Hello");
        assert!(matches!(result, Err(SessionError::Engine(_))));
        // Back to Idle; the session can keep going.
        assert_eq!(controller.state(), SessionState::Idle);
    }

    // ===========================================
    // Directive handling
    // ===========================================

    #[test]
    fn test_rejected_set_leaves_next_synthesis_on_prior_value() {
        let (_dir, locator) = sample_dir(&[]);

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .withf(|req| req.params.expressiveness() == 0.5)
            .times(1)
            .returning(|_| Ok(b"RIFF".to_vec()));

        let mut sink = MockAudioSink::new();
        sink.expect_play().times(1).returning(|_| Ok(()));

        let mut controller =
            controller_with(engine, sink, locator, SessionConfig::default());

        let result = controller.handle_line("/set expressiveness 1.5");
        assert!(matches!(result, Err(SessionError::Validation(_))));

        controller.handle_line("Hello again").unwrap();
    }

    #[test]
    fn test_quit_directive_stops_session() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.handle_line("/quit").unwrap();
        assert_eq!(controller.state(), SessionState::Stopped);
    }

    #[test]
    fn test_preset_directive() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.handle_line("/preset calm").unwrap();
        assert_eq!(controller.params().expressiveness(), 0.3);
        assert_eq!(controller.params().pacing_weight(), 0.7);
    }

    #[test]
    fn test_voice_directive() {
        let (_dir, locator) = sample_dir(&["a.wav", "b.wav"]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.handle_line("/voice 1").unwrap();
        assert_eq!(controller.active_sample().unwrap().file_name(), "b.wav");
    }

    #[test]
    fn test_unknown_directive() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let result = controller.handle_line("/tempo 0.5");
        assert!(matches!(result, Err(SessionError::UnknownDirective(_))));
    }

    #[test]
    fn test_set_directive_missing_arguments() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        let result = controller.handle_line("/set expressiveness");
        assert!(matches!(result, Err(SessionError::Usage(_))));
    }

    // ===========================================
    // Interactive loop
    // ===========================================

    #[test]
    fn test_run_synthesizes_then_quits() {
        let (_dir, locator) = sample_dir(&[]);

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"RIFF".to_vec()));

        let mut sink = MockAudioSink::new();
        sink.expect_play().times(1).returning(|_| Ok(()));

        let mut controller =
            controller_with(engine, sink, locator, SessionConfig::default());

        let input = Cursor::new("Hello world\n/quit\n");
        controller.run(input).unwrap();

        assert_eq!(controller.state(), SessionState::Stopped);
    }

    #[test]
    fn test_run_survives_errors() {
        let (_dir, locator) = sample_dir(&[]);

        let mut engine = MockSynthesisEngine::new();
        engine
            .expect_synthesize()
            .times(1)
            .returning(|_| Ok(b"RIFF".to_vec()));

        let mut sink = MockAudioSink::new();
        sink.expect_play().times(1).returning(|_| Ok(()));

        let mut controller =
            controller_with(engine, sink, locator, SessionConfig::default());

        // Bad directive, blank line, then a valid utterance.
        let input = Cursor::new("/set expressiveness 9\n\nHello\n/quit\n");
        controller.run(input).unwrap();

        assert_eq!(controller.params().expressiveness(), 0.5);
        assert_eq!(controller.state(), SessionState::Stopped);
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller.run(Cursor::new("")).unwrap();
        assert_eq!(controller.state(), SessionState::Stopped);
    }

    #[test]
    fn test_run_observes_interrupt_flag() {
        let (_dir, locator) = sample_dir(&[]);
        let mut controller = controller_with(
            quiet_engine(),
            quiet_sink(),
            locator,
            SessionConfig::default(),
        );

        controller
            .interrupt_flag()
            .store(true, std::sync::atomic::Ordering::Relaxed);

        // The flag is checked before any line is processed.
        controller.run(Cursor::new("Hello world\n")).unwrap();
        assert_eq!(controller.state(), SessionState::Stopped);
    }
}
