//! voice-clone-rs CLI entry point.

use std::sync::atomic::Ordering;

use anyhow::{Context, Result};
use clap::Parser;
use voice_clone_rs::audio::{AudioSink, RodioSink};
use voice_clone_rs::cli::{Args, SampleSelector};
use voice_clone_rs::engine::{HttpEngine, SynthesisEngine};
use voice_clone_rs::session::{SessionConfig, SessionController, SynthesisParameters};
use voice_clone_rs::voice::SampleLocator;

fn main() -> Result<()> {
    let args = Args::parse();

    let locator = match &args.samples_dir {
        Some(dir) => SampleLocator::with_dir(dir.clone()),
        None => SampleLocator::new(),
    };

    // Handle utility commands first
    if args.list_samples {
        return list_samples(&locator);
    }

    let defaults = match args.preset {
        Some(preset) => preset.parameters(),
        None => SynthesisParameters::new(args.expressiveness, args.pacing_weight)
            .context("Invalid parameter flag")?,
    };

    let engine = HttpEngine::new(&args.host);
    let health = engine
        .health()
        .context("Synthesis backend is not reachable")?;
    println!("Backend: {} on {}", health.model, health.device);
    if args.verbose {
        println!("  Status: {}", health.status);
        println!("  Endpoint: {}", engine.base_url());
    }

    let config = SessionConfig {
        output: args.output.clone(),
        playback: !args.no_play,
        defaults,
    };
    let mut controller = SessionController::new(engine, RodioSink::new(), locator, config);

    // Interrupt stops the session once the in-flight utterance completes;
    // output files are flushed per write, so nothing is left torn.
    let interrupted = controller.interrupt_flag();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::Relaxed);
    })
    .context("Error setting Ctrl-C handler")?;

    select_voice(&mut controller, args.voice.as_deref())?;

    match &args.text {
        // One-shot: synthesize once, any failure exits non-zero.
        Some(text) => controller
            .synthesize_and_emit(text)
            .context("Synthesis failed")?,
        None => {
            print_banner();
            controller.run(std::io::stdin().lock())?;
        }
    }

    Ok(())
}

fn select_voice<E: SynthesisEngine, S: AudioSink>(
    controller: &mut SessionController<E, S>,
    selector: Option<&str>,
) -> Result<()> {
    match selector {
        Some(selector) => {
            let sample = controller
                .select_sample(&SampleSelector::parse(selector))
                .context("Failed to select voice sample")?;
            println!("Using voice sample: {}", sample.file_name());
        }
        None => match controller
            .select_first_sample()
            .context("Failed to enumerate voice samples")?
        {
            Some(sample) => {
                println!("Auto-selected voice sample: {}", sample.file_name());
                println!("  (use --voice to pick a different sample)");
            }
            None => println!("No voice samples found, using the default voice"),
        },
    }

    Ok(())
}

fn list_samples(locator: &SampleLocator) -> Result<()> {
    let samples = locator.list().context("Failed to list voice samples")?;

    if samples.is_empty() {
        println!(
            "No voice samples found in {}",
            locator.samples_dir().display()
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

fn print_banner() {
    println!("Interactive voice cloning session");
    println!("Type text and press Enter to synthesize speech");
    println!("Directives start with '/': /set, /preset, /voice, /list, /help, /quit");
}
