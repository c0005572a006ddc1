//! CLI argument parsing and selector handling.

mod args;

pub use args::{Args, SampleSelector};
