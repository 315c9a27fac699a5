//! CLI Module
//!
//! Command-line interface for the kitforge asset tools.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::envelope::DEFAULT_WINDOW;

/// Kitforge - asset pipeline tools for a drum-sampler front-end
#[derive(Parser, Debug)]
#[command(name = "kitforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the waveform envelope JSON for a single sample
    #[command(name = "waveform")]
    Waveform {
        /// Path to the input .wav file
        input: PathBuf,

        /// Path for the output .json file
        output: PathBuf,

        /// Averaging window in transform frames
        #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
    },

    /// Regenerate waveform envelopes for every sample in the project
    #[command(name = "waveforms")]
    Waveforms {
        /// Project root (discovered from the working directory if omitted)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Regenerate outputs that already exist
        #[arg(long)]
        overwrite: bool,

        /// Averaging window in transform frames
        #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
    },

    /// Scaffold a new kit from a folder of samples
    #[command(name = "new-kit")]
    NewKit {
        /// Name of the new kit (prompted for if omitted)
        name: Option<String>,

        /// Sample-group folder under public/samples (prompted for if omitted)
        folder: Option<String>,

        /// Project root (discovered from the working directory if omitted)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}
