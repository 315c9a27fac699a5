//! Kitforge - asset pipeline tools for a drum-sampler front-end
//!
//! Two one-shot developer tools behind one CLI:
//! 1. Waveform generation - precomputes JSON amplitude envelopes from `.wav`
//!    samples for display in the front-end
//! 2. Kit scaffolding - scans a folder of samples and appends a default kit
//!    record to the front-end's kit store
//!
//! # Pipeline
//!
//! Waveform generation is a single linear pipeline: decode the sample to a
//! mono signal, take a Hann-windowed short-time magnitude transform, average
//! the frames over fixed-size blocks, and serialize the result to JSON.

pub mod audio;
pub mod batch;
pub mod cli;
pub mod envelope;
pub mod error;
pub mod kit;
pub mod project;
pub mod spectral;

pub use error::{KitforgeError, Result};
