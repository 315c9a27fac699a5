//! Batch waveform generation.
//!
//! Scans the project's sample tree, finds every `.wav` input, and runs the
//! envelope generator for each one whose output is missing (or for all of
//! them when overwrite is enabled). Skip decisions are by output-path
//! membership only, never by content.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::WalkDir;

use crate::envelope;
use crate::error::Result;
use crate::project::ProjectLayout;

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub audio_files_found: usize,
    pub waveforms_found: usize,
    pub waveforms_generated: usize,
}

/// Recursively collect files under `dir` with the given extension
/// (matched case-insensitively), in sorted order.
fn collect_by_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Generate envelopes for every sample in the project.
///
/// Inputs are `.wav` files anywhere under the samples directory; each output
/// lands flat in the waveforms directory, named after the input's file stem.
/// An input is skipped when its output path already exists among the
/// previously generated files and `overwrite` is off.
pub fn generate_waveforms(
    layout: &ProjectLayout,
    window: usize,
    overwrite: bool,
) -> Result<BatchReport> {
    let audio_files = collect_by_extension(&layout.samples_dir(), "wav")?;
    let existing: HashSet<PathBuf> = collect_by_extension(&layout.waveforms_dir(), "json")?
        .into_iter()
        .collect();

    let waveforms_dir = layout.waveforms_dir();
    fs::create_dir_all(&waveforms_dir)?;

    let mut report = BatchReport {
        audio_files_found: audio_files.len(),
        waveforms_found: existing.len(),
        waveforms_generated: 0,
    };

    for audio_file in &audio_files {
        let stem = match audio_file.file_stem() {
            Some(stem) => stem,
            None => continue,
        };
        // Appended rather than with_extension, so a dotted stem like
        // "kick.v2" keeps its full name.
        let mut file_name = stem.to_os_string();
        file_name.push(".json");
        let output = waveforms_dir.join(file_name);

        if !overwrite && existing.contains(&output) {
            debug!("Skipping {} (output exists)", audio_file.display());
            continue;
        }

        info!("{} -> {}", audio_file.display(), output.display());
        envelope::generate(audio_file, &output, window)?;
        report.waveforms_generated += 1;
    }

    Ok(report)
}
