//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::io::{self, BufRead, Write};
use std::path::Path;

use log::{info, warn};

use crate::batch;
use crate::envelope;
use crate::error::{KitforgeError, Result};
use crate::kit;
use crate::project::ProjectLayout;

/// Generate the envelope JSON for one sample file.
pub fn waveform(input: &Path, output: &Path, window: usize) -> Result<()> {
    info!(
        "Generating waveform for {} (window {})",
        input.display(),
        window
    );

    envelope::generate(input, output, window)?;
    println!("Wrote {}", output.display());

    Ok(())
}

/// Regenerate waveform envelopes across the whole project.
pub fn waveforms(root: Option<&Path>, window: usize, overwrite: bool) -> Result<()> {
    println!("Converting audio files to waveform .json");

    let layout = resolve_layout(root)?;
    info!("Project root: {}", layout.root().display());

    let report = batch::generate_waveforms(&layout, window, overwrite)?;

    println!("Overwrite was {}", overwrite);
    println!("Total audio files found: {}", report.audio_files_found);
    println!("Total waveform .json files found: {}", report.waveforms_found);
    println!(
        "Total waveform .json files generated: {}",
        report.waveforms_generated
    );

    Ok(())
}

/// Scaffold a new kit, prompting for any argument not given on the command
/// line. An unresolvable project root is reported as a warning and the
/// command exits cleanly without writing anything.
pub fn new_kit(name: Option<&str>, folder: Option<&str>, root: Option<&Path>) -> Result<()> {
    let layout = match resolve_layout(root) {
        Ok(layout) => layout,
        Err(e @ KitforgeError::ProjectRootNotFound { .. }) => {
            warn!("{}", e);
            println!("No project root was found; nothing written.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let name = match name {
        Some(name) => name.to_string(),
        None => prompt("Enter the new kit name: ")?,
    };
    let folder = match folder {
        Some(folder) => folder.to_string(),
        None => prompt("Enter the sample group folder name: ")?,
    };

    let new_kit = kit::scaffold_kit(&layout, &name, &folder)?;

    println!(
        "New kit \"{}\" added with {} samples.",
        new_kit.name,
        new_kit.samples.len()
    );

    Ok(())
}

/// Explicit root when given, upward discovery from the working directory
/// otherwise.
fn resolve_layout(root: Option<&Path>) -> Result<ProjectLayout> {
    match root {
        Some(root) => Ok(ProjectLayout::new(root)),
        None => {
            let cwd = std::env::current_dir()?;
            ProjectLayout::discover(&cwd)
        }
    }
}

/// Read one trimmed line from stdin after printing a prompt.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}
