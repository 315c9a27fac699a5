//! Kit scaffolding.
//!
//! A kit is a named collection of eight sample slots plus per-slot playback
//! defaults consumed by the front-end. Scaffolding a kit scans a folder of
//! samples and appends one JSON record to the project's append-only kit
//! store (`src/lib/kits.jsonl`, one record per line). The defaults are
//! creation-time constants meant for manual editing afterward.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::project::ProjectLayout;

/// Number of sample slots in a kit.
pub const NUM_SLOTS: usize = 8;

pub const DEFAULT_ATTACK: f32 = 0.0;
pub const DEFAULT_RELEASE: f32 = 100.0;
pub const DEFAULT_FILTER: f32 = 50.0;
pub const DEFAULT_VOLUME: f32 = 92.0;
pub const DEFAULT_PAN: f32 = 50.0;

/// One kit record as stored in the kit store.
///
/// `samples` holds paths relative to the samples root, with forward slashes.
/// Parameter arrays are per-slot, always [`NUM_SLOTS`] long.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    pub name: String,
    pub samples: Vec<String>,
    pub attacks: [f32; NUM_SLOTS],
    pub releases: [f32; NUM_SLOTS],
    pub filters: [f32; NUM_SLOTS],
    pub volumes: [f32; NUM_SLOTS],
    pub pans: [f32; NUM_SLOTS],
    pub solos: [bool; NUM_SLOTS],
    pub mutes: [bool; NUM_SLOTS],
}

impl Kit {
    /// A kit with the given samples and the constant per-slot defaults.
    pub fn with_defaults(name: impl Into<String>, samples: Vec<String>) -> Self {
        Kit {
            name: name.into(),
            samples,
            attacks: [DEFAULT_ATTACK; NUM_SLOTS],
            releases: [DEFAULT_RELEASE; NUM_SLOTS],
            filters: [DEFAULT_FILTER; NUM_SLOTS],
            volumes: [DEFAULT_VOLUME; NUM_SLOTS],
            pans: [DEFAULT_PAN; NUM_SLOTS],
            solos: [false; NUM_SLOTS],
            mutes: [false; NUM_SLOTS],
        }
    }
}

/// `.wav` files directly inside `folder` (non-recursive), sorted by name.
fn list_sample_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        let is_wav = path.is_file()
            && path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("wav"))
                .unwrap_or(false);
        if is_wav {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read back every kit currently in the store. Missing store means no kits.
/// Lines that fail to parse are skipped with a warning.
pub fn load_kits(store: &Path) -> Result<Vec<Kit>> {
    if !store.exists() {
        return Ok(Vec::new());
    }

    let mut kits = Vec::new();
    for (i, line) in fs::read_to_string(store)?.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Kit>(line) {
            Ok(kit) => kits.push(kit),
            Err(e) => warn!("{}:{}: skipping unparseable kit record: {}", store.display(), i + 1, e),
        }
    }

    Ok(kits)
}

/// Append one kit record to the store, creating it (and its parent
/// directory) if absent. Existing lines are never rewritten.
fn append_kit(store: &Path, kit: &Kit) -> Result<()> {
    if let Some(parent) = store.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut line = serde_json::to_string(kit)?;
    line.push('\n');

    let mut file = fs::OpenOptions::new().create(true).append(true).open(store)?;
    file.write_all(line.as_bytes())?;

    Ok(())
}

/// Scaffold a new kit from a sample-group folder.
///
/// Ensures the samples root and the named subfolder exist (idempotent),
/// enumerates the `.wav` files directly inside the subfolder, and appends a
/// kit record with default parameters to the store. A folder with no samples
/// still produces a record, with an empty sample list. Kit names are not
/// required to be unique; a collision appends a duplicate record and logs a
/// warning.
pub fn scaffold_kit(layout: &ProjectLayout, name: &str, folder: &str) -> Result<Kit> {
    let samples_root = layout.samples_dir();
    let samples_folder = samples_root.join(folder);
    fs::create_dir_all(&samples_folder)?;

    let mut samples = Vec::new();
    for file in list_sample_files(&samples_folder)? {
        // Relative to the samples root, forward slashes for the front-end.
        let relative = file
            .strip_prefix(&samples_root)
            .unwrap_or(&file)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        info!("{}", relative);
        samples.push(relative);
    }

    let store = layout.kits_file();
    if load_kits(&store)?.iter().any(|k| k.name == name) {
        warn!("Kit \"{}\" already exists in {}; appending a duplicate record", name, store.display());
    }

    let kit = Kit::with_defaults(name, samples);
    append_kit(&store, &kit)?;

    Ok(kit)
}
