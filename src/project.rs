//! Project layout resolution.
//!
//! The front-end project root is an explicit, injected value rather than a
//! hidden global: callers pass it directly, or ask [`ProjectLayout::discover`]
//! to walk upward from a starting directory until it finds the front-end
//! root marker. Reaching the filesystem root without a match is a clean
//! error, never an unguarded walk past `/`.

use std::path::{Path, PathBuf};

use crate::error::{KitforgeError, Result};

/// File that marks the front-end project root.
pub const ROOT_MARKER: &str = "package.json";

/// Resolved project tree: the root plus the asset paths derived from it.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Use an explicitly provided project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectLayout { root: root.into() }
    }

    /// Walk upward from `start` until a directory containing
    /// [`ROOT_MARKER`] is found.
    ///
    /// # Errors
    /// * `ProjectRootNotFound` - If no ancestor carries the marker
    pub fn discover(start: &Path) -> Result<Self> {
        for dir in start.ancestors() {
            if dir.join(ROOT_MARKER).is_file() {
                return Ok(ProjectLayout::new(dir));
            }
        }

        Err(KitforgeError::ProjectRootNotFound {
            start: start.display().to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Sample inputs: `<root>/public/samples`.
    pub fn samples_dir(&self) -> PathBuf {
        self.root.join("public").join("samples")
    }

    /// Envelope outputs: `<root>/public/waveforms`.
    pub fn waveforms_dir(&self) -> PathBuf {
        self.root.join("public").join("waveforms")
    }

    /// Kit store consumed by the front-end: `<root>/src/lib/kits.jsonl`.
    pub fn kits_file(&self) -> PathBuf {
        self.root.join("src").join("lib").join("kits.jsonl")
    }
}
