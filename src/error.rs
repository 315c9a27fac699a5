//! Error handling for kitforge.

use thiserror::Error;

/// Result type alias for kitforge operations
pub type Result<T> = std::result::Result<T, KitforgeError>;

/// Main error type for kitforge operations
#[derive(Error, Debug)]
pub enum KitforgeError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Analysis Errors
    #[error("Audio contains no samples")]
    EmptyAudio,

    #[error("Audio too short for spectral analysis: {samples} samples")]
    AudioTooShort { samples: usize },

    #[error("Averaging window must be at least one frame")]
    InvalidWindow,

    // Project Layout Errors
    #[error("Project root not found: no package.json in any directory above {start}")]
    ProjectRootNotFound { start: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
