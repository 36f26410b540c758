//! Error types for kiln configuration operations.

use std::path::PathBuf;

/// Errors that can occur while loading options or applying profiles.
#[derive(Debug, thiserror::Error)]
pub enum KilnError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading/writing option files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Options file not found.
    #[error("options file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A `key=value` override could not be parsed.
    #[error("invalid option assignment '{input}' (expected key=value)")]
    InvalidAssignment {
        /// The raw text that failed to parse.
        input: String,
    },

    /// No registered profile carries this name.
    #[error("unknown platform: '{name}'")]
    UnknownPlatform {
        /// The requested platform name.
        name: String,
    },

    /// The external header generator reported a failure.
    #[error("header generation failed for builder '{builder}': {detail}")]
    HeaderGeneration {
        /// Builder name (e.g. "GLSL120").
        builder: String,
        /// Collaborator-provided description.
        detail: String,
    },
}

/// Result type for kiln operations.
pub type Result<T> = std::result::Result<T, KilnError>;
