//! Error types for the driver layer. The numeric core never fails.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a scene or a command script.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("line {line}: {message}")]
    Script { line: usize, message: String },
}

/// Errors that can occur while writing a rendered frame.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode frame as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
