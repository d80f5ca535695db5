//! Error types for design loading

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading a design document
#[derive(Error, Debug)]
pub enum DesignError {
    /// The design file could not be read
    #[error("failed to read design file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension does not map to a known design format
    #[error("unsupported design format for {}: expected .yaml, .yml or .json", .0.display())]
    UnsupportedFormat(PathBuf),
}
