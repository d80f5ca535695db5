//! CLI error types

use std::path::PathBuf;

use thiserror::Error;

use crate::design::DesignError;

/// Errors surfaced by CLI commands
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read {}: {1}", .0.display())]
    FileReadError(PathBuf, String),

    #[error(transparent)]
    Design(#[from] DesignError),

    #[error("Invalid compiler configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0} aggregate(s) failed to compile")]
    CompileFailed(usize),
}
