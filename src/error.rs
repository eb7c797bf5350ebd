//! Crate-level error types.
//!
//! Engine failures are carried unchanged in [`BundlerError::Bundler`];
//! the other variants cover manifest loading and the command line.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI and manifest operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all crate operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Packaging errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Manifest could not be parsed
    #[error("Invalid manifest {}: {reason}", path.display())]
    InvalidManifest {
        /// Manifest path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// Requested target label is not declared
    #[error("Unknown target '{label}'. Declared targets: {available}")]
    UnknownTarget {
        /// Requested label
        label: String,
        /// Comma-separated declared labels
        available: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}
