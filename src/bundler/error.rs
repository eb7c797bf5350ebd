//! Error types for packaging operations.
//!
//! A packaging run fails in one of three ways: a host mismatch (nothing was
//! started), a failing native tool invocation (its own diagnostics are
//! carried verbatim), or a filesystem error while staging, copying or
//! hashing resources, always [`Error::ResourceIo`]. The remaining variants
//! report invalid inputs or a missing tool before any work starts.

use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the packaging engine.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested OS or architecture differs from the running host.
    #[error("Running on {host}; cannot build for {requested}")]
    HostMismatch {
        /// Host value as reported by the running system
        host: String,
        /// Requested target value
        requested: String,
    },

    /// The native packaging tool exited with a non-zero status.
    #[error(
        "{command} failed with exit code {}\n{stdout}{stderr}",
        code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
    )]
    ExternalToolFailure {
        /// Command line that failed
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// Filesystem error while staging, copying or hashing.
    #[error("{context} {}: {source}", path.display())]
    ResourceIo {
        /// What was being done
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The process could not be spawned at all.
    #[error("Failed to execute {command}: {error}")]
    CommandFailed {
        /// Program that could not be started
        command: String,
        /// Spawn error
        error: std::io::Error,
    },

    /// The jpackage executable could not be located.
    #[error("jpackage not found: {0}")]
    ToolNotFound(String),

    /// Target description violates an invariant.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Packaging request violates an invariant.
    #[error("Invalid packaging request: {0}")]
    InvalidRequest(String),

    /// A package-type invocation succeeded but left nothing in the destination.
    #[error("jpackage produced no output for package type '{package_type}'")]
    MissingOutput {
        /// Package type that produced nothing
        package_type: String,
    },
}

/// Attaches filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts the IO error into [`Error::ResourceIo`] naming the operation and path.
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::ResourceIo {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Turns a missing value into an error.
pub trait Context<T> {
    /// Fails with [`Error::InvalidRequest`] carrying `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::InvalidRequest(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_failure_carries_tool_output_verbatim() {
        let err = Error::ExternalToolFailure {
            command: "jpackage --type deb".into(),
            code: Some(1),
            stdout: String::new(),
            stderr: "Error: Invalid Option: [--frobnicate]\n".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Error: Invalid Option: [--frobnicate]"));
    }

    #[test]
    fn host_mismatch_names_both_sides() {
        let err = Error::HostMismatch {
            host: "linux".into(),
            requested: "windows".into(),
        };
        assert_eq!(err.to_string(), "Running on linux; cannot build for windows");
    }

    #[test]
    fn fs_context_keeps_path() {
        let res: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = res.fs_context("copying resource", "/tmp/x").unwrap_err();
        assert!(matches!(err, Error::ResourceIo { ref path, .. } if path == Path::new("/tmp/x")));
    }
}
