//! jpackage orchestration library for creating native installers
//!
//! This library drives the JDK's `jpackage` tool to package a modular Java
//! application into:
//! - Windows installers (.exe, .msi)
//! - macOS packages (.pkg, .dmg)
//! - Linux packages (.rpm, .deb)
//! - self-contained app-images
//!
//! with a `.sha256` sidecar for every produced artifact.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
