//! jpackage packaging engine.
//!
//! Given a [`Target`] (OS, architecture, formats, options) and a
//! [`PackagingRequest`] (module path, main module, version, resources), the
//! [`Bundler`] drives jpackage to produce verified installers:
//!
//! - [`host`] - Host/target OS and architecture validation
//! - [`settings`] - Immutable run inputs
//! - [`builder`] - Phases: staging, app-image, merge, packages, checksums
//! - [`tool`] - jpackage location and process execution
//! - [`utils`] - Filesystem helpers

pub mod builder;
pub mod error;
pub mod host;
pub mod settings;
pub mod tool;
pub mod utils;

use std::path::PathBuf;

pub use builder::{Bundler, Stage};
pub use error::{Error, Result};
pub use host::HostSystem;
pub use settings::{
    Arch, OperatingSystem, PackageType, PackagingRequest, PackagingRequestBuilder, Target,
    TargetBuilder,
};
pub use tool::{ProcessRunner, ToolInvocation, ToolOutput, ToolRunner};

/// One checksummed file in the destination directory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct BundledArtifact {
    /// Path of the artifact
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Lowercase hex SHA-256, also written to `<path>.sha256`
    pub checksum: String,
}
