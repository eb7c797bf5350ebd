//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Native installer packaging for modular Java applications
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_jpackage",
    version,
    about = "Native installer packaging for modular Java applications",
    long_about = "Drives jpackage to create platform installers (.exe, .msi, .pkg, .dmg, .rpm, .deb)
and app-images from a packaging manifest, writing a .sha256 sidecar next to every artifact.

Usage:
  kodegen_bundler_jpackage
  kodegen_bundler_jpackage --manifest app/jpackage.toml --target ubuntu
  kodegen_bundler_jpackage --host-only --json

Exit code 0 = every requested artifact and its checksum exist."
)]
pub struct Args {
    /// Packaging manifest
    #[arg(short, long, value_name = "PATH", default_value = crate::metadata::DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Target label to package; repeat for several (default: all targets)
    #[arg(short, long = "target", value_name = "LABEL")]
    pub targets: Vec<String>,

    /// Skip targets whose OS/architecture differ from the host
    #[arg(long)]
    pub host_only: bool,

    /// JDK to take jpackage from (overrides the manifest and JAVA_HOME)
    #[arg(long, value_name = "PATH", env = "KODEGEN_JAVA_HOME")]
    pub java_home: Option<PathBuf>,

    /// Debug logging and `jpackage --verbose` (also set by `verbose = true` in the manifest)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print produced artifacts as JSON
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.manifest.as_os_str().is_empty() {
            return Err("Manifest path cannot be empty".to_string());
        }

        if let Some(label) = self.targets.iter().find(|t| t.trim().is_empty()) {
            return Err(format!("Invalid target label: '{}'", label));
        }

        Ok(())
    }
}
