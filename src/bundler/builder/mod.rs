//! Packaging orchestration and its phases.
//!
//! This module provides the main [`Bundler`] orchestrator that coordinates
//! jpackage invocations to create native installers for one target.
//!
//! # Overview
//!
//! The bundler:
//! 1. Validates the target against the host
//! 2. Stages jpackage resource templates
//! 3. Builds an app-image (two-step) or skips it (single-step)
//! 4. Merges application and target resources
//! 5. Builds each installer format
//! 6. Writes checksum sidecars and returns
//!    [`BundledArtifact`](crate::bundler::BundledArtifact) results
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 sidecar files for artifacts
//! - [`image`] - App-image creation
//! - [`merge`] - OS-specific resource placement
//! - [`orchestrator`] - Main [`Bundler`] struct
//! - [`package`] - Installer creation per format
//! - [`recipe`] - Shared jpackage argument assembly
//! - [`staging`] - Resource template staging

pub mod checksum;
pub mod image;
pub mod merge;
mod orchestrator;
pub mod package;
pub mod recipe;
pub mod staging;

pub use orchestrator::{Bundler, Stage};
