//! Artifact checksum calculation.
//!
//! This module provides SHA256 checksums for produced installers and writes
//! them next to each artifact as `<artifact>.sha256` sidecar files.

use crate::bundler::{
    BundledArtifact,
    error::{ErrorExt, Result},
    utils::fs,
};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Extension of sidecar checksum files.
pub const SIDECAR_EXTENSION: &str = "sha256";

/// Calculates SHA256 checksum of a single file.
///
/// Reads the file in 8KB chunks to handle large installers without loading
/// them into memory.
///
/// # Returns
///
/// * `Ok(String)` - Lowercase hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If file cannot be read
pub async fn calculate_file_sha256(file_path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Path of the sidecar for `artifact`.
pub fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    artifact.with_file_name(name)
}

/// Writes a sidecar for every regular file directly under `destination`.
///
/// The file list is taken before any sidecar is written, so sidecars never
/// receive sidecars of their own.
pub async fn write_checksums(destination: &Path) -> Result<Vec<BundledArtifact>> {
    let files = fs::list_files(destination).await?;
    let mut artifacts = Vec::with_capacity(files.len());

    for path in files {
        let checksum = calculate_file_sha256(&path).await?;
        let sidecar = sidecar_path(&path);
        tokio::fs::write(&sidecar, checksum.as_bytes())
            .await
            .fs_context("writing checksum file", &sidecar)?;

        let size = tokio::fs::metadata(&path)
            .await
            .fs_context("reading artifact metadata", &path)?
            .len();

        log::debug!("{}  {}", checksum, path.display());
        artifacts.push(BundledArtifact {
            path,
            size,
            checksum,
        });
    }

    log::info!(
        "✓ Wrote {} checksum files in {}",
        artifacts.len(),
        destination.display()
    );
    Ok(artifacts)
}
