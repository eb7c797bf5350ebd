//! Command line interface for the jpackage bundler.
//!
//! Loads the packaging manifest, selects targets and runs one [`Bundler`]
//! per target, sequentially, stopping at the first failure.

mod args;

pub use args::Args;

use crate::bundler::{BundledArtifact, Bundler, HostSystem, Target};
use crate::error::{CliError, Result};
use crate::metadata::PackagingManifest;

/// Artifacts produced for one target.
#[derive(Debug, serde::Serialize)]
pub struct TargetReport {
    pub target: String,
    pub artifacts: Vec<BundledArtifact>,
}

/// Main CLI entry point
pub async fn run(args: Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let mut manifest = PackagingManifest::load(&args.manifest)?;
    log::debug!(
        "Loaded manifest {} with {} targets",
        args.manifest.display(),
        manifest.targets().len()
    );
    if args.verbose {
        manifest = manifest.with_verbose(true);
    }

    let host = HostSystem::current();
    let targets = select_targets(&manifest, &args.targets, args.host_only, &host)?;
    if targets.is_empty() {
        log::warn!("No targets selected for host {} / {}", host.os_name(), host.arch_name());
        return Ok(0);
    }

    let java_home = args
        .java_home
        .clone()
        .or_else(|| manifest.application().java_home.clone());

    let mut reports = Vec::with_capacity(targets.len());
    for target in targets {
        let request = manifest.request_for(&target)?;
        let label = target.label().to_string();

        let mut bundler = Bundler::new(request, target).with_host(host.clone());
        if let Some(home) = &java_home {
            bundler = bundler.with_java_home(home);
        }

        let artifacts = bundler.bundle().await?;
        reports.push(TargetReport {
            target: label,
            artifacts,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}:", report.target);
            for artifact in &report.artifacts {
                println!(
                    "  {}  {} ({} bytes)",
                    artifact.checksum,
                    artifact.path.display(),
                    artifact.size
                );
            }
        }
    }

    Ok(0)
}

/// Targets to package, in manifest order.
///
/// Named labels must exist. Without labels every declared target is used,
/// or the host target when the manifest declares none. `host_only` drops
/// targets the host cannot build.
pub fn select_targets(
    manifest: &PackagingManifest,
    labels: &[String],
    host_only: bool,
    host: &HostSystem,
) -> Result<Vec<Target>> {
    let mut selected: Vec<Target> = if labels.is_empty() {
        if manifest.targets().is_empty() {
            vec![Target::host()]
        } else {
            manifest.targets().to_vec()
        }
    } else {
        for label in labels {
            if manifest.target(label).is_none() {
                return Err(CliError::UnknownTarget {
                    label: label.clone(),
                    available: manifest
                        .targets()
                        .iter()
                        .map(|t| t.label())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
                .into());
            }
        }
        manifest
            .targets()
            .iter()
            .filter(|t| labels.iter().any(|l| l == t.label()))
            .cloned()
            .collect()
    };

    if host_only {
        selected.retain(|t| {
            let keep = host.is_host_target(t);
            if !keep {
                log::info!(
                    "Skipping target '{}' ({} / {}): not buildable on this host",
                    t.label(),
                    t.operating_system(),
                    t.architecture()
                );
            }
            keep
        });
    }

    Ok(selected)
}
