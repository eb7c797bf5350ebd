//! Installer creation, one jpackage invocation per format.

use super::recipe::{BuildRecipe, path_arg, push_pair};
use crate::bundler::{
    error::{Error, Result},
    settings::{PackageType, PackagingRequest, Target},
    tool::{ToolInvocation, ToolRunner, run_checked},
    utils::fs,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// What each installer invocation is built from.
#[derive(Debug, Clone, Copy)]
pub enum PackageSource<'a> {
    /// Wrap a prebuilt image (two-step packaging).
    AppImage(&'a Path),
    /// Rebuild from the recipe, adding staged app content (single-step packaging).
    Recipe {
        recipe: &'a BuildRecipe<'a>,
        app_content: &'a [PathBuf],
    },
}

/// Arguments for one installer invocation.
pub fn package_args(
    package_type: PackageType,
    request: &PackagingRequest,
    target: &Target,
    source: PackageSource<'_>,
) -> Result<Vec<String>> {
    let mut args = Vec::new();
    push_pair(&mut args, "--type", package_type.as_str());
    match source {
        PackageSource::AppImage(image) => {
            push_pair(&mut args, "--app-version", request.version());
            push_pair(&mut args, "--dest", &path_arg(request.destination()));
            push_pair(&mut args, "--app-image", &path_arg(image));
        }
        PackageSource::Recipe {
            recipe,
            app_content,
        } => {
            push_pair(&mut args, "--dest", &path_arg(request.destination()));
            args.extend(recipe.args(app_content)?);
        }
    }
    args.extend(target.options().iter().cloned());
    Ok(args)
}

/// Builds every requested installer format in declaration order.
///
/// `app-image` entries are skipped; the image is produced separately. The
/// first failing invocation aborts the remaining formats. Each invocation
/// must add at least one entry to the destination.
pub async fn build_packages<R: ToolRunner>(
    runner: &R,
    jpackage: &Path,
    request: &PackagingRequest,
    target: &Target,
    source: PackageSource<'_>,
) -> Result<()> {
    let destination = request.destination();

    for package_type in target.package_types().iter().filter(|t| !t.is_app_image()) {
        let before: BTreeSet<PathBuf> = fs::list_entries(destination).await?.into_iter().collect();

        log::info!(
            "Packaging {} for target '{}'",
            package_type,
            target.label()
        );
        let args = package_args(*package_type, request, target, source)?;
        run_checked(runner, &ToolInvocation::new(jpackage, args)).await?;

        let produced: Vec<PathBuf> = fs::list_entries(destination)
            .await?
            .into_iter()
            .filter(|p| !before.contains(p))
            .collect();
        if produced.is_empty() {
            return Err(Error::MissingOutput {
                package_type: package_type.to_string(),
            });
        }
        for path in &produced {
            log::info!("✓ Created {}: {}", package_type, path.display());
        }
    }

    Ok(())
}
