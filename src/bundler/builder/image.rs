//! App-image creation.

use super::recipe::{BuildRecipe, path_arg, push_pair};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{PackageType, Target},
    tool::{ToolInvocation, ToolRunner, run_checked},
};
use std::path::{Path, PathBuf};

/// Builds the app-image into `dest` with `jpackage --type app-image`.
///
/// `appImageOptions` are appended last so they can override anything the
/// recipe sets.
pub async fn build_app_image<R: ToolRunner>(
    runner: &R,
    jpackage: &Path,
    recipe: &BuildRecipe<'_>,
    target: &Target,
    dest: &Path,
) -> Result<PathBuf> {
    let mut args = Vec::new();
    push_pair(&mut args, "--type", PackageType::AppImage.as_str());
    push_pair(&mut args, "--dest", &path_arg(dest));
    args.extend(recipe.args(&[])?);
    args.extend(target.app_image_options().iter().cloned());

    log::info!("Building app-image for target '{}'", target.label());
    run_checked(runner, &ToolInvocation::new(jpackage, args)).await?;

    let image = find_app_image(dest).await?;
    log::info!("✓ Created app-image: {}", image.display());
    Ok(image)
}

/// The single directory jpackage left in `dest`.
pub async fn find_app_image(dest: &Path) -> Result<PathBuf> {
    let mut entries = tokio::fs::read_dir(dest)
        .await
        .fs_context("reading app-image destination", dest)?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("reading app-image destination", dest)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("reading file type", entry.path())?;
        if file_type.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();

    match dirs.len() {
        0 => Err(Error::MissingOutput {
            package_type: PackageType::AppImage.to_string(),
        }),
        1 => Ok(dirs.remove(0)),
        n => {
            log::warn!(
                "{} directories found in {}; using {}",
                n,
                dest.display(),
                dirs[0].display()
            );
            Ok(dirs.remove(0))
        }
    }
}
