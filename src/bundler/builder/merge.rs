//! Resource merging into app-images.
//!
//! jpackage lays out an image differently per OS. Target resources go into
//! the application root, application resources into its `app` folder, from
//! which the packaged runtime reads bundled resources at startup.
//!
//! | OS      | app root             | resources folder         |
//! |---------|----------------------|--------------------------|
//! | macOS   | `<image>/Contents`   | `<image>/Contents/app`   |
//! | Windows | `<image>`            | `<image>/app`            |
//! | Linux   | `<image>/lib`        | `<image>/lib/app`        |

use crate::bundler::{
    error::Result,
    settings::{OperatingSystem, PackagingRequest, Target},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Name of the resources folder below the app root.
pub const APP_RESOURCES_DIR: &str = "app";

/// Application root inside `image` for `os`.
pub fn app_root(image: &Path, os: OperatingSystem) -> PathBuf {
    match os {
        OperatingSystem::MacOs => image.join("Contents"),
        OperatingSystem::Windows => image.to_path_buf(),
        OperatingSystem::Linux => image.join("lib"),
    }
}

/// Application resources folder inside `image` for `os`.
pub fn app_resources_dir(image: &Path, os: OperatingSystem) -> PathBuf {
    app_root(image, os).join(APP_RESOURCES_DIR)
}

/// Copies target resources into `root` and application resources into `root/app`.
async fn merge_into_root(root: &Path, request: &PackagingRequest, target: &Target) -> Result<()> {
    fs::create_dir_all(root, false).await?;
    fs::copy_file_set(target.target_resources(), root).await?;
    if !request.resources().is_empty() {
        fs::copy_file_set(request.resources(), &root.join(APP_RESOURCES_DIR)).await?;
    }
    Ok(())
}

/// Merges resources into an already produced image.
pub async fn merge_into_image(
    image: &Path,
    request: &PackagingRequest,
    target: &Target,
) -> Result<()> {
    let root = app_root(image, target.operating_system());
    merge_into_root(&root, request, target).await?;
    log::info!("✓ Merged resources into {}", root.display());
    Ok(())
}

/// Stages the same merge into a fresh `staging_root` for `--app-content`.
///
/// Returns the top-level entries of the staged tree, sorted; each becomes
/// one `--app-content` argument.
pub async fn stage_app_content(
    staging_root: &Path,
    request: &PackagingRequest,
    target: &Target,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(staging_root, true).await?;
    merge_into_root(staging_root, request, target).await?;
    let entries = fs::list_entries(staging_root).await?;
    log::info!(
        "✓ Staged {} app-content entries in {}",
        entries.len(),
        staging_root.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_per_os() {
        let image = Path::new("/out/Demo");
        assert_eq!(
            app_resources_dir(image, OperatingSystem::MacOs),
            Path::new("/out/Demo/Contents/app")
        );
        assert_eq!(
            app_resources_dir(image, OperatingSystem::Windows),
            Path::new("/out/Demo/app")
        );
        assert_eq!(
            app_resources_dir(image, OperatingSystem::Linux),
            Path::new("/out/Demo/lib/app")
        );
        assert_eq!(app_root(image, OperatingSystem::Windows), image);
    }
}
