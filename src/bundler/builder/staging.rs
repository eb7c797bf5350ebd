//! jpackage resource staging.
//!
//! jpackage picks up custom resources from `--resource-dir` by file name,
//! and icons are expected as `<appName>.<ext>`. Templates are kept
//! generic (`icon.icns`, `icon.ico`, `icon.png`) and renamed while staging.

use crate::bundler::{error::Result, utils::fs};
use std::path::Path;

/// Token in template file names replaced by the application name.
pub const ICON_TOKEN: &str = "icon";

/// Name a template file is staged under.
///
/// Every occurrence of [`ICON_TOKEN`] is replaced by `application_name`;
/// the extension is untouched.
pub fn staged_file_name(file_name: &str, application_name: &str) -> String {
    file_name.replace(ICON_TOKEN, application_name)
}

/// Copies the resource templates from `source` into a fresh `staging_dir`.
///
/// A missing `source` leaves `staging_dir` empty, which makes jpackage fall
/// back to its built-in resources.
pub async fn stage_jpackage_resources(
    source: Option<&Path>,
    staging_dir: &Path,
    application_name: &str,
) -> Result<()> {
    fs::create_dir_all(staging_dir, true).await?;

    let Some(source) = source else {
        log::debug!("No jpackage resource directory configured");
        return Ok(());
    };

    if !source.is_dir() {
        log::warn!(
            "jpackage resource directory not found: {}",
            source.display()
        );
        return Ok(());
    }

    let app_name = application_name.to_string();
    fs::copy_dir_renaming(source, staging_dir, move |name| {
        staged_file_name(name, &app_name)
    })
    .await?;

    log::info!(
        "✓ Staged jpackage resources from {} into {}",
        source.display(),
        staging_dir.display()
    );
    Ok(())
}
