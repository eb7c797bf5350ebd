//! jpackage executable detection.
//!
//! jpackage ships in the `bin/` directory of every JDK since 16. The
//! executable is looked up in an explicit JDK first, then `JAVA_HOME`, then
//! `PATH`.

use crate::bundler::{
    error::{Error, Result},
    settings::OperatingSystem,
};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `JAVA_HOME` from the environment, read once.
static JAVA_HOME: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    std::env::var_os("JAVA_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
});

/// Locates jpackage for a run targeting `os`.
///
/// # Lookup order
///
/// 1. `<java_home>/bin/<exe>` when `java_home` is given
/// 2. `$JAVA_HOME/bin/<exe>`
/// 3. `<exe>` on `PATH`
///
/// An explicit `java_home` without jpackage is an error rather than a reason
/// to fall through, so a misconfigured JDK is not silently replaced.
pub fn locate_jpackage(java_home: Option<&Path>, os: OperatingSystem) -> Result<PathBuf> {
    let exe = os.jpackage_executable();

    if let Some(home) = java_home {
        let candidate = home.join("bin").join(exe);
        if candidate.is_file() {
            log::debug!("Found jpackage in configured JDK: {}", candidate.display());
            return Ok(candidate);
        }
        return Err(Error::ToolNotFound(format!(
            "{} does not exist (configured java_home: {})",
            candidate.display(),
            home.display()
        )));
    }

    if let Some(home) = JAVA_HOME.as_deref() {
        let candidate = home.join("bin").join(exe);
        if candidate.is_file() {
            log::debug!("Found jpackage via JAVA_HOME: {}", candidate.display());
            return Ok(candidate);
        }
        log::warn!(
            "JAVA_HOME is set to {} but {} is missing; falling back to PATH",
            home.display(),
            candidate.display()
        );
    }

    match which::which(exe) {
        Ok(path) => {
            log::debug!("Found jpackage on PATH: {}", path.display());
            Ok(path)
        }
        Err(e) => Err(Error::ToolNotFound(format!(
            "{} is not on PATH ({}). Install a JDK 16+ or set java_home / JAVA_HOME",
            exe, e
        ))),
    }
}
