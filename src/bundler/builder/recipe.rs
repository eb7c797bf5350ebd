//! Shared jpackage build recipe.
//!
//! The app-image build and the single-step package build accept the same
//! flags. Both are assembled here so the two invocation shapes cannot drift
//! apart; the only parameter is the optional `--app-content` list.

use crate::bundler::{
    error::{Error, Result},
    settings::{OperatingSystem, PackagingRequest},
};
use std::path::{Path, PathBuf};

/// Everything jpackage needs to build the application from the module path.
#[derive(Debug, Clone, Copy)]
pub struct BuildRecipe<'a> {
    request: &'a PackagingRequest,
    resource_dir: &'a Path,
    os: OperatingSystem,
}

impl<'a> BuildRecipe<'a> {
    /// Recipe for `request`, using the staged `resource_dir`.
    pub fn new(request: &'a PackagingRequest, resource_dir: &'a Path, os: OperatingSystem) -> Self {
        Self {
            request,
            resource_dir,
            os,
        }
    }

    /// Recipe arguments, followed by one `--app-content` per entry.
    ///
    /// Order: module, resource dir, version, module path, name, optional
    /// description/vendor/copyright, java options, jlink options,
    /// add-modules, verbose, app content.
    pub fn args(&self, app_content: &[PathBuf]) -> Result<Vec<String>> {
        let request = self.request;
        let mut args = Vec::new();

        push_pair(&mut args, "--module", request.main_module());
        push_pair(&mut args, "--resource-dir", &path_arg(self.resource_dir));
        push_pair(&mut args, "--app-version", request.version());
        push_pair(&mut args, "--module-path", &self.module_path()?);
        push_pair(&mut args, "--name", request.application_name());

        if let Some(description) = request.application_description() {
            push_pair(&mut args, "--description", description);
        }
        if let Some(vendor) = request.vendor() {
            push_pair(&mut args, "--vendor", vendor);
        }
        if let Some(copyright) = request.copyright() {
            push_pair(&mut args, "--copyright", copyright);
        }
        for option in request.java_options() {
            push_pair(&mut args, "--java-options", option);
        }
        for option in request.jlink_options() {
            push_pair(&mut args, "--jlink-options", option);
        }
        if !request.add_modules().is_empty() {
            push_pair(&mut args, "--add-modules", &request.add_modules().join(","));
        }
        if request.verbose() {
            args.push("--verbose".to_string());
        }
        for content in app_content {
            push_pair(&mut args, "--app-content", &path_arg(content));
        }

        Ok(args)
    }

    /// Module path joined with the OS path-list separator.
    pub fn module_path(&self) -> Result<String> {
        let separator = self.os.path_list_separator();
        let mut joined = String::new();
        for (i, entry) in self.request.module_path().iter().enumerate() {
            let entry = path_arg(entry);
            if entry.contains(separator) {
                return Err(Error::InvalidRequest(format!(
                    "module path entry '{}' contains the path separator '{}'",
                    entry, separator
                )));
            }
            if i > 0 {
                joined.push(separator);
            }
            joined.push_str(&entry);
        }
        Ok(joined)
    }
}

/// Appends `flag value`.
pub(crate) fn push_pair(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

/// Path rendered as a single argument.
pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
