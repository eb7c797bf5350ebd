//! Application-level packaging recipe.

use std::path::{Path, PathBuf};

/// Application recipe shared by every target.
///
/// Describes what is being packaged: the module path, the main module and
/// the metadata and options handed to jpackage. Constructed through
/// [`PackagingRequestBuilder`](super::PackagingRequestBuilder), which
/// validates the required fields.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_jpackage::bundler::PackagingRequest;
///
/// # fn example() -> kodegen_bundler_jpackage::bundler::Result<()> {
/// let request = PackagingRequest::builder()
///     .application_name("Demo")
///     .main_module("org.example.demo")
///     .version("1.0.0")
///     .module_path(vec!["build/libs/demo.jar".into()])
///     .destination("build/packages/host")
///     .temp_directory("build/tmp/jpackage/host")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PackagingRequest {
    pub(super) main_module: String,
    pub(super) version: String,
    pub(super) application_name: String,
    pub(super) application_description: Option<String>,
    pub(super) vendor: Option<String>,
    pub(super) copyright: Option<String>,
    pub(super) module_path: Vec<PathBuf>,
    pub(super) java_options: Vec<String>,
    pub(super) jlink_options: Vec<String>,
    pub(super) add_modules: Vec<String>,
    pub(super) jpackage_resource_dir: Option<PathBuf>,
    pub(super) resources: Vec<PathBuf>,
    pub(super) destination: PathBuf,
    pub(super) temp_directory: PathBuf,
    pub(super) verbose: bool,
}

impl PackagingRequest {
    /// Starts building a request.
    pub fn builder() -> super::PackagingRequestBuilder {
        super::PackagingRequestBuilder::new()
    }

    /// Module holding the application entry point, passed to `--module`.
    pub fn main_module(&self) -> &str {
        &self.main_module
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Name of the application and its launcher.
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    pub fn application_description(&self) -> Option<&str> {
        self.application_description.as_deref()
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// Ordered jars and directories the module system resolves from.
    pub fn module_path(&self) -> &[PathBuf] {
        &self.module_path
    }

    pub fn java_options(&self) -> &[String] {
        &self.java_options
    }

    pub fn jlink_options(&self) -> &[String] {
        &self.jlink_options
    }

    pub fn add_modules(&self) -> &[String] {
        &self.add_modules
    }

    /// Directory of jpackage resource templates (icons, scripts) for the target OS.
    pub fn jpackage_resource_dir(&self) -> Option<&Path> {
        self.jpackage_resource_dir.as_deref()
    }

    /// Files merged into the image's `app` folder.
    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    /// Where installers and checksum sidecars are written.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Scratch directory; cleared before every run.
    pub fn temp_directory(&self) -> &Path {
        &self.temp_directory
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
