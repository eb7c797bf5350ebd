//! Builder for constructing a PackagingRequest.

use super::PackagingRequest;
use crate::bundler::error::{Context, Error, Result};
use std::path::{Path, PathBuf};

/// Builder for constructing [`PackagingRequest`].
///
/// Provides a fluent API with validation of the required fields in
/// [`build`](Self::build).
///
/// # See Also
///
/// - [`PackagingRequest`] - The built request
#[derive(Default, Debug)]
pub struct PackagingRequestBuilder {
    main_module: Option<String>,
    version: Option<String>,
    application_name: Option<String>,
    application_description: Option<String>,
    vendor: Option<String>,
    copyright: Option<String>,
    module_path: Vec<PathBuf>,
    java_options: Vec<String>,
    jlink_options: Vec<String>,
    add_modules: Vec<String>,
    jpackage_resource_dir: Option<PathBuf>,
    resources: Vec<PathBuf>,
    destination: Option<PathBuf>,
    temp_directory: Option<PathBuf>,
    verbose: bool,
}

impl PackagingRequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the main module.
    ///
    /// # Required
    pub fn main_module(mut self, module: impl Into<String>) -> Self {
        self.main_module = Some(module.into());
        self
    }

    /// Sets the application version.
    ///
    /// # Required
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the application name.
    ///
    /// # Required
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    pub fn application_description(mut self, description: impl Into<String>) -> Self {
        self.application_description = Some(description.into());
        self
    }

    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    pub fn copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Sets the module path. Must contain at least the application's own module.
    pub fn module_path(mut self, entries: Vec<PathBuf>) -> Self {
        self.module_path = entries;
        self
    }

    pub fn java_options(mut self, options: Vec<String>) -> Self {
        self.java_options = options;
        self
    }

    pub fn jlink_options(mut self, options: Vec<String>) -> Self {
        self.jlink_options = options;
        self
    }

    pub fn add_modules(mut self, modules: Vec<String>) -> Self {
        self.add_modules = modules;
        self
    }

    /// Sets the directory of jpackage resource templates for the target OS.
    ///
    /// Default: None (jpackage uses its built-in resources)
    pub fn jpackage_resource_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.jpackage_resource_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    /// Sets the output directory.
    ///
    /// # Required
    pub fn destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch directory.
    ///
    /// # Required
    pub fn temp_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temp_directory = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or blank, or if the
    /// module path is empty.
    pub fn build(self) -> Result<PackagingRequest> {
        let main_module = non_blank(self.main_module, "main_module")?;
        let version = non_blank(self.version, "version")?;
        let application_name = non_blank(self.application_name, "application_name")?;

        if self.module_path.is_empty() {
            return Err(Error::InvalidRequest(
                "module_path must contain at least the application's own module".into(),
            ));
        }

        let destination = self.destination.context("destination is required")?;
        let temp_directory = self.temp_directory.context("temp_directory is required")?;
        if temp_directory.starts_with(&destination) || destination.starts_with(&temp_directory) {
            return Err(Error::InvalidRequest(format!(
                "destination {} and temp_directory {} must not contain each other",
                destination.display(),
                temp_directory.display()
            )));
        }

        Ok(PackagingRequest {
            main_module,
            version,
            application_name,
            application_description: self.application_description,
            vendor: self.vendor,
            copyright: self.copyright,
            module_path: self.module_path,
            java_options: self.java_options,
            jlink_options: self.jlink_options,
            add_modules: self.add_modules,
            jpackage_resource_dir: self.jpackage_resource_dir,
            resources: self.resources,
            destination,
            temp_directory,
            verbose: self.verbose,
        })
    }
}

fn non_blank(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(Error::InvalidRequest(format!("{} must not be empty", field))),
        None => Err(Error::InvalidRequest(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PackagingRequestBuilder {
        PackagingRequestBuilder::new()
            .application_name("Demo")
            .main_module("org.example.demo")
            .version("1.0")
            .module_path(vec!["demo.jar".into()])
            .destination("out")
            .temp_directory("tmp")
    }

    #[test]
    fn builds_complete_request() {
        let request = complete().vendor("ACME").build().unwrap();
        assert_eq!(request.main_module(), "org.example.demo");
        assert_eq!(request.vendor(), Some("ACME"));
        assert_eq!(request.copyright(), None);
        assert!(!request.verbose());
    }

    #[test]
    fn rejects_blank_main_module_and_version() {
        assert!(matches!(
            complete().main_module("").build(),
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            complete().version(" ").build(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn rejects_empty_module_path() {
        assert!(matches!(
            complete().module_path(vec![]).build(),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn scratch_and_destination_must_be_disjoint() {
        let overlapping = [
            ("out", "out/tmp"),
            ("build/tmp/out", "build/tmp"),
            ("out", "out"),
        ];
        for (destination, temp) in overlapping {
            let err = complete()
                .destination(destination)
                .temp_directory(temp)
                .build()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidRequest(_)), "{destination} / {temp}");
        }
        assert!(
            complete()
                .destination("build/out")
                .temp_directory("build/outtmp")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn destination_is_required() {
        let err = PackagingRequestBuilder::new()
            .application_name("Demo")
            .main_module("m")
            .version("1")
            .module_path(vec!["m.jar".into()])
            .temp_directory("tmp")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("destination is required"));
    }
}
