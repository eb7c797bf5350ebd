//! Packaging target: one OS/architecture destination and its formats.

use super::{Arch, OperatingSystem, PackageType};
use crate::bundler::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// One packaging destination.
///
/// Constructed through [`TargetBuilder`]; OS and architecture are fixed at
/// construction and the package type defaults are resolved there as well.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_jpackage::bundler::{Arch, OperatingSystem, PackageType, Target};
///
/// # fn example() -> kodegen_bundler_jpackage::bundler::Result<()> {
/// let target = Target::builder("ubuntu", OperatingSystem::Linux, Arch::X86_64)
///     .package_types(vec![PackageType::Deb])
///     .options(vec!["--linux-shortcut".into()])
///     .build()?;
/// assert_eq!(target.package_types(), &[PackageType::Deb]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Target {
    label: String,
    operating_system: OperatingSystem,
    architecture: Arch,
    package_types: Vec<PackageType>,
    options: Vec<String>,
    app_image_options: Vec<String>,
    target_resources: Vec<PathBuf>,
    single_step_packaging: bool,
}

impl Target {
    /// Starts building a target.
    pub fn builder(
        label: impl Into<String>,
        operating_system: OperatingSystem,
        architecture: Arch,
    ) -> TargetBuilder {
        TargetBuilder::new(label, operating_system, architecture)
    }

    /// Target matching the running host, labelled `host`, with OS-default formats.
    pub fn host() -> Self {
        let host = crate::bundler::HostSystem::current();
        Self {
            label: "host".to_string(),
            operating_system: host.operating_system(),
            architecture: host.architecture(),
            package_types: PackageType::defaults_for(host.operating_system()),
            options: Vec::new(),
            app_image_options: Vec::new(),
            target_resources: Vec::new(),
            single_step_packaging: false,
        }
    }

    /// Unique label, used to derive output directory names.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn operating_system(&self) -> OperatingSystem {
        self.operating_system
    }

    pub fn architecture(&self) -> Arch {
        self.architecture
    }

    /// Requested formats in declaration order, without duplicates.
    pub fn package_types(&self) -> &[PackageType] {
        &self.package_types
    }

    /// Raw arguments appended to every per-format invocation.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Raw arguments appended to the app-image invocation only.
    pub fn app_image_options(&self) -> &[String] {
        &self.app_image_options
    }

    /// Files copied into the root of the produced image.
    pub fn target_resources(&self) -> &[PathBuf] {
        &self.target_resources
    }

    pub fn single_step_packaging(&self) -> bool {
        self.single_step_packaging
    }

    /// Whether any installer format (anything but app-image) is requested.
    pub fn has_installer_types(&self) -> bool {
        self.package_types.iter().any(|t| !t.is_app_image())
    }

    /// Whether the app-image itself is a requested output.
    pub fn requests_app_image(&self) -> bool {
        self.package_types.iter().any(PackageType::is_app_image)
    }
}

/// Builder for [`Target`].
#[derive(Debug)]
pub struct TargetBuilder {
    label: String,
    operating_system: OperatingSystem,
    architecture: Arch,
    package_types: Option<Vec<PackageType>>,
    options: Vec<String>,
    app_image_options: Vec<String>,
    target_resources: Vec<PathBuf>,
    single_step_packaging: bool,
}

impl TargetBuilder {
    /// Creates a builder for the given label, OS and architecture.
    pub fn new(
        label: impl Into<String>,
        operating_system: OperatingSystem,
        architecture: Arch,
    ) -> Self {
        Self {
            label: label.into(),
            operating_system,
            architecture,
            package_types: None,
            options: Vec::new(),
            app_image_options: Vec::new(),
            target_resources: Vec::new(),
            single_step_packaging: false,
        }
    }

    /// Sets the formats to build.
    ///
    /// Default: the OS defaults from [`PackageType::defaults_for`]
    pub fn package_types(mut self, types: Vec<PackageType>) -> Self {
        self.package_types = Some(types);
        self
    }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn app_image_options(mut self, options: Vec<String>) -> Self {
        self.app_image_options = options;
        self
    }

    pub fn target_resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.target_resources = resources;
        self
    }

    /// Adds a single target resource.
    pub fn target_resource(mut self, resource: impl AsRef<Path>) -> Self {
        self.target_resources.push(resource.as_ref().to_path_buf());
        self
    }

    /// Collapses image and installer builds into one invocation per format.
    ///
    /// Default: false
    pub fn single_step_packaging(mut self, enabled: bool) -> Self {
        self.single_step_packaging = enabled;
        self
    }

    /// Builds the target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTarget`] if the label is blank or the package
    /// type list was set explicitly to an empty list.
    pub fn build(self) -> Result<Target> {
        if self.label.trim().is_empty() {
            return Err(Error::InvalidTarget("target label must not be empty".into()));
        }
        if !is_path_segment(&self.label) {
            return Err(Error::InvalidTarget(format!(
                "target label '{}' must be a single path segment",
                self.label
            )));
        }

        let requested = self
            .package_types
            .unwrap_or_else(|| PackageType::defaults_for(self.operating_system));

        let mut package_types = Vec::with_capacity(requested.len());
        for t in requested {
            if !package_types.contains(&t) {
                package_types.push(t);
            }
        }

        if package_types.is_empty() {
            return Err(Error::InvalidTarget(format!(
                "target '{}' requests no package types",
                self.label
            )));
        }

        Ok(Target {
            label: self.label,
            operating_system: self.operating_system,
            architecture: self.architecture,
            package_types,
            options: self.options,
            app_image_options: self.app_image_options,
            target_resources: self.target_resources,
            single_step_packaging: self.single_step_packaging,
        })
    }
}

/// Whether `label` names exactly one plain directory below its parent.
///
/// Labels are joined into directories that get erased, so `..`, absolute
/// paths and nested paths are not accepted.
pub(crate) fn is_path_segment(label: &str) -> bool {
    let mut components = Path::new(label).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !label.contains(['/', '\\'])
}
