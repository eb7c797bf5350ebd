//! Packaging manifest loading.
//!
//! A manifest (conventionally `jpackage.toml`) describes the application
//! once and any number of targets:
//!
//! ```toml
//! [application]
//! name = "Demo"
//! main_module = "org.example.demo"
//! version = "1.0.0"
//! module_path = ["build/libs/*.jar"]
//! jpackage_resources = "packaging"      # holds windows/, macos/, linux/
//! resources = ["config/**/*.properties"]
//!
//! [[target]]
//! label = "ubuntu"
//! operating_system = "linux"
//! architecture = "x86-64"
//! package_types = ["deb"]
//! ```
//!
//! Relative paths resolve against the manifest's directory. Entries
//! containing glob characters are expanded, sorted and de-duplicated.

use crate::bundler::settings::is_path_segment;
use crate::bundler::{Arch, OperatingSystem, PackageType, PackagingRequest, Target};
use crate::error::{BundlerError, CliError, Result};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "jpackage.toml";

/// Default build directory, relative to the manifest.
pub const DEFAULT_BUILD_DIRECTORY: &str = "build";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    application: RawApplication,
    #[serde(default, rename = "target")]
    targets: Vec<RawTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawApplication {
    name: String,
    main_module: String,
    version: String,
    description: Option<String>,
    vendor: Option<String>,
    copyright: Option<String>,
    #[serde(default)]
    module_path: Vec<String>,
    #[serde(default)]
    java_options: Vec<String>,
    #[serde(default)]
    jlink_options: Vec<String>,
    #[serde(default)]
    add_modules: Vec<String>,
    jpackage_resources: Option<String>,
    #[serde(default)]
    resources: Vec<String>,
    #[serde(default)]
    verbose: bool,
    java_home: Option<String>,
    build_directory: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTarget {
    label: String,
    operating_system: OperatingSystem,
    architecture: Arch,
    package_types: Option<Vec<PackageType>>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    app_image_options: Vec<String>,
    #[serde(default)]
    target_resources: Vec<String>,
    #[serde(default)]
    single_step_packaging: bool,
}

/// Application section with paths resolved.
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    pub name: String,
    pub main_module: String,
    pub version: String,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub copyright: Option<String>,
    pub module_path: Vec<PathBuf>,
    pub java_options: Vec<String>,
    pub jlink_options: Vec<String>,
    pub add_modules: Vec<String>,
    /// Root holding one template directory per OS
    pub jpackage_resources: Option<PathBuf>,
    pub resources: Vec<PathBuf>,
    pub verbose: bool,
    pub java_home: Option<PathBuf>,
    pub build_directory: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestVerbosity {
    #[serde(default)]
    application: ApplicationVerbosity,
}

#[derive(Debug, Default, Deserialize)]
struct ApplicationVerbosity {
    #[serde(default)]
    verbose: bool,
}

/// Whether the manifest at `path` sets `application.verbose`.
///
/// Read before logging is set up; an unreadable or invalid manifest counts
/// as not verbose and is reported by [`PackagingManifest::load`] later.
pub fn manifest_requests_verbose(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| toml::from_str::<ManifestVerbosity>(&content).ok())
        .is_some_and(|manifest| manifest.application.verbose)
}

/// Parsed manifest: one application, many targets.
#[derive(Debug, Clone)]
pub struct PackagingManifest {
    application: ApplicationConfig,
    targets: Vec<Target>,
}

impl PackagingManifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BundlerError::Cli(CliError::ExecutionFailed {
                command: "read_manifest".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            })
        })?;

        let base_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let base_dir = base_dir.absolutize()?.into_owned();

        Self::parse(&content, &base_dir).map_err(|e| match e {
            BundlerError::Toml(err) => BundlerError::Cli(CliError::InvalidManifest {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }),
            other => other,
        })
    }

    /// Parses manifest text, resolving relative paths against `base_dir`.
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(content)?;
        let app = raw.application;

        let application = ApplicationConfig {
            name: app.name,
            main_module: app.main_module,
            version: app.version,
            description: app.description,
            vendor: app.vendor,
            copyright: app.copyright,
            module_path: expand_all(&app.module_path, base_dir)?,
            java_options: app.java_options,
            jlink_options: app.jlink_options,
            add_modules: app.add_modules,
            jpackage_resources: app
                .jpackage_resources
                .map(|p| resolve(&p, base_dir))
                .transpose()?,
            resources: expand_all(&app.resources, base_dir)?,
            verbose: app.verbose,
            java_home: app.java_home.map(|p| resolve(&p, base_dir)).transpose()?,
            build_directory: resolve(
                app.build_directory
                    .as_deref()
                    .unwrap_or(DEFAULT_BUILD_DIRECTORY),
                base_dir,
            )?,
        };

        let mut labels = BTreeSet::new();
        let mut targets = Vec::with_capacity(raw.targets.len());
        for t in raw.targets {
            if !labels.insert(t.label.clone()) {
                return Err(BundlerError::Cli(CliError::InvalidArguments {
                    reason: format!("duplicate target label '{}'", t.label),
                }));
            }

            let mut builder = Target::builder(t.label, t.operating_system, t.architecture)
                .options(t.options)
                .app_image_options(t.app_image_options)
                .target_resources(expand_all(&t.target_resources, base_dir)?)
                .single_step_packaging(t.single_step_packaging);
            if let Some(types) = t.package_types {
                builder = builder.package_types(types);
            }
            targets.push(builder.build()?);
        }

        Ok(Self {
            application,
            targets,
        })
    }

    /// Forces `jpackage --verbose` for every request built afterwards.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.application.verbose = verbose;
        self
    }

    pub fn application(&self) -> &ApplicationConfig {
        &self.application
    }

    /// Targets in declaration order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Target with the given label.
    pub fn target(&self, label: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.label() == label)
    }

    /// All targets declared for `os`.
    pub fn targets_with_os(&self, os: OperatingSystem) -> Vec<&Target> {
        self.targets
            .iter()
            .filter(|t| t.operating_system() == os)
            .collect()
    }

    /// Destination for `target`: `<build>/packages/<label>`.
    pub fn destination_for(&self, target: &Target) -> PathBuf {
        debug_assert!(is_path_segment(target.label()));
        self.application
            .build_directory
            .join("packages")
            .join(target.label())
    }

    /// Scratch directory for `target`: `<build>/tmp/jpackage/<label>`.
    pub fn temp_directory_for(&self, target: &Target) -> PathBuf {
        debug_assert!(is_path_segment(target.label()));
        self.application
            .build_directory
            .join("tmp")
            .join("jpackage")
            .join(target.label())
    }

    /// Packaging request for `target`, with the OS-specific template directory.
    pub fn request_for(&self, target: &Target) -> Result<PackagingRequest> {
        let app = &self.application;
        let mut builder = PackagingRequest::builder()
            .application_name(&app.name)
            .main_module(&app.main_module)
            .version(&app.version)
            .module_path(app.module_path.clone())
            .java_options(app.java_options.clone())
            .jlink_options(app.jlink_options.clone())
            .add_modules(app.add_modules.clone())
            .resources(app.resources.clone())
            .destination(self.destination_for(target))
            .temp_directory(self.temp_directory_for(target))
            .verbose(app.verbose);

        if let Some(description) = &app.description {
            builder = builder.application_description(description);
        }
        if let Some(vendor) = &app.vendor {
            builder = builder.vendor(vendor);
        }
        if let Some(copyright) = &app.copyright {
            builder = builder.copyright(copyright);
        }
        if let Some(root) = &app.jpackage_resources {
            builder = builder.jpackage_resource_dir(root.join(target.operating_system().as_str()));
        }

        Ok(builder.build()?)
    }
}

/// Absolute path of `entry` relative to `base_dir`.
fn resolve(entry: &str, base_dir: &Path) -> Result<PathBuf> {
    Ok(Path::new(entry).absolutize_from(base_dir)?.into_owned())
}

fn is_pattern(entry: &str) -> bool {
    entry.contains(['*', '?', '['])
}

/// Expands every entry, keeping the declared order of entries.
///
/// Literal paths are kept even if they do not exist yet; patterns yield
/// their sorted matches. Later duplicates are dropped.
fn expand_all(entries: &[String], base_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = BTreeSet::new();
    let mut expanded = Vec::new();

    for entry in entries {
        let matches = if is_pattern(entry) {
            let pattern = if Path::new(entry).is_absolute() {
                entry.clone()
            } else {
                base_dir.join(entry).to_string_lossy().into_owned()
            };
            let paths = glob::glob(&pattern).map_err(|e| {
                BundlerError::Cli(CliError::InvalidArguments {
                    reason: format!("invalid pattern '{}': {}", entry, e),
                })
            })?;
            let mut matches = Vec::new();
            for path in paths {
                matches.push(path.map_err(|e| {
                    BundlerError::Cli(CliError::InvalidArguments {
                        reason: format!("cannot expand '{}': {}", entry, e),
                    })
                })?);
            }
            if matches.is_empty() {
                log::warn!("Pattern '{}' matched no files", entry);
            }
            matches.sort();
            matches
        } else {
            vec![resolve(entry, base_dir)?]
        };

        for path in matches {
            if seen.insert(path.clone()) {
                expanded.push(path);
            }
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [application]
        name = "Demo"
        main_module = "org.example.demo"
        version = "1.0.0"
        module_path = ["libs/demo.jar", "libs/deps"]
        jpackage_resources = "packaging"
        java_options = ["-Xmx512m"]

        [[target]]
        label = "ubuntu"
        operating_system = "linux"
        architecture = "x86-64"
        package_types = ["deb"]

        [[target]]
        label = "windows"
        operating_system = "Windows"
        architecture = "amd64"
        single_step_packaging = true

        [[target]]
        label = "fedora"
        operating_system = "linux"
        architecture = "aarch64"
    "#;

    #[test]
    fn verbose_flag_is_read_without_full_parse() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("jpackage.toml");

        std::fs::write(&manifest, "[application]\nname = \"Demo\"\nverbose = true\n").unwrap();
        assert!(manifest_requests_verbose(&manifest));

        std::fs::write(&manifest, "[application]\nname = \"Demo\"\n").unwrap();
        assert!(!manifest_requests_verbose(&manifest));

        assert!(!manifest_requests_verbose(&dir.path().join("absent.toml")));
    }

    #[test]
    fn label_must_stay_inside_the_build_directory() {
        let manifest = r#"
            [application]
            name = "Demo"
            main_module = "m"
            version = "1"

            [[target]]
            label = "../../src"
            operating_system = "linux"
            architecture = "x86_64"
        "#;
        let err = PackagingManifest::parse(manifest, Path::new("/project")).unwrap_err();
        assert!(err.to_string().contains("single path segment"), "{err}");
    }

    #[test]
    fn parses_targets_with_defaults() {
        let base = Path::new("/project");
        let manifest = PackagingManifest::parse(MANIFEST, base).unwrap();

        let windows = manifest.target("windows").unwrap();
        assert_eq!(windows.operating_system(), OperatingSystem::Windows);
        assert_eq!(windows.architecture(), Arch::X86_64);
        assert_eq!(windows.package_types(), &[PackageType::Exe, PackageType::Msi]);
        assert!(windows.single_step_packaging());

        let fedora = manifest.target("fedora").unwrap();
        assert_eq!(fedora.architecture(), Arch::Arm64);
        assert_eq!(fedora.package_types(), &[PackageType::Rpm, PackageType::Deb]);

        assert_eq!(
            manifest.application().module_path,
            vec![PathBuf::from("/project/libs/demo.jar"), PathBuf::from("/project/libs/deps")]
        );
    }

    #[test]
    fn targets_with_os_filters_in_order() {
        let manifest = PackagingManifest::parse(MANIFEST, Path::new("/project")).unwrap();
        let labels: Vec<_> = manifest
            .targets_with_os(OperatingSystem::Linux)
            .iter()
            .map(|t| t.label())
            .collect();
        assert_eq!(labels, vec!["ubuntu", "fedora"]);
        assert!(manifest.targets_with_os(OperatingSystem::MacOs).is_empty());
    }

    #[test]
    fn request_uses_build_conventions() {
        let manifest = PackagingManifest::parse(MANIFEST, Path::new("/project")).unwrap();
        let target = manifest.target("ubuntu").unwrap();
        let request = manifest.request_for(target).unwrap();

        assert_eq!(request.destination(), Path::new("/project/build/packages/ubuntu"));
        assert_eq!(
            request.temp_directory(),
            Path::new("/project/build/tmp/jpackage/ubuntu")
        );
        assert_eq!(
            request.jpackage_resource_dir(),
            Some(Path::new("/project/packaging/linux"))
        );
        assert_eq!(request.java_options(), &["-Xmx512m".to_string()]);
    }

    #[test]
    fn duplicate_labels_are_rejected() {
        let content = r#"
            [application]
            name = "Demo"
            main_module = "m"
            version = "1"
            module_path = ["m.jar"]

            [[target]]
            label = "a"
            operating_system = "linux"
            architecture = "x86_64"

            [[target]]
            label = "a"
            operating_system = "linux"
            architecture = "x86_64"
        "#;
        assert!(PackagingManifest::parse(content, Path::new("/p")).is_err());
    }

    #[test]
    fn unknown_package_type_is_rejected() {
        let content = r#"
            [application]
            name = "Demo"
            main_module = "m"
            version = "1"

            [[target]]
            label = "a"
            operating_system = "linux"
            architecture = "x86_64"
            package_types = ["zip"]
        "#;
        assert!(matches!(
            PackagingManifest::parse(content, Path::new("/p")),
            Err(BundlerError::Toml(_))
        ));
    }

    #[test]
    fn globs_expand_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let libs = dir.path().join("libs");
        std::fs::create_dir_all(&libs).unwrap();
        std::fs::write(libs.join("b.jar"), b"").unwrap();
        std::fs::write(libs.join("a.jar"), b"").unwrap();
        std::fs::write(libs.join("notes.txt"), b"").unwrap();

        let expanded = expand_all(
            &["libs/*.jar".to_string(), "libs/a.jar".to_string()],
            dir.path(),
        )
        .unwrap();
        assert_eq!(expanded, vec![libs.join("a.jar"), libs.join("b.jar")]);
    }
}
