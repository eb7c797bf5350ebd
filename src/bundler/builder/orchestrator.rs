//! Main packaging orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that drives jpackage
//! through one packaging run for one target.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::bundler::{
    BundledArtifact, HostSystem, PackagingRequest, Result, Target,
    tool::{ProcessRunner, ToolRunner, locate_jpackage},
    utils::fs,
};

use super::{
    checksum::write_checksums,
    image::build_app_image,
    merge::{merge_into_image, stage_app_content},
    package::{PackageSource, build_packages},
    recipe::BuildRecipe,
    staging::stage_jpackage_resources,
};

/// Scratch sub-directory holding the staged resource templates.
const RESOURCES_STAGING_DIR: &str = "jpackage-resources";
/// Scratch sub-directory holding staged `--app-content` entries.
const APP_CONTENT_STAGING_DIR: &str = "app-content";

/// Phases of one packaging run, in order.
///
/// Any failure ends the run; there is no resume, a rerun starts over.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    HostValidated,
    ImageBuilt,
    ResourcesMerged,
    Packaged,
    ChecksumsWritten,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::HostValidated => "host validated",
            Stage::ImageBuilt => "app-image built",
            Stage::ResourcesMerged => "resources merged",
            Stage::Packaged => "packaged",
            Stage::ChecksumsWritten => "checksums written",
        })
    }
}

/// Main packaging orchestrator.
///
/// Runs the phases for one [`Target`]:
///
/// 1. Validate that the host can build the target (before anything else)
/// 2. Clear destination and scratch directories
/// 3. Stage jpackage resource templates
/// 4. Build the app-image (two-step, or when `app-image` is requested)
/// 5. Merge resources into the image, or stage them as app content
/// 6. Build each installer format
/// 7. Write `.sha256` sidecars for every artifact
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_jpackage::bundler::{Bundler, PackagingRequest, Target};
///
/// # async fn example(request: PackagingRequest) -> kodegen_bundler_jpackage::bundler::Result<()> {
/// let bundler = Bundler::new(request, Target::host());
/// for artifact in bundler.bundle().await? {
///     println!("{}  {}", artifact.checksum, artifact.path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<R = ProcessRunner> {
    request: PackagingRequest,
    target: Target,
    runner: R,
    host: HostSystem,
    jpackage: Option<PathBuf>,
    java_home: Option<PathBuf>,
}

impl Bundler<ProcessRunner> {
    /// Creates a bundler that runs jpackage as a child process on the current host.
    pub fn new(request: PackagingRequest, target: Target) -> Self {
        Self {
            request,
            target,
            runner: ProcessRunner::new(),
            host: HostSystem::current(),
            jpackage: None,
            java_home: None,
        }
    }
}

impl<R: ToolRunner> Bundler<R> {
    /// Replaces the process runner.
    pub fn with_runner<T: ToolRunner>(self, runner: T) -> Bundler<T> {
        Bundler {
            request: self.request,
            target: self.target,
            runner,
            host: self.host,
            jpackage: self.jpackage,
            java_home: self.java_home,
        }
    }

    /// Overrides the host the target is validated against.
    pub fn with_host(mut self, host: HostSystem) -> Self {
        self.host = host;
        self
    }

    /// Uses this jpackage executable instead of looking one up.
    pub fn with_jpackage(mut self, jpackage: impl AsRef<Path>) -> Self {
        self.jpackage = Some(jpackage.as_ref().to_path_buf());
        self
    }

    /// Looks jpackage up in this JDK.
    pub fn with_java_home(mut self, java_home: impl AsRef<Path>) -> Self {
        self.java_home = Some(java_home.as_ref().to_path_buf());
        self
    }

    pub fn request(&self) -> &PackagingRequest {
        &self.request
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Runs all phases and returns the checksummed artifacts.
    pub async fn bundle(&self) -> Result<Vec<BundledArtifact>> {
        let request = &self.request;
        let target = &self.target;
        let os = target.operating_system();

        self.host.validate(target.architecture(), os)?;
        self.advance(Stage::HostValidated);

        let jpackage = match &self.jpackage {
            Some(path) => path.clone(),
            None => locate_jpackage(self.java_home.as_deref(), os)?,
        };

        fs::remove_dir_all(request.temp_directory()).await?;
        fs::create_dir_all(request.destination(), true).await?;

        let resource_dir = request.temp_directory().join(RESOURCES_STAGING_DIR);
        stage_jpackage_resources(
            request.jpackage_resource_dir(),
            &resource_dir,
            request.application_name(),
        )
        .await?;

        let recipe = BuildRecipe::new(request, &resource_dir, os);
        let single_step = target.single_step_packaging();

        let image = if !single_step || target.requests_app_image() {
            let image = build_app_image(
                &self.runner,
                &jpackage,
                &recipe,
                target,
                request.destination(),
            )
            .await?;
            self.advance(Stage::ImageBuilt);
            merge_into_image(&image, request, target).await?;
            Some(image)
        } else {
            log::debug!("Single-step packaging: skipping app-image build");
            None
        };

        if target.has_installer_types() {
            let app_content;
            let source = match image.as_deref() {
                Some(image) if !single_step => PackageSource::AppImage(image),
                _ => {
                    let staging_root = request.temp_directory().join(APP_CONTENT_STAGING_DIR);
                    app_content = stage_app_content(&staging_root, request, target).await?;
                    PackageSource::Recipe {
                        recipe: &recipe,
                        app_content: &app_content,
                    }
                }
            };
            self.advance(Stage::ResourcesMerged);
            build_packages(&self.runner, &jpackage, request, target, source).await?;
        } else {
            self.advance(Stage::ResourcesMerged);
        }
        self.advance(Stage::Packaged);

        let artifacts = write_checksums(request.destination()).await?;
        self.advance(Stage::ChecksumsWritten);

        Ok(artifacts)
    }

    fn advance(&self, stage: Stage) {
        log::info!("[{}] {}", self.target.label(), stage);
    }
}
