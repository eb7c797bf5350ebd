//! Shared fixtures for packaging tests.
//!
//! [`FakeJpackage`] records every invocation and mimics what jpackage leaves
//! on disk: an image directory for `--type app-image`, one installer file
//! for every other type.

#![allow(dead_code)]

use kodegen_bundler_jpackage::bundler::{
    Arch, Bundler, HostSystem, OperatingSystem, PackageType, PackagingRequest, Result, Target,
    ToolInvocation, ToolOutput, ToolRunner,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const APP_NAME: &str = "Demo";
pub const VERSION: &str = "1.4.2";

/// Recording stand-in for jpackage.
#[derive(Default)]
pub struct FakeJpackage {
    os: Option<OperatingSystem>,
    invocations: Mutex<Vec<ToolInvocation>>,
    failures: BTreeMap<String, String>,
    silent: Vec<String>,
    payload_root: Option<PathBuf>,
}

impl FakeJpackage {
    pub fn new(os: OperatingSystem) -> Self {
        Self {
            os: Some(os),
            ..Default::default()
        }
    }

    /// Exit 1 with `stderr` when asked for `package_type`.
    pub fn failing_on(mut self, package_type: &str, stderr: &str) -> Self {
        self.failures
            .insert(package_type.to_string(), stderr.to_string());
        self
    }

    /// Succeed without writing anything for `package_type`.
    pub fn silent_on(mut self, package_type: &str) -> Self {
        self.silent.push(package_type.to_string());
        self
    }

    /// Copy `--app-content` entries to `<root>/<type>/` so tests can inspect them.
    pub fn capturing_payload(mut self, root: &Path) -> Self {
        self.payload_root = Some(root.to_path_buf());
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn types(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .filter_map(|i| i.arg_value("--type").map(str::to_string))
            .collect()
    }

    fn simulate(&self, inv: &ToolInvocation) -> ToolOutput {
        let package_type = inv.arg_value("--type").unwrap_or_default().to_string();
        let dest = PathBuf::from(inv.arg_value("--dest").expect("--dest is always passed"));

        if let Some(stderr) = self.failures.get(&package_type) {
            return ToolOutput::failure(1, stderr.clone());
        }
        if self.silent.contains(&package_type) {
            return ToolOutput::success("");
        }

        let os = self.os.unwrap_or(OperatingSystem::Linux);
        if package_type == "app-image" {
            let name = inv.arg_value("--name").expect("--name for app-image");
            let image = match os {
                OperatingSystem::MacOs => dest.join(format!("{name}.app")),
                _ => dest.join(name),
            };
            let runtime_dir = match os {
                OperatingSystem::MacOs => image.join("Contents/runtime"),
                OperatingSystem::Windows => image.join("runtime"),
                OperatingSystem::Linux => image.join("lib/runtime"),
            };
            std::fs::create_dir_all(runtime_dir).unwrap();
            return ToolOutput::success(format!(
                "Creating app package: {name} in {}\n",
                dest.display()
            ));
        }

        let name = match inv.arg_value("--name") {
            Some(name) => name.to_string(),
            None => {
                let image = Path::new(inv.arg_value("--app-image").expect("--app-image or --name"));
                image.file_stem().unwrap().to_string_lossy().into_owned()
            }
        };
        let version = inv.arg_value("--app-version").unwrap_or("1.0");
        let installer = dest.join(format!("{name}-{version}.{package_type}"));
        std::fs::create_dir_all(&dest).unwrap();
        let contents = format!("{package_type} installer for {name} {version}\n");
        std::fs::write(&installer, contents).unwrap();

        if let Some(root) = &self.payload_root {
            let payload = root.join(&package_type);
            for content in inv.arg_values("--app-content") {
                let content = Path::new(content);
                copy_tree(content, &payload.join(content.file_name().unwrap()));
            }
        }

        ToolOutput::success(format!("Succeeded in building {package_type} package\n"))
    }
}

impl ToolRunner for FakeJpackage {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutput> {
        self.invocations.lock().unwrap().push(invocation.clone());
        Ok(self.simulate(invocation))
    }
}

/// Copies a file or a directory tree.
pub fn copy_tree(from: &Path, to: &Path) {
    if from.is_file() {
        std::fs::create_dir_all(to.parent().unwrap()).unwrap();
        std::fs::copy(from, to).unwrap();
        return;
    }
    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.unwrap();
        let dest = to.join(entry.path().strip_prefix(from).unwrap());
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).unwrap();
        } else {
            std::fs::copy(entry.path(), &dest).unwrap();
        }
    }
}

/// Relative path -> content of every file below `root`.
pub fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            (
                e.path().strip_prefix(root).unwrap().to_path_buf(),
                std::fs::read(e.path()).unwrap(),
            )
        })
        .collect()
}

/// Project layout with a module jar, resources and per-OS templates.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        std::fs::create_dir_all(root.join("libs")).unwrap();
        std::fs::write(root.join("libs/demo.jar"), b"PK demo").unwrap();

        std::fs::create_dir_all(root.join("res/conf")).unwrap();
        std::fs::write(root.join("res/config.properties"), b"greeting=hello\n").unwrap();
        std::fs::write(root.join("res/conf/logging.xml"), b"<configuration/>\n").unwrap();

        std::fs::write(root.join("README.txt"), b"read me\n").unwrap();

        for os in ["linux", "macos", "windows"] {
            let templates = root.join("packaging").join(os);
            std::fs::create_dir_all(&templates).unwrap();
            std::fs::write(templates.join("postinst"), b"#!/bin/sh\n").unwrap();
        }
        std::fs::write(root.join("packaging/linux/icon.png"), b"png").unwrap();
        std::fs::write(root.join("packaging/macos/icon.icns"), b"icns").unwrap();
        std::fs::write(root.join("packaging/windows/icon.ico"), b"ico").unwrap();

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn destination(&self, label: &str) -> PathBuf {
        self.root().join("build/packages").join(label)
    }

    pub fn temp(&self, label: &str) -> PathBuf {
        self.root().join("build/tmp/jpackage").join(label)
    }

    pub fn request(&self, label: &str, os: OperatingSystem) -> PackagingRequest {
        PackagingRequest::builder()
            .application_name(APP_NAME)
            .main_module("org.example.demo")
            .version(VERSION)
            .application_description("Demo application")
            .module_path(vec![self.root().join("libs/demo.jar")])
            .java_options(vec!["-Xmx256m".into()])
            .jlink_options(vec!["--strip-debug".into()])
            .add_modules(vec!["jdk.crypto.ec".into()])
            .jpackage_resource_dir(self.root().join("packaging").join(os.as_str()))
            .resources(vec![self.root().join("res")])
            .destination(self.destination(label))
            .temp_directory(self.temp(label))
            .build()
            .unwrap()
    }

    pub fn target(
        &self,
        label: &str,
        os: OperatingSystem,
        types: Vec<PackageType>,
        single_step: bool,
    ) -> Target {
        Target::builder(label, os, Arch::X86_64)
            .package_types(types)
            .options(vec!["--about-url".into(), "https://example.org".into()])
            .app_image_options(vec!["--icon".into(), "custom.png".into()])
            .target_resource(self.root().join("README.txt"))
            .single_step_packaging(single_step)
            .build()
            .unwrap()
    }
}

/// Host reporting names for `os` on x86_64.
pub fn host_for(os: OperatingSystem) -> HostSystem {
    match os {
        OperatingSystem::Windows => HostSystem::new("Windows 11", "amd64"),
        OperatingSystem::MacOs => HostSystem::new("Mac OS X", "x86_64"),
        OperatingSystem::Linux => HostSystem::new("Linux", "x86_64"),
    }
}

/// Bundler wired to `fake` and a matching host.
pub fn bundler<'a>(
    request: PackagingRequest,
    target: Target,
    fake: &'a FakeJpackage,
) -> Bundler<&'a FakeJpackage> {
    let os = target.operating_system();
    Bundler::new(request, target)
        .with_runner(fake)
        .with_host(host_for(os))
        .with_jpackage("/opt/jdk/bin/jpackage")
}
