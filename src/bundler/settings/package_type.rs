//! Installer formats understood by jpackage.

use super::OperatingSystem;
use crate::bundler::error::Error;
use std::fmt;
use std::str::FromStr;

/// Output format passed to `jpackage --type`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PackageType {
    /// Self-contained runtime + application directory
    AppImage,
    /// Windows executable installer
    Exe,
    /// Windows Installer package
    Msi,
    /// macOS installer package
    Pkg,
    /// macOS disk image
    Dmg,
    /// RPM package (Fedora, RHEL)
    Rpm,
    /// Debian package (Debian, Ubuntu)
    Deb,
}

impl PackageType {
    /// Every known package type.
    pub const ALL: [PackageType; 7] = [
        PackageType::AppImage,
        PackageType::Exe,
        PackageType::Msi,
        PackageType::Pkg,
        PackageType::Dmg,
        PackageType::Rpm,
        PackageType::Deb,
    ];

    /// Identifier as jpackage expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::AppImage => "app-image",
            PackageType::Exe => "exe",
            PackageType::Msi => "msi",
            PackageType::Pkg => "pkg",
            PackageType::Dmg => "dmg",
            PackageType::Rpm => "rpm",
            PackageType::Deb => "deb",
        }
    }

    /// Installer formats built when a target does not list any.
    ///
    /// - **Windows**: exe, msi
    /// - **macOS**: pkg, dmg
    /// - **Linux**: rpm, deb
    pub fn defaults_for(os: OperatingSystem) -> Vec<PackageType> {
        match os {
            OperatingSystem::Windows => vec![PackageType::Exe, PackageType::Msi],
            OperatingSystem::MacOs => vec![PackageType::Pkg, PackageType::Dmg],
            OperatingSystem::Linux => vec![PackageType::Rpm, PackageType::Deb],
        }
    }

    /// Whether this is the intermediate image rather than an installer.
    pub fn is_app_image(&self) -> bool {
        matches!(self, PackageType::AppImage)
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PackageType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| {
                Error::InvalidTarget(format!(
                    "Unknown package type '{}'. Valid types: {}",
                    s,
                    PackageType::ALL
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl TryFrom<String> for PackageType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PackageType> for String {
    fn from(t: PackageType) -> Self {
        t.as_str().to_string()
    }
}
