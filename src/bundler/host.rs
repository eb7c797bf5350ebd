//! Host identification and validation.
//!
//! jpackage bundles the runtime of the JDK it runs from, so an installer can
//! only be produced for the OS and architecture of the running host. The
//! check happens before any external process is started.

use crate::bundler::{
    error::{Error, Result},
    settings::{Arch, OperatingSystem, Target},
};

/// OS and architecture names as reported by a host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HostSystem {
    os_name: String,
    arch_name: String,
}

impl HostSystem {
    /// The system this process runs on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// A host with explicitly reported names, e.g. `("Windows 11", "amd64")`.
    pub fn new(os_name: impl Into<String>, arch_name: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            arch_name: arch_name.into(),
        }
    }

    /// Reported OS name, unnormalized.
    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// Reported architecture name, unnormalized.
    pub fn arch_name(&self) -> &str {
        &self.arch_name
    }

    pub fn operating_system(&self) -> OperatingSystem {
        OperatingSystem::normalize(&self.os_name)
    }

    pub fn architecture(&self) -> Arch {
        Arch::normalize(&self.arch_name)
    }

    /// Fails with [`Error::HostMismatch`] unless both normalized values match.
    ///
    /// The OS is checked first, so a run requesting a different OS and
    /// architecture reports the OS.
    pub fn validate(&self, arch: Arch, os: OperatingSystem) -> Result<()> {
        if self.operating_system() != os {
            return Err(Error::HostMismatch {
                host: self.os_name.clone(),
                requested: os.to_string(),
            });
        }
        if self.architecture() != arch {
            return Err(Error::HostMismatch {
                host: self.arch_name.clone(),
                requested: arch.to_string(),
            });
        }
        log::debug!(
            "Host {} / {} matches requested {} / {}",
            self.os_name,
            self.arch_name,
            os,
            arch
        );
        Ok(())
    }

    /// Validates free-form requested names after normalizing them.
    pub fn validate_names(&self, arch: &str, os: &str) -> Result<()> {
        self.validate(Arch::normalize(arch), OperatingSystem::normalize(os))
    }

    /// Whether `target` can be built on this host.
    pub fn is_host_target(&self, target: &Target) -> bool {
        self.operating_system() == target.operating_system()
            && self.architecture() == target.architecture()
    }
}

impl Default for HostSystem {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_amd64_host() {
        let host = HostSystem::new("Windows 11", "amd64");
        assert!(host.validate(Arch::X86_64, OperatingSystem::Windows).is_ok());
        assert!(host.validate(Arch::Arm64, OperatingSystem::Windows).is_err());
        assert!(host.validate(Arch::X86_64, OperatingSystem::MacOs).is_err());
    }

    #[test]
    fn mismatch_names_host_and_requested() {
        let host = HostSystem::new("Mac OS X", "aarch64");
        let err = host
            .validate(Arch::Arm64, OperatingSystem::Linux)
            .unwrap_err();
        assert_eq!(err.to_string(), "Running on Mac OS X; cannot build for linux");

        let err = host
            .validate(Arch::X86_64, OperatingSystem::MacOs)
            .unwrap_err();
        assert_eq!(err.to_string(), "Running on aarch64; cannot build for x86_64");
    }

    #[test]
    fn validate_names_normalizes_requested_values() {
        let host = HostSystem::new("Linux", "x86_64");
        assert!(host.validate_names("x86-64", "linux").is_ok());
        assert!(host.validate_names("amd64", " Linux ").is_ok());
        assert!(host.validate_names("aarch64", "linux").is_err());
        assert!(host.validate_names("x86_64", "darwin").is_err());
    }

    #[test]
    fn validation_succeeds_iff_normalized_values_match() {
        let hosts = [
            ("Windows 11", "amd64"),
            ("Mac OS X", "aarch64"),
            ("Linux", "x86_64"),
            ("Linux", "i386"),
        ];
        let oses = [OperatingSystem::Windows, OperatingSystem::MacOs, OperatingSystem::Linux];
        let arches = [Arch::X86, Arch::X86_64, Arch::Arm64];

        for (os_name, arch_name) in hosts {
            let host = HostSystem::new(os_name, arch_name);
            for os in oses {
                for arch in arches {
                    let expected = host.operating_system() == os && host.architecture() == arch;
                    assert_eq!(
                        host.validate(arch, os).is_ok(),
                        expected,
                        "{os_name}/{arch_name} vs {os}/{arch}"
                    );
                }
            }
        }
    }

    #[test]
    fn current_host_accepts_host_target() {
        let host = HostSystem::current();
        let target = Target::host();
        assert!(host.is_host_target(&target));
        assert!(host.validate(target.architecture(), target.operating_system()).is_ok());
    }
}
