//! CPU architecture types and utilities.

use std::fmt;

/// CPU architecture of the produced package.
///
/// jpackage always bundles the runtime of the JDK it runs from, so this has
/// to match the host architecture. Free-form names (`"amd64"`, `"aarch64"`,
/// `"x86-64"`) are mapped onto this set by [`Arch::normalize`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_jpackage::bundler::Arch;
///
/// assert_eq!(Arch::normalize("amd64"), Arch::X86_64);
/// assert_eq!(Arch::normalize("aarch64"), Arch::Arm64);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Arch {
    /// x86 / i686 (32-bit), the fallback for unmatched names
    X86,
    /// x86_64 / AMD64 (64-bit)
    X86_64,
    /// AArch64 / ARM64 (64-bit) - Apple Silicon, modern ARM devices
    Arm64,
}

/// Substring table consulted in order; the first hit wins.
///
/// `arm64` is listed before the generic `64` row, otherwise it would be read
/// as x86_64.
const ARCH_NAME_TABLE: &[(&str, Arch)] = &[
    ("aarch", Arch::Arm64),
    ("arm64", Arch::Arm64),
    ("64", Arch::X86_64),
];

impl Arch {
    /// Normalizes a free-form architecture name (case-insensitive).
    pub fn normalize(name: &str) -> Self {
        let key = name.trim().to_lowercase();

        ARCH_NAME_TABLE
            .iter()
            .find(|(needle, _)| key.contains(needle))
            .map(|(_, arch)| *arch)
            .unwrap_or(Arch::X86)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Arch {
    fn from(name: String) -> Self {
        Self::normalize(&name)
    }
}

impl From<&str> for Arch {
    fn from(name: &str) -> Self {
        Self::normalize(name)
    }
}

impl From<Arch> for String {
    fn from(arch: Arch) -> Self {
        arch.as_str().to_string()
    }
}
