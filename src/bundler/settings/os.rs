//! Operating system families and host-name normalization.

use std::fmt;

/// Operating system family a package is produced for.
///
/// Values coming from the host (`"Windows 11"`, `"Mac OS X"`, `"darwin"`)
/// and from configuration (`"macos"`, `"linux"`) are mapped onto this closed
/// set by [`OperatingSystem::normalize`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperatingSystem {
    /// Microsoft Windows
    Windows,
    /// Apple macOS
    MacOs,
    /// Linux, and the fallback for every name not matched below
    Linux,
}

/// Substring table consulted in order; the first hit wins.
///
/// Names matching no row are treated as [`OperatingSystem::Linux`].
const OS_NAME_TABLE: &[(&str, OperatingSystem)] = &[
    ("windows", OperatingSystem::Windows),
    ("macos", OperatingSystem::MacOs),
    ("darwin", OperatingSystem::MacOs),
    ("osx", OperatingSystem::MacOs),
];

impl OperatingSystem {
    /// Normalizes a free-form OS name.
    ///
    /// The name is lowercased and stripped of whitespace before matching,
    /// so `"Mac OS X"` becomes `"macosx"` and maps to macOS.
    pub fn normalize(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        OS_NAME_TABLE
            .iter()
            .find(|(needle, _)| key.contains(needle))
            .map(|(_, os)| *os)
            .unwrap_or(OperatingSystem::Linux)
    }

    /// Canonical lowercase name, also used as the per-OS resource directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "windows",
            OperatingSystem::MacOs => "macos",
            OperatingSystem::Linux => "linux",
        }
    }

    /// Separator used when joining the module path into one argument.
    pub fn path_list_separator(&self) -> char {
        match self {
            OperatingSystem::Windows => ';',
            _ => ':',
        }
    }

    /// File name of the jpackage executable on this OS.
    pub fn jpackage_executable(&self) -> &'static str {
        match self {
            OperatingSystem::Windows => "jpackage.exe",
            _ => "jpackage",
        }
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OperatingSystem {
    fn from(name: String) -> Self {
        Self::normalize(&name)
    }
}

impl From<&str> for OperatingSystem {
    fn from(name: &str) -> Self {
        Self::normalize(name)
    }
}

impl From<OperatingSystem> for String {
    fn from(os: OperatingSystem) -> Self {
        os.as_str().to_string()
    }
}
