//! Facts about the machine running the build.

use serde::{Deserialize, Serialize};

/// Coarse operating system family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OsFamily {
    /// POSIX-compliant hosts (Linux, BSDs, macOS, Haiku, ...).
    Posix,
    Windows,
    Other(String),
}

impl OsFamily {
    /// Map a Rust `std::env::consts::FAMILY` value.
    pub fn from_family(family: &str) -> Self {
        match family {
            "unix" => OsFamily::Posix,
            "windows" => OsFamily::Windows,
            other => OsFamily::Other(other.to_string()),
        }
    }
}

/// Host operating system and architecture facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HostFacts {
    /// OS family.
    pub os_family: OsFamily,
    /// Specific OS (e.g., "linux", "macos", "haiku").
    pub platform: String,
    /// Native pointer width in bits.
    pub pointer_width: u32,
}

impl HostFacts {
    pub fn new(os_family: OsFamily, platform: impl Into<String>, pointer_width: u32) -> Self {
        Self {
            os_family,
            platform: platform.into(),
            pointer_width,
        }
    }

    /// Facts for the host this binary runs on.
    pub fn detect() -> Self {
        let pointer_width = if cfg!(target_pointer_width = "64") {
            64
        } else if cfg!(target_pointer_width = "16") {
            16
        } else {
            32
        };
        Self::new(
            OsFamily::from_family(std::env::consts::FAMILY),
            std::env::consts::OS,
            pointer_width,
        )
    }

    pub fn is_posix(&self) -> bool {
        self.os_family == OsFamily::Posix
    }

    pub fn is_64bit(&self) -> bool {
        self.pointer_width >= 64
    }

    /// Whether this is the macOS desktop (also spelled "darwin").
    pub fn is_macos(&self) -> bool {
        matches!(self.platform.as_str(), "macos" | "darwin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_mapping() {
        assert_eq!(OsFamily::from_family("unix"), OsFamily::Posix);
        assert_eq!(OsFamily::from_family("windows"), OsFamily::Windows);
        assert_eq!(
            OsFamily::from_family("wasm"),
            OsFamily::Other("wasm".into())
        );
    }

    #[test]
    fn detect_matches_build_target() {
        let host = HostFacts::detect();
        assert_eq!(host.platform, std::env::consts::OS);
        assert_eq!(host.is_posix(), cfg!(unix));
        assert_eq!(host.is_64bit(), cfg!(target_pointer_width = "64"));
    }

    #[test]
    fn macos_spellings() {
        assert!(HostFacts::new(OsFamily::Posix, "macos", 64).is_macos());
        assert!(HostFacts::new(OsFamily::Posix, "darwin", 64).is_macos());
        assert!(!HostFacts::new(OsFamily::Posix, "linux", 64).is_macos());
    }
}
