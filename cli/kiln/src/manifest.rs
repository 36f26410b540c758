//! `kiln.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kiln_core::BuildOptions;
use serde::{Deserialize, Serialize};

/// Manifest file name searched for from the working directory upward.
pub const MANIFEST_FILE: &str = "kiln.toml";

/// The top-level manifest structure for a kiln project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KilnManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Build defaults.
    #[serde(default)]
    pub build: Option<BuildSection>,
    /// Build option values layered over the platform defaults.
    #[serde(default)]
    pub options: BuildOptions,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required).
    pub name: String,
    /// Project version.
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Build section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSection {
    /// Platform used when `--platform` is not given.
    #[serde(default)]
    pub platform: Option<String>,
}

impl KilnManifest {
    /// Search upward from `start_dir` for a `kiln.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: KilnManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                tracing::debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing kiln.toml")
    }

    /// Default platform name from the manifest.
    pub fn default_platform(&self) -> Option<&str> {
        self.build.as_ref().and_then(|b| b.platform.as_deref())
    }

    /// Generate the default template for `kiln init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
version = "0.1.0"

[build]
platform = "haiku"

[options]
bits = "default"
target = "debug"
"#
        )
    }
}
