//! Declarative header-builder table.
//!
//! A builder associates a source suffix with a generated header suffix and
//! names the external generation action that produces it. kiln only records
//! the association; an orchestrator supplies a [`HeaderGenerator`] to do
//! the actual work.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KilnError, Result};

/// Shader header generation actions provided by the external generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderAction {
    /// Legacy desktop GL dialect.
    LegacyGl,
    /// Modern GLSL dialect.
    Glsl,
    /// OpenGL ES 2 dialect.
    Gles2,
}

impl HeaderAction {
    /// Name of the collaborator entry point.
    pub fn collaborator_name(self) -> &'static str {
        match self {
            HeaderAction::LegacyGl => "build_legacygl_headers",
            HeaderAction::Glsl => "build_glsl_headers",
            HeaderAction::Gles2 => "build_gles2_headers",
        }
    }
}

/// External header generator.
pub trait HeaderGenerator {
    /// Generate `output` from `source` using `action`.
    ///
    /// Returns a human-readable description on failure.
    fn generate(
        &self,
        action: HeaderAction,
        source: &Path,
        output: &Path,
    ) -> std::result::Result<(), String>;
}

/// One builder: input suffix, output suffix, and the action linking them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuilderEntry {
    pub action: HeaderAction,
    /// Suffix appended to produce the output (e.g., "glsl.h").
    pub suffix: String,
    /// Suffix of accepted sources (e.g., ".glsl").
    pub src_suffix: String,
}

impl BuilderEntry {
    pub fn new(action: HeaderAction, suffix: impl Into<String>, src_suffix: impl Into<String>) -> Self {
        Self {
            action,
            suffix: suffix.into(),
            src_suffix: src_suffix.into(),
        }
    }

    /// Whether `source` ends with this builder's source suffix.
    pub fn accepts(&self, source: &Path) -> bool {
        source
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.len() > self.src_suffix.len() && n.ends_with(&self.src_suffix))
    }

    /// Output path for `source`: the stem with the output suffix attached
    /// (`shaders/scene.glsl` becomes `shaders/scene.glsl.h`).
    pub fn output_for(&self, source: &Path) -> Option<PathBuf> {
        if !self.accepts(source) {
            return None;
        }
        let name = source.file_name()?.to_str()?;
        let stem = &name[..name.len() - self.src_suffix.len()];
        let suffix = self.suffix.trim_start_matches('.');
        Some(source.with_file_name(format!("{stem}.{suffix}")))
    }

    /// Delegate generation of `source` to `generator`, returning the output path.
    pub fn run(&self, name: &str, generator: &dyn HeaderGenerator, source: &Path) -> Result<PathBuf> {
        let output = self
            .output_for(source)
            .ok_or_else(|| KilnError::HeaderGeneration {
                builder: name.to_string(),
                detail: format!(
                    "source {} does not end with '{}'",
                    source.display(),
                    self.src_suffix
                ),
            })?;
        tracing::debug!(
            builder = name,
            action = self.action.collaborator_name(),
            source = %source.display(),
            output = %output.display(),
            "delegating header generation"
        );
        generator
            .generate(self.action, source, &output)
            .map_err(|detail| KilnError::HeaderGeneration {
                builder: name.to_string(),
                detail,
            })?;
        Ok(output)
    }
}

/// Builder name to entry, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuilderTable {
    entries: BTreeMap<String, BuilderEntry>,
}

impl BuilderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a builder. A builder with the same name is replaced.
    pub fn insert(&mut self, name: impl Into<String>, entry: BuilderEntry) {
        self.entries.insert(name.into(), entry);
    }

    pub fn get(&self, name: &str) -> Option<&BuilderEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BuilderEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert every entry of `other`, replacing same-named builders.
    pub fn extend(&mut self, other: BuilderTable) {
        self.entries.extend(other.entries);
    }
}
