//! Compiler/linker configuration produced by a platform profile.
//!
//! A [`BuildConfig`] is a plain value. Profiles build one and return it;
//! the orchestrator folds it into its environment with [`BuildConfig::merge`],
//! which only ever appends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builders::{BuilderEntry, BuilderTable};
use crate::error::Result;

/// Toolchain, flag, and builder settings for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    /// C compiler executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    /// C++ compiler / linker front end executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cxx: Option<String>,
    /// Compiler flags.
    #[serde(default)]
    pub ccflags: Vec<String>,
    /// Preprocessor flags.
    #[serde(default)]
    pub cppflags: Vec<String>,
    /// Include search paths.
    #[serde(default)]
    pub cpppath: Vec<String>,
    /// Link libraries.
    #[serde(default)]
    pub libs: Vec<String>,
    /// Header builders.
    #[serde(default)]
    pub builders: BuilderTable,
    /// Build option values resolved while configuring.
    #[serde(default)]
    pub option_overrides: BTreeMap<String, String>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cc(&mut self, cc: impl Into<String>) -> &mut Self {
        self.cc = Some(cc.into());
        self
    }

    pub fn set_cxx(&mut self, cxx: impl Into<String>) -> &mut Self {
        self.cxx = Some(cxx.into());
        self
    }

    pub fn append_ccflags<I, S>(&mut self, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ccflags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn append_cppflags<I, S>(&mut self, flags: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cppflags.extend(flags.into_iter().map(Into::into));
        self
    }

    pub fn append_cpppath<I, S>(&mut self, paths: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cpppath.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn append_libs<I, S>(&mut self, libs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs.extend(libs.into_iter().map(Into::into));
        self
    }

    pub fn add_builder(&mut self, name: impl Into<String>, entry: BuilderEntry) -> &mut Self {
        self.builders.insert(name, entry);
        self
    }

    pub fn override_option(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.option_overrides.insert(key.into(), value.into());
        self
    }

    /// Fold `other` into `self`.
    ///
    /// Sequences are appended in order with no deduplication. `cc`/`cxx` are
    /// replaced when `other` sets them. Builders and option overrides with
    /// the same key are replaced.
    pub fn merge(&mut self, other: BuildConfig) {
        if other.cc.is_some() {
            self.cc = other.cc;
        }
        if other.cxx.is_some() {
            self.cxx = other.cxx;
        }
        self.ccflags.extend(other.ccflags);
        self.cppflags.extend(other.cppflags);
        self.cpppath.extend(other.cpppath);
        self.libs.extend(other.libs);
        self.builders.extend(other.builders);
        self.option_overrides.extend(other.option_overrides);
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pretty TOML rendering.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Flags as they would appear on a compile line: ccflags, cppflags,
    /// then `-I` per include path.
    pub fn compile_args(&self) -> Vec<String> {
        self.ccflags
            .iter()
            .chain(&self.cppflags)
            .cloned()
            .chain(self.cpppath.iter().map(|p| format!("-I{p}")))
            .collect()
    }

    /// Libraries as `-l` link arguments.
    pub fn link_args(&self) -> Vec<String> {
        self.libs.iter().map(|l| format!("-l{l}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::HeaderAction;

    fn sample() -> BuildConfig {
        let mut cfg = BuildConfig::new();
        cfg.set_cc("gcc")
            .append_ccflags(["-O2"])
            .append_cppflags(["-DX"])
            .append_cpppath(["include"])
            .append_libs(["m"])
            .add_builder(
                "GLSL",
                BuilderEntry::new(HeaderAction::Glsl, "glsl.h", ".glsl"),
            );
        cfg
    }

    #[test]
    fn merge_appends_and_preserves_order() {
        let mut base = BuildConfig::new();
        base.append_ccflags(["-pipe"]).append_libs(["pthread"]);
        base.merge(sample());
        assert_eq!(base.ccflags, vec!["-pipe", "-O2"]);
        assert_eq!(base.libs, vec!["pthread", "m"]);
        assert_eq!(base.cc.as_deref(), Some("gcc"));
        assert!(base.cxx.is_none());
        assert_eq!(base.builders.len(), 1);
    }

    #[test]
    fn merge_keeps_toolchain_when_unset() {
        let mut base = sample();
        base.merge(BuildConfig::new());
        assert_eq!(base.cc.as_deref(), Some("gcc"));
    }

    #[test]
    fn merge_overrides_toolchain() {
        let mut base = sample();
        let mut other = BuildConfig::new();
        other.set_cc("clang");
        base.merge(other);
        assert_eq!(base.cc.as_deref(), Some("clang"));
    }

    #[test]
    fn merge_twice_duplicates_sequences() {
        let mut base = BuildConfig::new();
        base.merge(sample());
        base.merge(sample());
        assert_eq!(base.ccflags, vec!["-O2", "-O2"]);
        assert_eq!(base.cpppath.len(), 2);
        assert_eq!(base.builders.len(), 1);
    }

    #[test]
    fn command_line_rendering() {
        let cfg = sample();
        assert_eq!(cfg.compile_args(), vec!["-O2", "-DX", "-Iinclude"]);
        assert_eq!(cfg.link_args(), vec!["-lm"]);
    }

    #[test]
    fn renders_json_and_toml() {
        let cfg = sample();
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"src-suffix\": \".glsl\""));
        let toml_text = cfg.to_toml().unwrap();
        let back: BuildConfig = toml::from_str(&toml_text).unwrap();
        assert_eq!(back, cfg);
    }
}
