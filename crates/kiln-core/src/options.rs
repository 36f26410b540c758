//! Build options: the externally supplied name/value mapping.
//!
//! Options are layered: built-in defaults, then platform flag overrides,
//! then manifest values, then command-line assignments. Each layer
//! overwrites only the keys it carries.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{KilnError, Result};

/// Recognised option keys.
pub mod keys {
    /// Target bit-width: "default", "32", or "64".
    pub const BITS: &str = "bits";
    /// Build target: "release", "release_debug", or "debug".
    pub const TARGET: &str = "target";
    /// Keep debug symbols in release builds ("yes"/"no").
    pub const DEBUG_RELEASE: &str = "debug_release";
    /// Use the vendored zlib instead of the system one ("yes"/"no").
    pub const BUILTIN_ZLIB: &str = "builtin_zlib";

    /// Every key a profile may read.
    pub const KNOWN: [&str; 4] = [BITS, TARGET, DEBUG_RELEASE, BUILTIN_ZLIB];
}

/// A single option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    /// The string form, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            OptionValue::Bool(_) => None,
        }
    }

    /// Whether the value means "enabled" (`true` or the string "yes").
    pub fn is_yes(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Str(s) => s == "yes",
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Str(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Str(s)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

/// Requested bit-width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bits {
    /// Let the platform pick from the host pointer width.
    Default,
    /// An explicit request ("32", "64", or anything else the user wrote).
    Explicit(String),
}

/// Requested build target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Release,
    ReleaseDebug,
    Debug,
    /// Unrecognised target; profiles add no target-specific flags.
    Other(String),
}

impl Target {
    /// Classify a target name.
    pub fn parse(s: &str) -> Self {
        match s {
            "release" => Target::Release,
            "release_debug" => Target::ReleaseDebug,
            "debug" => Target::Debug,
            other => Target::Other(other.to_string()),
        }
    }
}

/// The option mapping handed to platform profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildOptions {
    values: BTreeMap<String, OptionValue>,
}

impl BuildOptions {
    /// An empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in defaults every build starts from.
    pub fn defaults() -> Self {
        let mut opts = Self::new();
        opts.set(keys::BITS, "default");
        opts.set(keys::TARGET, "debug");
        opts.set(keys::DEBUG_RELEASE, "no");
        opts.set(keys::BUILTIN_ZLIB, "yes");
        opts
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// String value of `key`; bools render as "yes"/"no".
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key)? {
            OptionValue::Str(s) => Some(s),
            OptionValue::Bool(true) => Some("yes"),
            OptionValue::Bool(false) => Some("no"),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &BuildOptions) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Overlay string-valued overrides, as produced by platform flags or
    /// resolved configuration.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (key, value) in overrides {
            self.values
                .insert(key.clone(), OptionValue::Str(value.clone()));
        }
    }

    /// Requested bit-width. A missing key counts as "default".
    pub fn bits(&self) -> Bits {
        match self.get_str(keys::BITS) {
            None | Some("default") => Bits::Default,
            Some(other) => Bits::Explicit(other.to_string()),
        }
    }

    /// Requested build target.
    pub fn target(&self) -> Target {
        Target::parse(self.get_str(keys::TARGET).unwrap_or_default())
    }

    /// Whether release builds keep debug symbols.
    pub fn debug_release(&self) -> bool {
        self.get(keys::DEBUG_RELEASE)
            .is_some_and(OptionValue::is_yes)
    }

    /// Keys present here that no profile reads.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|k| !keys::KNOWN.contains(k))
            .collect()
    }

    /// Parse a `key=value` command-line assignment.
    ///
    /// `true`/`false` become bools; everything else stays a string.
    pub fn parse_assignment(input: &str) -> Result<(String, OptionValue)> {
        let (key, value) = input
            .split_once('=')
            .ok_or_else(|| KilnError::InvalidAssignment {
                input: input.to_string(),
            })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(KilnError::InvalidAssignment {
                input: input.to_string(),
            });
        }
        let value = match value.trim() {
            "true" => OptionValue::Bool(true),
            "false" => OptionValue::Bool(false),
            other => OptionValue::Str(other.to_string()),
        };
        Ok((key.to_string(), value))
    }

    /// Parse options from a TOML table of `key = value` pairs.
    pub fn parse_toml(toml_str: &str) -> Result<Self> {
        let opts: BuildOptions = toml::from_str(toml_str)?;
        Ok(opts)
    }

    /// Load options from a TOML file.
    pub fn load_toml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KilnError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Serialize options to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for BuildOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = Self::new();
        for (k, v) in iter {
            opts.set(k, v);
        }
        opts
    }
}
