//! The platform profile contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::host::HostFacts;
use crate::options::BuildOptions;

/// A platform-specific user-facing build option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub key: String,
    pub help: String,
    pub default: String,
}

/// What one platform contributes to the build orchestrator.
///
/// Every method except [`configure`](PlatformProfile::configure) is a
/// constant or a pure predicate on the host. `configure` returns a fresh
/// [`BuildConfig`] and never touches the caller's environment.
pub trait PlatformProfile {
    /// Human-readable platform identifier.
    fn name(&self) -> &'static str;

    /// Whether the platform applies to `host` at all.
    fn is_active(&self, host: &HostFacts) -> bool;

    /// Whether a binary for this platform can be built on `host`.
    ///
    /// `false` means "skip this platform", not a failure.
    fn can_build(&self, host: &HostFacts) -> bool;

    /// Platform-specific user options.
    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    /// Overrides of global option defaults.
    fn flags(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Compute the toolchain configuration for `options` on `host`.
    fn configure(&self, options: &BuildOptions, host: &HostFacts) -> BuildConfig;
}
