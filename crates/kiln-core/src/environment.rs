//! Orchestrator-side build environment.
//!
//! Holds the resolved options and the accumulated configuration. Profiles
//! are applied to it through [`BuildEnvironment::configure`].

use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::host::HostFacts;
use crate::options::{BuildOptions, OptionValue};
use crate::profile::PlatformProfile;

/// Resolved options plus accumulated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEnvironment {
    pub options: BuildOptions,
    pub config: BuildConfig,
}

impl BuildEnvironment {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            config: BuildConfig::new(),
        }
    }

    /// Layer options for `profile`: built-in defaults, the profile's flag
    /// overrides, manifest values, then command-line assignments.
    pub fn resolve_options(
        profile: &dyn PlatformProfile,
        manifest: &BuildOptions,
        cli: &[(String, OptionValue)],
    ) -> BuildOptions {
        let mut opts = BuildOptions::defaults();
        opts.apply_overrides(&profile.flags());
        opts.merge(manifest);
        for (key, value) in cli {
            opts.set(key.clone(), value.clone());
        }
        opts
    }

    /// Run `profile` against the current options and fold its output in.
    ///
    /// Resolved option values are written back into `options`. Every
    /// sequence is appended, so applying a profile twice duplicates its
    /// entries.
    pub fn configure(&mut self, profile: &dyn PlatformProfile, host: &HostFacts) {
        let config = profile.configure(&self.options, host);
        self.options.apply_overrides(&config.option_overrides);
        tracing::info!(
            platform = profile.name(),
            ccflags = config.ccflags.len(),
            cppflags = config.cppflags.len(),
            libs = config.libs.len(),
            builders = config.builders.len(),
            "applied platform configuration"
        );
        self.config.merge(config);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::host::OsFamily;

    struct Fixed;

    impl PlatformProfile for Fixed {
        fn name(&self) -> &'static str {
            "Fixed"
        }
        fn is_active(&self, _host: &HostFacts) -> bool {
            true
        }
        fn can_build(&self, _host: &HostFacts) -> bool {
            true
        }
        fn flags(&self) -> BTreeMap<String, String> {
            BTreeMap::from([("builtin_zlib".to_string(), "no".to_string())])
        }
        fn configure(&self, _options: &BuildOptions, _host: &HostFacts) -> BuildConfig {
            let mut cfg = BuildConfig::new();
            cfg.append_libs(["m"]).override_option("bits", "64");
            cfg
        }
    }

    fn host() -> HostFacts {
        HostFacts::new(OsFamily::Posix, "linux", 64)
    }

    #[test]
    fn layering_order() {
        let manifest: BuildOptions = [("target", "release")].into_iter().collect();
        let cli = vec![("builtin_zlib".to_string(), OptionValue::from("yes"))];

        let opts = BuildEnvironment::resolve_options(&Fixed, &manifest, &[]);
        assert_eq!(opts.get_str("builtin_zlib"), Some("no"));
        assert_eq!(opts.get_str("target"), Some("release"));
        assert_eq!(opts.get_str("bits"), Some("default"));

        let opts = BuildEnvironment::resolve_options(&Fixed, &manifest, &cli);
        assert_eq!(opts.get_str("builtin_zlib"), Some("yes"));
    }

    #[test]
    fn configure_writes_back_overrides() {
        let mut env = BuildEnvironment::new(BuildOptions::defaults());
        env.configure(&Fixed, &host());
        assert_eq!(env.options.get_str("bits"), Some("64"));
        assert_eq!(env.config.libs, vec!["m"]);
    }

    #[test]
    fn configure_twice_duplicates() {
        let mut env = BuildEnvironment::new(BuildOptions::defaults());
        env.configure(&Fixed, &host());
        env.configure(&Fixed, &host());
        assert_eq!(env.config.libs, vec!["m", "m"]);
    }
}
