//! `kiln configure` — resolve options and apply a platform profile.

use anyhow::{bail, Context, Result};
use kiln_core::{BuildEnvironment, BuildOptions, HostFacts, ProfileRegistry};

use crate::manifest::KilnManifest;

/// Inputs gathered from the command line.
pub struct ConfigureRequest<'a> {
    /// Platform name; falls back to the manifest's `[build] platform`.
    pub platform: Option<&'a str>,
    /// `key=value` option assignments.
    pub sets: &'a [String],
    /// Configure even when the host cannot build the platform.
    pub force: bool,
}

/// Resolve options for the requested platform and apply its profile.
pub fn resolve(
    registry: &ProfileRegistry,
    manifest: Option<&KilnManifest>,
    host: &HostFacts,
    request: &ConfigureRequest<'_>,
) -> Result<(&'static str, BuildEnvironment)> {
    let name = match request.platform.or_else(|| manifest.and_then(|m| m.default_platform())) {
        Some(name) => name,
        None => bail!("no platform given (use --platform or set [build] platform in kiln.toml)"),
    };
    let profile = registry.get(name)?;

    if !profile.can_build(host) {
        if request.force {
            tracing::warn!(
                platform = profile.name(),
                host = %host.platform,
                "host cannot build this platform, continuing because of --force"
            );
        } else {
            bail!(
                "platform '{}' cannot be built on this host ({}); use --force to configure anyway",
                profile.name(),
                host.platform
            );
        }
    }

    let cli = request
        .sets
        .iter()
        .map(|s| BuildOptions::parse_assignment(s))
        .collect::<kiln_core::Result<Vec<_>>>()
        .context("parsing --set")?;

    let empty = BuildOptions::new();
    let manifest_options = manifest.map(|m| &m.options).unwrap_or(&empty);
    let options = BuildEnvironment::resolve_options(profile, manifest_options, &cli);
    for key in options.unknown_keys() {
        tracing::debug!(key, "option not read by any profile");
    }

    let mut env = BuildEnvironment::new(options);
    env.configure(profile, host);
    Ok((profile.name(), env))
}

/// Render a configured environment.
pub fn render(platform: &str, env: &BuildEnvironment, format: Option<&str>) -> Result<String> {
    match format {
        None | Some("human") => Ok(render_human(platform, env)),
        Some("json") => Ok(serde_json::to_string_pretty(env)?),
        Some("toml") => Ok(toml::to_string_pretty(env)?),
        Some(other) => bail!("unknown format '{other}' (expected human, json, or toml)"),
    }
}

fn render_human(platform: &str, env: &BuildEnvironment) -> String {
    let cfg = &env.config;
    let mut out = String::new();
    out.push_str(&format!("=== Configuration: {platform} ===\n\n"));

    out.push_str("--- Options ---\n");
    for (key, value) in env.options.iter() {
        out.push_str(&format!("  {key} = {value}\n"));
    }

    out.push_str("\n--- Toolchain ---\n");
    out.push_str(&format!("  CC:  {}\n", cfg.cc.as_deref().unwrap_or("(unset)")));
    out.push_str(&format!("  CXX: {}\n", cfg.cxx.as_deref().unwrap_or("(unset)")));

    out.push_str("\n--- Flags ---\n");
    out.push_str(&format!("  CCFLAGS:  {}\n", cfg.ccflags.join(" ")));
    out.push_str(&format!("  CPPFLAGS: {}\n", cfg.cppflags.join(" ")));
    out.push_str(&format!("  CPPPATH:  {}\n", cfg.cpppath.join(" ")));
    out.push_str(&format!("  LIBS:     {}\n", cfg.link_args().join(" ")));

    out.push_str("\n--- Builders ---\n");
    for (name, entry) in cfg.builders.iter() {
        out.push_str(&format!(
            "  {name:<12} *{} -> *.{} via {}\n",
            entry.src_suffix,
            entry.suffix.trim_start_matches('.'),
            entry.action.collaborator_name()
        ));
    }
    out
}

/// `kiln configure` entry point.
pub fn run(
    registry: &ProfileRegistry,
    manifest: Option<&KilnManifest>,
    host: &HostFacts,
    request: &ConfigureRequest<'_>,
    format: Option<&str>,
) -> Result<()> {
    let (platform, env) = resolve(registry, manifest, host, request)?;
    println!("{}", render(platform, &env, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use kiln_core::OsFamily;

    use super::*;

    fn linux64() -> HostFacts {
        HostFacts::new(OsFamily::Posix, "linux", 64)
    }

    fn request<'a>(platform: Option<&'a str>, sets: &'a [String], force: bool) -> ConfigureRequest<'a> {
        ConfigureRequest {
            platform,
            sets,
            force,
        }
    }

    #[test]
    fn configure_haiku_defaults() {
        let registry = kiln_platforms::builtin_registry();
        let (name, env) = resolve(&registry, None, &linux64(), &request(Some("haiku"), &[], false)).unwrap();
        assert_eq!(name, "Haiku");
        assert_eq!(env.options.get_str("bits"), Some("64"));
        assert_eq!(env.options.get_str("builtin_zlib"), Some("no"));
        assert!(env.config.ccflags.contains(&"-DDEBUG_MEMORY_ENABLED".to_string()));
    }

    #[test]
    fn manifest_and_cli_layers() {
        let registry = kiln_platforms::builtin_registry();
        let manifest: KilnManifest = toml::from_str(
            r#"
[project]
name = "engine"

[build]
platform = "haiku"

[options]
target = "release"
bits = "64"
"#,
        )
        .unwrap();
        let sets = vec!["bits=32".to_string()];
        let (_, env) = resolve(&registry, Some(&manifest), &linux64(), &request(None, &sets, false)).unwrap();
        assert_eq!(env.options.get_str("bits"), Some("32"));
        assert_eq!(env.config.ccflags, vec!["-O2", "-ffast-math", "-fomit-frame-pointer"]);
    }

    #[test]
    fn refuses_unbuildable_host_without_force() {
        let registry = kiln_platforms::builtin_registry();
        let mac = HostFacts::new(OsFamily::Posix, "macos", 64);
        assert!(resolve(&registry, None, &mac, &request(Some("haiku"), &[], false)).is_err());
        assert!(resolve(&registry, None, &mac, &request(Some("haiku"), &[], true)).is_ok());
    }

    #[test]
    fn errors_on_missing_platform_and_bad_sets() {
        let registry = kiln_platforms::builtin_registry();
        assert!(resolve(&registry, None, &linux64(), &request(None, &[], false)).is_err());

        let sets = vec!["nonsense".to_string()];
        let err = resolve(&registry, None, &linux64(), &request(Some("haiku"), &sets, false)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid option assignment"));
    }

    #[test]
    fn renders_every_format() {
        let registry = kiln_platforms::builtin_registry();
        let (name, env) = resolve(&registry, None, &linux64(), &request(Some("haiku"), &[], false)).unwrap();

        let human = render(name, &env, None).unwrap();
        assert!(human.contains("CC:  gcc-x86"));
        assert!(human.contains("-lbnetapi"));
        assert!(human.contains("build_gles2_headers"));

        let json = render(name, &env, Some("json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["config"]["cxx"], "g++-x86");
        assert_eq!(value["config"]["builders"].as_object().unwrap().len(), 3);

        let toml_text = render(name, &env, Some("toml")).unwrap();
        let back: BuildEnvironment = toml::from_str(&toml_text).unwrap();
        assert_eq!(back, env);

        assert!(render(name, &env, Some("xml")).is_err());
    }
}
