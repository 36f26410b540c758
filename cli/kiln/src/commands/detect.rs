//! `kiln detect` — which platforms can be built on this host.

use anyhow::{bail, Result};
use kiln_core::{HostFacts, ProfileRegistry};

/// Print the buildable platforms, as text or JSON.
pub fn run(registry: &ProfileRegistry, host: &HostFacts, format: Option<&str>) -> Result<()> {
    match format {
        None | Some("human") => {
            let buildable = registry.buildable(host);
            if buildable.is_empty() {
                println!("No platforms can be built on this host.");
            }
            for profile in buildable {
                println!("{}", profile.name());
            }
        }
        Some("json") => {
            let report = serde_json::json!({
                "host": host,
                "platforms": registry.detect(host),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Some(other) => bail!("unknown format '{other}' (expected human or json)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use kiln_core::OsFamily;

    use super::*;

    #[test]
    fn formats() {
        let registry = kiln_platforms::builtin_registry();
        let host = HostFacts::new(OsFamily::Posix, "linux", 64);
        assert!(run(&registry, &host, None).is_ok());
        assert!(run(&registry, &host, Some("json")).is_ok());
        assert!(run(&registry, &host, Some("yaml")).is_err());
    }
}
