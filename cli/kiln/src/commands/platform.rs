//! `kiln platform` — profile listing and description.

use anyhow::Result;
use kiln_core::{HostFacts, ProfileRegistry};

/// List every registered profile with its status on `host`.
pub fn list(registry: &ProfileRegistry, host: &HostFacts) -> Result<()> {
    println!("Platforms (host: {} {}-bit):", host.platform, host.pointer_width);
    println!();
    for status in registry.detect(host) {
        println!(
            "  {:<12} active: {:<5} buildable: {}",
            status.name, status.active, status.buildable
        );
    }
    println!();
    println!("Use 'kiln platform describe <name>' for details.");
    Ok(())
}

/// Describe one profile's options and flag overrides.
pub fn describe(registry: &ProfileRegistry, name: &str) -> Result<()> {
    let profile = registry.get(name)?;

    println!("=== Platform: {} ===", profile.name());
    println!();

    println!("--- Options ---");
    let options = profile.options();
    if options.is_empty() {
        println!("  (none)");
    }
    for opt in &options {
        println!("  {:<16} {} [default: {}]", opt.key, opt.help, opt.default);
    }
    println!();

    println!("--- Flag overrides ---");
    let flags = profile.flags();
    if flags.is_empty() {
        println!("  (none)");
    }
    for (key, value) in &flags {
        println!("  {key} = {value}");
    }

    Ok(())
}
