//! kiln CLI — platform detection and build configuration.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use kiln_core::HostFacts;
use tracing_subscriber::{fmt, EnvFilter};

use commands::configure::ConfigureRequest;
use manifest::KilnManifest;

#[derive(Parser)]
#[command(name = "kiln", version, about = "Platform configuration for engine builds")]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a kiln.toml in a directory
    Init {
        /// Project directory (default: current directory)
        dir: Option<PathBuf>,
    },
    /// Inspect platform profiles
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },
    /// List platforms that can be built on this host
    Detect {
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Resolve options and print the configuration for a platform
    Configure {
        /// Platform name (default: [build] platform from kiln.toml)
        #[arg(long)]
        platform: Option<String>,
        /// Override a build option (e.g., --set bits=32)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        sets: Vec<String>,
        /// Output format (human, json, toml)
        #[arg(long)]
        format: Option<String>,
        /// Configure even if the host cannot build the platform
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PlatformAction {
    /// List platform profiles and their status on this host
    List,
    /// Show the options and flag overrides of a platform
    Describe {
        /// Platform name
        name: String,
    },
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("kiln=debug,kiln_core=debug,kiln_platforms=debug")
    } else {
        EnvFilter::new("kiln=info,kiln_core=warn,kiln_platforms=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let registry = kiln_platforms::builtin_registry();
    let host = HostFacts::detect();
    tracing::debug!(?host, "detected host");

    match cli.command {
        Commands::Init { dir } => commands::init::run(&dir.unwrap_or(cwd)),

        Commands::Platform { action } => match action {
            PlatformAction::List => commands::platform::list(&registry, &host),
            PlatformAction::Describe { name } => commands::platform::describe(&registry, &name),
        },

        Commands::Detect { format } => commands::detect::run(&registry, &host, format.as_deref()),

        Commands::Configure {
            platform,
            sets,
            format,
            force,
        } => {
            let manifest = load_manifest_optional(&cwd)?;
            let request = ConfigureRequest {
                platform: platform.as_deref(),
                sets: &sets,
                force,
            };
            commands::configure::run(
                &registry,
                manifest.as_ref(),
                &host,
                &request,
                format.as_deref(),
            )
        }
    }
}

/// Try to load a manifest from the current directory upward.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<Option<KilnManifest>> {
    Ok(KilnManifest::find_and_load(cwd)?.map(|(manifest, _)| manifest))
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// init, then configure from the generated manifest.
    #[test]
    fn init_then_configure_workflow() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("engine");
        commands::init::create_project(&project, "engine").unwrap();

        let manifest = load_manifest_optional(&project).unwrap();
        assert!(manifest.is_some());

        let registry = kiln_platforms::builtin_registry();
        let host = HostFacts::new(kiln_core::OsFamily::Posix, "linux", 32);
        let request = ConfigureRequest {
            platform: None,
            sets: &[],
            force: false,
        };
        let (name, env) =
            commands::configure::resolve(&registry, manifest.as_ref(), &host, &request).unwrap();
        assert_eq!(name, "Haiku");
        assert_eq!(env.options.get_str("bits"), Some("32"));
        assert_eq!(env.config.builders.len(), 3);
    }

    #[test]
    fn cli_parses_configure_flags() {
        let cli = Cli::try_parse_from([
            "kiln",
            "configure",
            "--platform",
            "haiku",
            "--set",
            "bits=32",
            "--set",
            "target=release",
            "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Configure { platform, sets, format, force } => {
                assert_eq!(platform.as_deref(), Some("haiku"));
                assert_eq!(sets, vec!["bits=32", "target=release"]);
                assert_eq!(format.as_deref(), Some("json"));
                assert!(!force);
            }
            _ => panic!("expected configure"),
        }
    }
}
