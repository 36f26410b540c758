//! Platform profile model for the kiln build system.
//!
//! A platform profile answers three questions for the build orchestrator:
//! - **Activation:** does this platform apply to the current host?
//! - **Capability:** can a binary for this platform be built here?
//! - **Configuration:** given the build options, which compiler, flags,
//!   defines, include paths, link libraries, and header builders apply?
//!
//! Profiles never mutate shared state. [`PlatformProfile::configure`]
//! returns a [`BuildConfig`] value that the orchestrator merges into its
//! [`BuildEnvironment`].

pub mod builders;
pub mod config;
pub mod environment;
pub mod error;
pub mod host;
pub mod options;
pub mod profile;
pub mod registry;

pub use builders::{BuilderEntry, BuilderTable, HeaderAction, HeaderGenerator};
pub use config::BuildConfig;
pub use environment::BuildEnvironment;
pub use error::{KilnError, Result};
pub use host::{HostFacts, OsFamily};
pub use options::{Bits, BuildOptions, OptionValue, Target};
pub use profile::{OptionSpec, PlatformProfile};
pub use registry::{PlatformStatus, ProfileRegistry};
