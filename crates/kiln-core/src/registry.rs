//! Registry of available platform profiles.

use serde::Serialize;

use crate::error::{KilnError, Result};
use crate::host::HostFacts;
use crate::profile::PlatformProfile;

/// Activation and capability of one profile on a given host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformStatus {
    pub name: &'static str,
    pub active: bool,
    pub buildable: bool,
}

/// Ordered collection of profiles.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: Vec<Box<dyn PlatformProfile>>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, profile: Box<dyn PlatformProfile>) {
        self.profiles.push(profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn PlatformProfile> {
        self.profiles.iter().map(|p| p.as_ref())
    }

    /// Look up a profile by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&dyn PlatformProfile> {
        self.iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Like [`find`](Self::find), but an unknown name is an error.
    pub fn get(&self, name: &str) -> Result<&dyn PlatformProfile> {
        self.find(name).ok_or_else(|| KilnError::UnknownPlatform {
            name: name.to_string(),
        })
    }

    /// Status of every profile on `host`.
    pub fn detect(&self, host: &HostFacts) -> Vec<PlatformStatus> {
        self.iter()
            .map(|p| PlatformStatus {
                name: p.name(),
                active: p.is_active(host),
                buildable: p.can_build(host),
            })
            .collect()
    }

    /// Profiles that are active and can build on `host`.
    pub fn buildable(&self, host: &HostFacts) -> Vec<&dyn PlatformProfile> {
        self.iter()
            .filter(|p| {
                let ok = p.is_active(host) && p.can_build(host);
                if !ok {
                    tracing::debug!(platform = p.name(), "skipping platform on this host");
                }
                ok
            })
            .collect()
    }
}
