//! Built-in platform profiles for kiln.

pub mod haiku;

pub use haiku::HaikuProfile;

use kiln_core::ProfileRegistry;

/// A registry holding every built-in profile.
pub fn builtin_registry() -> ProfileRegistry {
    let mut registry = ProfileRegistry::new();
    registry.register(Box::new(HaikuProfile));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_contains_haiku() {
        let registry = builtin_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.find("haiku").is_some());
    }
}
