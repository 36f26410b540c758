//! Haiku platform profile.
//!
//! Haiku binaries are built with the `gcc-x86` toolchain on any POSIX host
//! other than macOS. The profile links against the BeOS-style system kits
//! and renders through OpenGL with the GLES-over-GL shim.

use std::collections::BTreeMap;

use kiln_core::options::keys;
use kiln_core::{
    Bits, BuildConfig, BuildOptions, BuilderEntry, HeaderAction, HostFacts, OptionSpec,
    PlatformProfile, Target,
};

/// Private header directory of the platform layer.
pub const INCLUDE_DIR: &str = "#platform/haiku";

/// C compiler. Pinned regardless of the requested bit-width.
pub const CC: &str = "gcc-x86";
/// C++ compiler and link front end.
pub const CXX: &str = "g++-x86";

/// Backend and POSIX-mode defines.
pub const BACKEND_DEFINES: [&str; 5] = [
    "-DGLEW_ENABLED",
    "-DOPENGL_ENABLED",
    "-DUNIX_ENABLED",
    "-DGLES2_ENABLED",
    "-DGLES_OVER_GL",
];

/// System libraries every Haiku build links.
pub const LIBS: [&str; 7] = ["be", "game", "GL", "GLEW", "z", "network", "bnetapi"];

/// Header builders: name, generation action.
pub const SHADER_BUILDERS: [(&str, HeaderAction); 3] = [
    ("GLSL120", HeaderAction::LegacyGl),
    ("GLSL", HeaderAction::Glsl),
    ("GLSL120GLES", HeaderAction::Gles2),
];

const SHADER_SRC_SUFFIX: &str = ".glsl";
const SHADER_HEADER_SUFFIX: &str = "glsl.h";

/// The Haiku platform.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaikuProfile;

impl HaikuProfile {
    fn target_flags(options: &BuildOptions) -> &'static [&'static str] {
        match options.target() {
            Target::Release if options.debug_release() => &["-g2", "-fomit-frame-pointer"],
            Target::Release => &["-O2", "-ffast-math", "-fomit-frame-pointer"],
            Target::ReleaseDebug => &["-O2", "-ffast-math", "-DDEBUG_ENABLED"],
            Target::Debug => &["-g2", "-Wall", "-DDEBUG_ENABLED", "-DDEBUG_MEMORY_ENABLED"],
            Target::Other(_) => &[],
        }
    }
}

impl PlatformProfile for HaikuProfile {
    fn name(&self) -> &'static str {
        "Haiku"
    }

    fn is_active(&self, _host: &HostFacts) -> bool {
        true
    }

    fn can_build(&self, host: &HostFacts) -> bool {
        host.is_posix() && !host.is_macos()
    }

    fn options(&self) -> Vec<OptionSpec> {
        Vec::new()
    }

    fn flags(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(keys::BUILTIN_ZLIB.to_string(), "no".to_string())])
    }

    fn configure(&self, options: &BuildOptions, host: &HostFacts) -> BuildConfig {
        let mut cfg = BuildConfig::new();

        if options.bits() == Bits::Default {
            let bits = if host.is_64bit() { "64" } else { "32" };
            tracing::debug!(bits, "resolved default bit-width from host");
            cfg.override_option(keys::BITS, bits);
        }

        cfg.append_cpppath([INCLUDE_DIR]);

        // TODO: select clang or gcc2 toolchains once multi-arch hosts are supported.
        cfg.set_cc(CC).set_cxx(CXX);

        let target_flags = Self::target_flags(options);
        tracing::debug!(build_target = ?options.target(), flags = ?target_flags, "target flags");
        cfg.append_ccflags(target_flags.iter().copied());

        cfg.append_cppflags(BACKEND_DEFINES)
            .append_libs(LIBS);

        for (name, action) in SHADER_BUILDERS {
            cfg.add_builder(
                name,
                BuilderEntry::new(action, SHADER_HEADER_SUFFIX, SHADER_SRC_SUFFIX),
            );
        }

        cfg
    }
}
