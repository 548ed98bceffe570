//! Compile-time build metadata exposed to `pin --version` and `pin --help`.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("PIN_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("PIN_BUILD_TIMESTAMP");

/// Version block printed by `pin --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("PIN_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("PIN_BUILD_TIMESTAMP")
);

/// Help trailer block that surfaces build metadata in `pin --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("PIN_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("PIN_BUILD_TIMESTAMP")
);
