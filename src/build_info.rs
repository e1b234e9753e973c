//! Compile-time build metadata exposed to the CLI version surface.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("TGPT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("TGPT_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `tgpt --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("TGPT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("TGPT_BUILD_TIMESTAMP")
);

/// Render the CLI version line used by `tgpt --version`.
pub fn cli_version_text() -> String {
    format!("tgpt {VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
