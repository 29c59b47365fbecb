//! Release identity baked in by `build.rs`.
//!
//! `--version` prints the full block; the interactive banner gets the short
//! one-line form.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short commit hash, or `unknown` outside a git checkout.
pub const GIT_COMMIT: &str = env!("NUCLEUS_BUILD_GIT_HASH");

/// UTC build time, `YYYY-MM-DDTHH:MM:SSZ`.
pub const BUILD_TIMESTAMP: &str = env!("NUCLEUS_BUILD_TIMESTAMP");

/// One line for the session banner: `nucleus v1.2.3 (abc123, built ...)`.
pub fn startup_metadata_line() -> String {
    format!("nucleus v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

/// Output of `nucleus --version`.
pub fn cli_version_text() -> String {
    format!("nucleus {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}
