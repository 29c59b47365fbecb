//! Application orchestration: turn an invocation into an exit status.
//!
//! `entry` parses, loads config, and dispatches; `exec_mode` handles the
//! one-shot file and inline forms; `repl_mode` runs the interactive session.

pub mod entry;
pub mod exec_mode;
pub mod repl_mode;

/// Success, clean session end, help, or version.
pub const EXIT_SUCCESS: i32 = 0;
/// One-shot engine failure or configuration failure.
pub const EXIT_FAILURE: i32 = 1;
/// Malformed or unrecognized invocation.
pub const EXIT_USAGE: i32 = 64;
/// Source path rejected before reaching the engine.
pub const EXIT_INVALID_PATH: i32 = 67;
/// The interactive channel failed.
pub const EXIT_IO: i32 = 70;
