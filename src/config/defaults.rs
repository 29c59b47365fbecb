//! Default configuration constants.

/// Engine program launched when nothing overrides it.
pub(super) const DEFAULT_ENGINE_PROGRAM: &str = "nucleus-vm";
/// Flag that switches the engine from file mode to inline evaluation.
pub(super) const DEFAULT_EVAL_FLAG: &str = "--eval";
/// Source-file extension the engine recognizes, without the dot.
pub(super) const DEFAULT_SOURCE_EXTENSION: &str = "nuc";
/// Label shown in front of the interactive prompt symbol.
pub(super) const DEFAULT_PROMPT_LABEL: &str = "nucleus";
/// Local config file name looked up in the working directory.
pub(super) const LOCAL_CONFIG_FILE: &str = "nucleus.toml";
/// Directory under the config root holding the global config file.
pub(super) const GLOBAL_CONFIG_DIR: &str = "nucleus";
