//! Configuration data model.
//!
//! Struct/enum definitions plus default values. Source discovery and
//! precedence live in `sources`/`env`; `mod` ties them together.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_ENGINE_PROGRAM, DEFAULT_EVAL_FLAG, DEFAULT_PROMPT_LABEL, DEFAULT_SOURCE_EXTENSION,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub display: DisplayConfig,
    pub repl: ReplConfig,
}

/// How to reach the external execution engine.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Program name (looked up on `PATH`) or path of the VM binary.
    pub program: String,
    /// Extra arguments placed before the file path or eval flag.
    pub args: Vec<String>,
    /// Flag that precedes inline source for evaluation.
    pub eval_flag: String,
    /// Recognized source-file extension, without the leading dot.
    pub extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_ENGINE_PROGRAM.into(),
            args: Vec::new(),
            eval_flag: DEFAULT_EVAL_FLAG.into(),
            extension: DEFAULT_SOURCE_EXTENSION.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Whether ANSI color/style output is enabled.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Interactive session presentation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReplConfig {
    /// Label printed before the prompt symbol.
    pub prompt: String,
    /// Print the version banner when a terminal session starts.
    pub banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT_LABEL.into(),
            banner: true,
        }
    }
}

/// Where the effective config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Config loaded from explicit `--config` path.
    Explicit(PathBuf),
    /// Config loaded from `./nucleus.toml`.
    Local,
    /// Config loaded from the per-user config directory.
    Global(PathBuf),
    /// No file found; built-in defaults were used.
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Global(path) => write!(f, "{}", path.display()),
            Self::Local => write!(f, "./{}", super::defaults::LOCAL_CONFIG_FILE),
            Self::BuiltInDefaults => write!(f, "built-in defaults"),
        }
    }
}

/// Effective config, the source it was read from, and non-fatal warnings.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
    pub warnings: Vec<String>,
}
