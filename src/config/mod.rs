//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Command-line flags (`--engine`, `--no-color`), applied by the caller.
//! 2. Environment variables (`NUCLEUS_ENGINE`, `NUCLEUS_COLOR`).
//! 3. TOML file specified via the `--config` flag.
//! 4. `./nucleus.toml` in the current directory.
//! 5. `$XDG_CONFIG_HOME/nucleus/nucleus.toml` (or the platform config dir).
//! 6. Built-in defaults.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod env;
mod sources;
mod types;

pub use sources::config_root_dir;
pub use types::{Config, ConfigSource, DisplayConfig, EngineConfig, LoadedConfig, ReplConfig};

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from the `--config` flag).
pub fn load_config(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        sources::read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    env::apply_runtime_env_overrides(&mut config, &env_lookup)?;
    normalize_config(&mut config)?;
    let warnings = repair_soft_issues(&mut config);
    tracing::debug!(%source, program = %config.engine.program, "configuration loaded");
    Ok(LoadedConfig {
        config,
        source,
        warnings,
    })
}

/// Replace values that are unusable but harmless, reporting each change.
fn repair_soft_issues(config: &mut Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.repl.prompt.trim().is_empty() {
        warnings.push(format!(
            "repl.prompt is empty; using `{}`",
            defaults::DEFAULT_PROMPT_LABEL
        ));
        config.repl.prompt = defaults::DEFAULT_PROMPT_LABEL.to_string();
    }
    warnings
}

/// Normalize user-facing spellings and reject values the front-end cannot use.
pub fn normalize_config(config: &mut Config) -> Result<(), ConfigError> {
    let program = config.engine.program.trim();
    if program.is_empty() {
        return Err(ConfigError::Invalid("engine.program must not be empty".into()));
    }
    config.engine.program = program.to_string();

    // Accept both "nuc" and ".nuc".
    let extension = config.engine.extension.trim().trim_start_matches('.');
    if extension.is_empty() {
        return Err(ConfigError::Invalid(
            "engine.extension must not be empty".into(),
        ));
    }
    config.engine.extension = extension.to_string();

    if config.engine.eval_flag.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "engine.eval_flag must not be empty".into(),
        ));
    }
    Ok(())
}
