//! Environment variable overrides.

use crate::error::ConfigError;

use super::Config;

/// Apply `NUCLEUS_*` overrides on top of file-derived values.
pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(program) = non_empty(env_lookup("NUCLEUS_ENGINE")) {
        config.engine.program = program;
    }
    if let Some(raw) = non_empty(env_lookup("NUCLEUS_COLOR")) {
        config.display.color = parse_switch(&raw).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "invalid NUCLEUS_COLOR value `{raw}`: expected on/off, true/false, yes/no or 1/0"
            ))
        })?;
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
