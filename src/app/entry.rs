//! Application entry orchestration for the nucleus CLI.

use super::{exec_mode, repl_mode, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
use crate::build_info;
use crate::cli::{self, Action, ConfigOverrides};
use crate::config::{load_config, normalize_config, Config};
use crate::engine::{Engine, ProcessEngine};
use crate::error::ConfigError;
use crate::session::LineChannel;
use crate::ui::render::{RenderSink, Renderer};
use std::io::IsTerminal;

/// Top-level CLI entrypoint: classify, load config, then dispatch.
///
/// `tokens` are the arguments after the program name. `--version` is answered
/// before config is read, so a broken config never hides it.
pub async fn run<I, T>(tokens: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let parsed = match cli::parse(tokens) {
        Ok(parsed) => parsed,
        Err(usage) if usage.requested => {
            println!("{usage}");
            return EXIT_SUCCESS;
        }
        Err(usage) => {
            eprintln!("{usage}");
            return EXIT_USAGE;
        }
    };
    if parsed.action == Action::ShowVersion {
        println!("{}", build_info::cli_version_text());
        return EXIT_SUCCESS;
    }

    let bootstrap_renderer = Renderer::new(!parsed.overrides.no_color && stderr_is_terminal());
    let (config, warnings) = match load_effective_config(&parsed.overrides) {
        Ok(loaded) => loaded,
        Err(err) => {
            bootstrap_renderer.error(&format!("failed to load config: {err}"));
            return EXIT_FAILURE;
        }
    };

    let renderer = Renderer::new(config.display.color && stderr_is_terminal());
    for warning in &warnings {
        renderer.warn(warning);
    }
    let engine = ProcessEngine::from_config(&config.engine);
    tracing::debug!(program = engine.program(), "engine configured");
    dispatch(parsed.action, &engine, &renderer, &config).await
}

/// Carry out `action` against the process's standard streams.
pub async fn dispatch(
    action: Action,
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    config: &Config,
) -> i32 {
    dispatch_with(action, engine, renderer, config, || {
        repl_mode::stdio_channel(renderer, config)
    })
    .await
}

/// Carry out `action`; `open_channel` is only called to start a session.
pub async fn dispatch_with<C, F>(
    action: Action,
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    config: &Config,
    open_channel: F,
) -> i32
where
    C: LineChannel,
    F: FnOnce() -> C,
{
    match action {
        Action::ShowVersion => {
            renderer.output(&build_info::cli_version_text());
            EXIT_SUCCESS
        }
        Action::RunFile(path) => {
            exec_mode::run_file(engine, renderer, &path, &config.engine.extension).await
        }
        Action::EvalInline(source) => exec_mode::eval_inline(engine, renderer, &source).await,
        Action::StartSession => repl_mode::run_session(engine, renderer, open_channel()).await,
    }
}

fn load_effective_config(
    overrides: &ConfigOverrides,
) -> Result<(Config, Vec<String>), ConfigError> {
    let loaded = load_config(overrides.config.as_deref())?;
    tracing::debug!(source = %loaded.source, "using configuration");
    let mut config = loaded.config;
    apply_overrides(&mut config, overrides)?;
    Ok((config, loaded.warnings))
}

/// Apply command-line flags on top of file and environment config.
pub fn apply_overrides(config: &mut Config, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
    if let Some(program) = &overrides.engine {
        config.engine.program = program.clone();
    }
    if overrides.no_color {
        config.display.color = false;
    }
    normalize_config(config)
}

fn stderr_is_terminal() -> bool {
    std::io::stderr().is_terminal()
}
