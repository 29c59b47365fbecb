//! CLI argument parsing via clap, and classification into an [`Action`].

use crate::error::UsageError;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

/// Front-end for the Nucleus language: run files, evaluate snippets, or start
/// an interactive session.
#[derive(Debug, Parser)]
#[command(name = "nucleus", disable_version_flag = true)]
pub struct Args {
    /// Source file to run (same as `nucleus run <FILE>`).
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Print version information and exit.
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Path to config file (default: ./nucleus.toml or ~/.config/nucleus/nucleus.toml).
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Override the engine program.
    #[arg(long = "engine", value_name = "PROGRAM", global = true)]
    pub engine: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a source file.
    Run {
        /// Path to a `.nuc` source file.
        filename: String,
    },
    /// Evaluate inline source and exit.
    Eval {
        /// Source text handed to the engine verbatim.
        #[arg(allow_hyphen_values = true)]
        input: String,
    },
}

/// What one invocation asks the front-end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RunFile(String),
    EvalInline(String),
    StartSession,
    ShowVersion,
}

/// Flags that adjust loaded configuration for this invocation only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub config: Option<String>,
    pub engine: Option<String>,
    pub no_color: bool,
}

/// Result of parsing an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInvocation {
    pub action: Action,
    pub overrides: ConfigOverrides,
}

/// Parse the tokens that follow the program name.
pub fn parse<I, T>(tokens: I) -> Result<ParsedInvocation, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    if tokens.is_empty() {
        return Ok(ParsedInvocation {
            action: Action::StartSession,
            overrides: ConfigOverrides::default(),
        });
    }
    if version_requested(&tokens) {
        return Ok(ParsedInvocation {
            action: Action::ShowVersion,
            overrides: ConfigOverrides::default(),
        });
    }

    let argv = std::iter::once("nucleus".to_string()).chain(tokens);
    let args = Args::try_parse_from(argv).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp => UsageError {
            requested: true,
            text: err.to_string(),
        },
        _ => UsageError::invalid(err.to_string()),
    })?;

    let action = action_for(&args)?;
    tracing::debug!(?action, "classified invocation");
    Ok(ParsedInvocation {
        action,
        overrides: ConfigOverrides {
            config: args.config,
            engine: args.engine,
            no_color: args.no_color,
        },
    })
}

/// Map an invocation to exactly one [`Action`], or a usage failure.
pub fn classify<I, T>(tokens: I) -> Result<Action, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    parse(tokens).map(|parsed| parsed.action)
}

/// Whether `-v`/`--version` appears as a flag, before any clap validation.
///
/// Option values and the inline source after `eval` are not flags, and
/// nothing after `--` is.
fn version_requested(tokens: &[String]) -> bool {
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "--" => return false,
            "-v" | "--version" => return true,
            "-c" | "--config" | "--engine" | "eval" => {
                iter.next();
            }
            _ => {}
        }
    }
    false
}

fn action_for(args: &Args) -> Result<Action, UsageError> {
    if args.version {
        return Ok(Action::ShowVersion);
    }
    match (&args.file, &args.command) {
        (Some(file), None) => Ok(Action::RunFile(file.clone())),
        (None, Some(Command::Run { filename })) => Ok(Action::RunFile(filename.clone())),
        (None, Some(Command::Eval { input })) => Ok(Action::EvalInline(input.clone())),
        (None, None) => Ok(Action::StartSession),
        (Some(file), Some(_)) => Err(UsageError::invalid(format!(
            "error: unexpected argument '{file}' before a subcommand\n\nUsage: nucleus [OPTIONS] [FILE] [COMMAND]\n\nFor more information, try '--help'.\n"
        ))),
    }
}
