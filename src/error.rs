//! Unified error types for the front-end.

use crate::engine::Disruption;
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// PathError
// ---------------------------------------------------------------------------

/// A user-supplied source path was rejected before reaching the engine.
#[derive(Debug)]
pub enum PathError {
    /// Nothing exists at the given path.
    FileNotFound(PathBuf),
    /// The path exists but does not carry the engine's source extension.
    WrongExtension { path: PathBuf, expected: String },
    /// The path exists but could not be resolved to a canonical form.
    Unresolvable { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "file `{}` does not exist", path.display()),
            Self::WrongExtension { path, expected } => write!(
                f,
                "file `{}` does not have a \".{expected}\" file extension",
                path.display()
            ),
            Self::Unresolvable { path, source } => {
                write!(f, "could not resolve `{}`: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unresolvable { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

/// A failure reported by the execution engine.
///
/// `message` is the engine's own diagnostic text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub kind: Disruption,
    pub message: String,
}

impl EngineError {
    pub fn new(kind: Disruption, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.trim().is_empty() {
            return match self.kind.exit_code() {
                Some(code) => write!(f, "{} (engine exited with status {code})", self.kind),
                None => write!(f, "{}", self.kind),
            };
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for EngineError {}

// ---------------------------------------------------------------------------
// UsageError
// ---------------------------------------------------------------------------

/// The argument vector did not describe a known action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageError {
    /// True when the user asked for help; the text is then informational.
    pub requested: bool,
    /// Fully rendered help or error text, including the usage line.
    pub text: String,
}

impl UsageError {
    /// Usage failure with a rendered message.
    pub fn invalid(text: impl Into<String>) -> Self {
        Self {
            requested: false,
            text: text.into(),
        }
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.trim_end())
    }
}

impl std::error::Error for UsageError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors that end an interactive session abnormally.
#[derive(Debug)]
pub enum SessionError {
    /// `start` was called on a session that already left `Idle`.
    AlreadyStarted,
    /// `step` was called on a session that is not `Running`.
    NotRunning,
    /// The input/output channel failed.
    Io(std::io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "session already started"),
            Self::NotRunning => write!(f, "session is not running"),
            Self::Io(e) => write!(f, "session channel: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
