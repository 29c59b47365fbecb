//! Engine failure categories derived from the VM's exit status.

use std::fmt;
use std::process::ExitStatus;

/// Category of an engine failure.
///
/// The VM reports what went wrong through its exit status; each status in its
/// table maps to one variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disruption {
    /// Generic failure (status 1).
    Generic,
    Command,
    Syntax,
    Type,
    Argument,
    Range,
    Reference,
    Io,
    Memory,
    Overflow,
    Internal,
    Unimplemented,
    Permission,
    /// Interrupted with Ctrl-C (status 130).
    Terminated,
    /// Killed by a signal; the number when the platform reports one.
    Signal(Option<i32>),
    /// Any other non-zero status.
    Other(i32),
    /// The engine program could not be started.
    Unavailable,
}

impl Disruption {
    /// Map a raw exit code (`None` when the process had no code) to a category.
    pub fn from_exit_code(code: Option<i32>) -> Self {
        let Some(code) = code else {
            return Self::Signal(None);
        };
        match code {
            1 => Self::Generic,
            64 => Self::Command,
            65 => Self::Syntax,
            66 => Self::Type,
            67 => Self::Argument,
            68 => Self::Range,
            69 => Self::Reference,
            70 => Self::Io,
            80 => Self::Memory,
            81 => Self::Overflow,
            82 => Self::Internal,
            90 => Self::Unimplemented,
            126 => Self::Permission,
            130 => Self::Terminated,
            129..=255 => Self::Signal(Some(code - 128)),
            other => Self::Other(other),
        }
    }

    /// Categorize a finished child process status.
    pub fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(Some(signal));
            }
        }
        Self::from_exit_code(status.code())
    }

    /// Exit status this category corresponds to, if any.
    pub fn exit_code(self) -> Option<i32> {
        let code = match self {
            Self::Generic => 1,
            Self::Command => 64,
            Self::Syntax => 65,
            Self::Type => 66,
            Self::Argument => 67,
            Self::Range => 68,
            Self::Reference => 69,
            Self::Io => 70,
            Self::Memory => 80,
            Self::Overflow => 81,
            Self::Internal => 82,
            Self::Unimplemented => 90,
            Self::Permission => 126,
            Self::Terminated => 130,
            Self::Signal(Some(n)) => 128 + n,
            Self::Other(code) => code,
            Self::Signal(None) | Self::Unavailable => return None,
        };
        Some(code)
    }
}

impl fmt::Display for Disruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Generic | Self::Other(_) => "Error",
            Self::Command => "Command Error",
            Self::Syntax => "Syntax Error",
            Self::Type => "Type Error",
            Self::Argument => "Argument Error",
            Self::Range => "Range Error",
            Self::Reference => "Reference Error",
            Self::Io => "IO Error",
            Self::Memory => "Memory Error",
            Self::Overflow => "Overflow Error",
            Self::Internal => "Internal Error",
            Self::Unimplemented => "Unimplemented Error",
            Self::Permission => "Permission Error",
            Self::Terminated => "Terminated",
            Self::Signal(Some(n)) => return write!(f, "Signal {n}"),
            Self::Signal(None) => "Signal",
            Self::Unavailable => "Engine Unavailable",
        };
        f.write_str(label)
    }
}
