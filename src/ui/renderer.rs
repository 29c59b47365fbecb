//! Terminal output renderer for prompts, diagnostics, and status lines.

use crate::error::EngineError;
use crate::ui::settings;
use crossterm::style::Stylize;

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Build the interactive prompt, e.g. `nucleus > `.
    pub fn prompt_text(&self, label: &str) -> String {
        if self.color {
            format!(
                "{}{}{}{}",
                label.with(settings::COLOR_PROMPT_LABEL),
                settings::PROMPT_SPACER,
                settings::PROMPT_SYMBOL.with(settings::COLOR_PROMPT_SYMBOL),
                settings::PROMPT_SPACER,
            )
        } else {
            format!(
                "{label}{}{}{}",
                settings::PROMPT_SPACER,
                settings::PROMPT_SYMBOL,
                settings::PROMPT_SPACER
            )
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_ERROR);
        }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print an engine failure.
    ///
    /// The engine's diagnostic is written untouched; only a failure with no
    /// diagnostic gets the error label and category.
    pub fn engine_failure(&self, err: &EngineError) {
        if err.message.trim().is_empty() {
            self.error(&err.to_string());
            return;
        }
        if err.message.ends_with('\n') {
            eprint!("{}", err.message);
        } else {
            eprintln!("{}", err.message);
        }
    }

    /// Print the session startup banner line (to stderr).
    pub fn banner(&self, text: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                text.with(settings::COLOR_BANNER_TEXT).bold()
            );
        } else {
            eprintln!("{text}");
        }
    }

    /// Print informational text requested by the user (to stdout).
    pub fn output(&self, text: &str) {
        println!("{}", text.trim_end());
    }
}
