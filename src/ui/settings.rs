//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! The single place to tweak prompt glyphs, labels, and colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_SYMBOL: &str = ">";
pub const PROMPT_SPACER: &str = " ";

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const GLYPH_SECTION_BULLET: &str = "•";
pub const BANNER_EXIT_HINT: &str = "type `exit` or press Ctrl-D to leave";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROMPT_LABEL: Color = Color::Cyan;
pub const COLOR_PROMPT_SYMBOL: Color = Color::White;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_BANNER_TEXT: Color = Color::Grey;
