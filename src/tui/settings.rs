//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak prompt strings, spinner behavior,
//! and colors.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_REPL: &str = ">> ";
pub const EDITOR_PLACEHOLDER: &str = "Enter your prompt";

pub const BANNER_INTERACTIVE: &str =
    "Interactive mode started. Press Ctrl + C or type exit to quit.";
pub const BANNER_MULTILINE: &str = "Press Tab to submit and Ctrl + C to exit.";

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";

// ---------------------------------------------------------------------------
// Spinner / progress
// ---------------------------------------------------------------------------

pub const PROGRESS_CLEAR_LINE: &str = "\r\x1b[2K";
pub const PROGRESS_FRAMES: [char; 4] = ['|', '/', '-', '\\'];
pub const PROGRESS_TICK_MS: u64 = 100;
pub const PROGRESS_LABEL: &str = "thinking";

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Minimum buffer char count required for the submit gesture to fire.
pub const EDITOR_SUBMIT_MIN_CHARS: usize = 2;
/// Fallback column count when the terminal size cannot be queried.
pub const EDITOR_FALLBACK_COLUMNS: u16 = 80;

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_PROGRESS_FRAME: Color = Color::Cyan;
pub const COLOR_USAGE: Color = Color::Blue;
pub const COLOR_ERROR: Color = Color::Red;
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_COMMAND: Color = Color::Green;
pub const COLOR_PLACEHOLDER: Color = Color::DarkGrey;
