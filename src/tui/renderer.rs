//! Terminal output renderer for prompts, diagnostics, and status text.

use crate::tui::progress::{start_progress, ProgressHandle};
use crate::tui::settings;
use crossterm::style::Stylize;
use std::io::{self, Write};

/// Color-aware terminal writer.
///
/// Response text itself is streamed straight to stdout by the orchestrator;
/// the renderer owns everything around it.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Whether color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Print a bold announcement line to stdout.
    pub fn bold(&self, text: &str) {
        if self.color {
            println!("{}", text.bold());
        } else {
            println!("{text}");
        }
    }

    /// Print a plain line to stdout.
    pub fn plain(&self, text: &str) {
        println!("{text}");
    }

    /// Print a usage/example hint line to stdout.
    pub fn usage(&self, text: &str) {
        if self.color {
            println!("{}", text.with(settings::COLOR_USAGE));
        } else {
            println!("{text}");
        }
    }

    /// Print a generated shell command, visually set off from prose.
    pub fn command(&self, text: &str) {
        if self.color {
            println!("{}", text.with(settings::COLOR_COMMAND).bold());
        } else {
            println!("{text}");
        }
    }

    /// Print a one-line warning to stderr.
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

    /// Print a one-line error to stderr.
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

    /// Print the REPL prompt without a trailing newline and flush.
    pub fn repl_prompt(&self) {
        let mut out = io::stdout();
        if self.color {
            let _ = write!(out, "{}", settings::PROMPT_REPL.bold());
        } else {
            let _ = write!(out, "{}", settings::PROMPT_REPL);
        }
        let _ = out.flush();
    }

    /// Start the request spinner.
    pub fn progress(&self, label: &str) -> ProgressHandle {
        start_progress(label, self.color)
    }
}
