//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction that allows
//! for different output styles. The default implementation labels each turn
//! with its author and uses ANSI escape codes to tell them apart.

use std::io::{self, Stdout, Write};

use crate::types::{Role, Turn};

/// ANSI escape code for bold text (used for role labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for dim text (used for the waiting indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for blue text (used for the user label).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for cyan text (used for the assistant label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code to clear the current line.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Richer surfaces that redraw from a session snapshot
pub trait Renderer: Send {
    /// Print one turn of the conversation.
    ///
    /// Error turns are assistant turns and are printed the same way.
    fn print_turn(&mut self, turn: &Turn);

    /// Print a whole transcript, oldest first.
    fn print_transcript(&mut self, turns: &[Turn]) {
        for turn in turns {
            self.print_turn(turn);
        }
    }

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Called when a send starts waiting on the backend.
    fn start_waiting(&mut self);

    /// Called when the backend has answered (or failed).
    fn finish_waiting(&mut self);
}

/// Formats a turn as a labelled block of text.
pub fn format_turn(turn: &Turn, use_color: bool) -> String {
    let (label, color) = match turn.role() {
        Role::User => ("You:", ANSI_BLUE),
        Role::Assistant => ("Assistant:", ANSI_CYAN),
    };
    if use_color {
        format!("{ANSI_BOLD}{color}{label}{ANSI_RESET}\n{}", turn.content())
    } else {
        format!("{label}\n{}", turn.content())
    }
}

/// Plain text renderer with optional ANSI styling.
///
/// This renderer outputs text directly to stdout with optional
/// ANSI escape codes for role labels and the waiting indicator.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    waiting: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            waiting: false,
        }
    }

    /// Flushes stdout so partial lines show up immediately.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_turn(&mut self, turn: &Turn) {
        self.finish_waiting();
        println!("{}\n", format_turn(turn, self.use_color));
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        self.finish_waiting();
        eprintln!("\nError: {error}");
    }

    fn print_info(&mut self, info: &str) {
        self.finish_waiting();
        println!("{info}");
    }

    fn start_waiting(&mut self) {
        if self.waiting {
            return;
        }
        self.waiting = true;
        if self.use_color {
            print!("{ANSI_DIM}Thinking...{ANSI_RESET}");
        } else {
            print!("Thinking...");
        }
        self.flush();
    }

    fn finish_waiting(&mut self) {
        if !self.waiting {
            return;
        }
        self.waiting = false;
        if self.use_color {
            print!("{ANSI_CLEAR_LINE}");
        } else {
            println!();
        }
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_default_has_color() {
        let renderer = PlainTextRenderer::new();
        assert!(renderer.use_color);
    }

    #[test]
    fn renderer_without_color() {
        let renderer = PlainTextRenderer::with_color(false);
        assert!(!renderer.use_color);
    }

    #[test]
    fn waiting_toggles() {
        let mut renderer = PlainTextRenderer::with_color(false);
        renderer.start_waiting();
        assert!(renderer.waiting);
        renderer.print_turn(&Turn::assistant("done"));
        assert!(!renderer.waiting);
    }

    #[test]
    fn plain_labels() {
        assert_eq!(format_turn(&Turn::user("hello"), false), "You:\nhello");
        assert_eq!(
            format_turn(&Turn::assistant("hi there"), false),
            "Assistant:\nhi there"
        );
    }

    #[test]
    fn colored_labels() {
        let text = format_turn(&Turn::assistant("hi"), true);
        assert!(text.starts_with(ANSI_BOLD));
        assert!(text.contains(ANSI_CYAN));
        assert!(text.ends_with("\nhi"));
    }
}
