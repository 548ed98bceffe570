//! Terminal output for the `pin` binary.
//!
//! Status, warnings and errors go to stderr. Listings go to stdout so they
//! can be piped.

use crossterm::style::{Color, Stylize};

const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const INDENT_1: &str = "  ";
const GLYPH_SECTION_BULLET: &str = "•";
const GLYPH_MARKED: &str = "*";

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("\r{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("\r{LABEL_WARNING} {msg}");
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!("\r{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("\r{LABEL_ERROR} {msg}");
        }
    }

    /// Print a small section header in status-style output.
    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "\r{} {}",
                GLYPH_SECTION_BULLET.with(Color::DarkCyan),
                title.with(Color::Cyan).bold()
            );
        } else {
            eprintln!("\r{title}:");
        }
    }

    /// Print an activity line for things that changed on disk.
    pub fn activity(&self, text: &str) {
        if self.color {
            eprintln!(
                "\r{} {}",
                GLYPH_SECTION_BULLET.with(Color::DarkCyan),
                text.with(Color::Green).bold()
            );
        } else {
            eprintln!("\r{text}");
        }
    }

    /// Print a key/value line under a status section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "\r{INDENT_1}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                value.with(Color::White),
            );
        } else {
            eprintln!("\r{INDENT_1}{key}: {value}");
        }
    }

    /// Print a simple indented detail line.
    pub fn detail(&self, text: &str) {
        if self.color {
            eprintln!("\r{INDENT_1}{}", text.with(Color::DarkGrey));
        } else {
            eprintln!("\r{INDENT_1}{text}");
        }
    }

    /// Print one listing row (to stdout). Marked rows are the active or
    /// selected entry.
    pub fn entry(&self, marked: bool, text: &str) {
        let line = entry_line(marked, text);
        if self.color && marked {
            println!("{}", line.with(Color::Green).bold());
        } else {
            println!("{line}");
        }
    }
}

fn entry_line(marked: bool, text: &str) -> String {
    let marker = if marked { GLYPH_MARKED } else { " " };
    format!("{marker} {text}")
}
