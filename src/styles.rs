//! Terminal text styling utilities.
//!
//! Keeps ANSI escape codes isolated from application code. Colors are only
//! emitted when the target stream is a terminal and `NO_COLOR` is unset.

use std::io::IsTerminal;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const RESET: &str = "\x1b[0m";

fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Whether stdout should receive ANSI colors.
pub fn colors_enabled() -> bool {
    !no_color() && std::io::stdout().is_terminal()
}

/// Whether stderr should receive ANSI colors.
pub fn colors_enabled_stderr() -> bool {
    !no_color() && std::io::stderr().is_terminal()
}

/// Wraps text in bold styling.
pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}
