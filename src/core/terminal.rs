//! Terminal queries for lsx.
//!
//! Output width for the column layouts and tty detection for automatic coloring.

use crossterm::tty::IsTty;
use log::debug;

use std::io;

/// Width used whenever the output is not a terminal or its size cannot be read.
pub const DEFAULT_TERM_WIDTH: u16 = 80;

/// Returns true if standard output is an interactive terminal.
pub fn stdout_is_tty() -> bool {
    io::stdout().is_tty()
}

/// Width of the terminal attached to standard output, or [DEFAULT_TERM_WIDTH].
pub fn output_width() -> u16 {
    if !stdout_is_tty() {
        return DEFAULT_TERM_WIDTH;
    }
    match crossterm::terminal::size() {
        Ok((0, _)) => DEFAULT_TERM_WIDTH,
        Ok((cols, _)) => cols,
        Err(e) => {
            debug!("terminal size unavailable ({}), using {}", e, DEFAULT_TERM_WIDTH);
            DEFAULT_TERM_WIDTH
        }
    }
}
