//! Resolved options for one lsx invocation.
//!
//! The parsed command line ([Cli](crate::utils::cli::Cli)) is the raw form; it is converted
//! into [Config] once at startup, after the terminal has been queried.
//! The listing mode and coloring never change between target directories.

use crate::core::terminal::{self, DEFAULT_TERM_WIDTH};
use crate::utils::cli::{Cli, ColorChoice};

/// How entries are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingMode {
    /// Down-then-across columns.
    #[default]
    Grid,
    /// Left-to-right lines, wrapped by width.
    Horizontal,
    /// One attribute row per entry.
    Long,
}

impl ListingMode {
    /// `-l` wins over `-x`.
    pub fn from_flags(long: bool, horizontal: bool) -> Self {
        if long {
            ListingMode::Long
        } else if horizontal {
            ListingMode::Horizontal
        } else {
            ListingMode::Grid
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    mode: ListingMode,
    colorize: bool,
    term_width: u16,
}

impl Config {
    pub fn new(mode: ListingMode, colorize: bool, term_width: u16) -> Self {
        Config {
            mode,
            colorize,
            term_width,
        }
    }

    /// Resolves the command line against the current terminal.
    pub fn from_cli(cli: &Cli) -> Self {
        let is_tty = terminal::stdout_is_tty();
        let colorize = match cli.color() {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_tty,
        };
        Config {
            mode: ListingMode::from_flags(cli.long(), cli.horizontal()),
            colorize,
            term_width: terminal::output_width(),
        }
    }

    // Getters

    #[inline]
    pub fn mode(&self) -> ListingMode {
        self.mode
    }

    #[inline]
    pub fn colorize(&self) -> bool {
        self.colorize
    }

    #[inline]
    pub fn term_width(&self) -> u16 {
        self.term_width
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mode: ListingMode::Grid,
            colorize: false,
            term_width: DEFAULT_TERM_WIDTH,
        }
    }
}
