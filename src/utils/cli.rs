//! Command-line surface of lsx.
//!
//! `lsx [-l] [-x] [--color WHEN] [DIRECTORY...]`
//!
//! Unknown flags are rejected by clap with a usage message and a non-zero exit status
//! before anything is listed.

use clap::{Parser, ValueEnum};

use std::ffi::OsString;
use std::path::PathBuf;

/// When to colorize entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Only when standard output is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "lsx", version)]
#[command(about = "List directory contents in columns, lines, or long format")]
pub struct Cli {
    /// Long listing: permissions, links, owner, group, size, mtime, name
    #[arg(short = 'l')]
    long: bool,

    /// Lay entries out across lines instead of down columns (ignored with -l)
    #[arg(short = 'x')]
    horizontal: bool,

    /// Colorize names by entry type
    #[arg(long, value_enum, value_name = "WHEN", default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Directories to list (defaults to the current directory)
    #[arg(value_name = "DIRECTORY")]
    directories: Vec<PathBuf>,
}

impl Cli {
    /// Parses an explicit argument list, first item being the program name.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Cli::try_parse_from(args)
    }

    // Accessors

    #[inline]
    pub fn long(&self) -> bool {
        self.long
    }

    #[inline]
    pub fn horizontal(&self) -> bool {
        self.horizontal
    }

    #[inline]
    pub fn color(&self) -> ColorChoice {
        self.color
    }

    #[inline]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_short_flags() -> Result<(), clap::Error> {
        let cli = Cli::parse_from_args(["lsx", "-lx", "a", "b"])?;
        assert!(cli.long());
        assert!(cli.horizontal());
        assert_eq!(cli.directories(), &[PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(cli.color(), ColorChoice::Auto);
        Ok(())
    }

    #[test]
    fn no_arguments_means_no_directories() -> Result<(), clap::Error> {
        let cli = Cli::parse_from_args(["lsx"])?;
        assert!(cli.directories().is_empty());
        assert!(!cli.long());
        Ok(())
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = Cli::parse_from_args(["lsx", "-z"]);
        assert!(err.is_err());
        let err = Cli::parse_from_args(["lsx", "--color", "sometimes"]);
        assert!(err.is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
