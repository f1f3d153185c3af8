//! Process-level helpers for lsx.
//!
//! - [cli]: the command-line surface, parsed with clap.
//! - [logging]: the stderr diagnostic logger behind the `log` macros.

pub mod cli;
pub mod logging;

pub use cli::{Cli, ColorChoice};
