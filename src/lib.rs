//! Internal library crate for lsx.
//!
//! The shipped application is the `lsx` binary (`src/main.rs`).
//!
//! This library exists to share code between the binary and the tests. It is not
//! considered a stable API for external use.

pub mod config;
pub mod core;
pub mod utils;
