//! Core listing pipeline for lsx.
//!
//! - [fm]: directory reading, sorting and per-entry metadata (see [read_sorted], [EntryList]).
//! - [classify]: display categories used to color names.
//! - [layout]: column layout for the grid and row-major listings.
//! - [formatter]: long-format attribute rows.
//! - [render]: the per-directory state machine tying the pieces together.
//! - [terminal]: output width and tty detection.
//! - [error]: the error types shared by the stages above.

pub mod classify;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod layout;
pub mod render;
pub mod terminal;

pub use classify::{DisplayCategory, classify};
pub use error::ListError;
pub use fm::{EntryKind, EntryList, EntryMetadata, EntryName, read_entries, read_sorted};
pub use formatter::{LongFormatter, format_file_time, format_permissions};
pub use layout::{COLUMN_SPACING, LayoutPlan, horizontal_lines};
pub use render::Renderer;
