//! Display classification of entries.
//!
//! Maps an entry's `lstat` metadata and name onto a [DisplayCategory], then writes
//! names wrapped in the category's crossterm styling. Names are written as raw bytes.

use crate::core::error::ListError;
use crate::core::fm::{EntryKind, EntryMetadata};

use crossterm::queue;
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};

use std::io::{self, Write};
use std::path::Path;

/// Substrings that mark a name as an archive. Matched anywhere in the name, not only
/// as a suffix, so `backup.tar.old` is still an archive.
const ARCHIVE_MARKERS: [&[u8]; 3] = [b".tar", b".gz", b".zip"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCategory {
    Directory,
    Symlink,
    Special,
    Executable,
    Archive,
    Plain,
}

impl DisplayCategory {
    /// Classifies already fetched metadata. Checks run top-down and the first hit wins.
    pub fn from_metadata(md: &EntryMetadata, name: &[u8]) -> Self {
        match md.kind() {
            EntryKind::Directory => DisplayCategory::Directory,
            EntryKind::Symlink => DisplayCategory::Symlink,
            EntryKind::CharDevice | EntryKind::BlockDevice | EntryKind::Socket => {
                DisplayCategory::Special
            }
            _ if md.is_executable() => DisplayCategory::Executable,
            _ if is_archive_name(name) => DisplayCategory::Archive,
            _ => DisplayCategory::Plain,
        }
    }

    /// Foreground color of the category, if it has one.
    pub fn color(self) -> Option<Color> {
        match self {
            DisplayCategory::Directory => Some(Color::DarkBlue),
            DisplayCategory::Symlink => Some(Color::DarkMagenta),
            DisplayCategory::Executable => Some(Color::DarkGreen),
            DisplayCategory::Archive => Some(Color::DarkRed),
            DisplayCategory::Special | DisplayCategory::Plain => None,
        }
    }

    /// Writes `name` byte for byte, wrapped in this category's style.
    /// Plain names get no escape codes at all.
    pub fn write_name<W: Write>(self, out: &mut W, name: &[u8]) -> io::Result<()> {
        match self {
            DisplayCategory::Plain => out.write_all(name),
            DisplayCategory::Special => {
                queue!(out, SetAttribute(Attribute::Reverse))?;
                out.write_all(name)?;
                queue!(out, SetAttribute(Attribute::Reset))
            }
            _ => {
                if let Some(color) = self.color() {
                    queue!(out, SetForegroundColor(color))?;
                }
                out.write_all(name)?;
                queue!(out, ResetColor)
            }
        }
    }
}

/// Fetches `path` with `lstat` semantics and classifies it.
/// A symlink is always [DisplayCategory::Symlink], whatever it points to.
pub fn classify(path: &Path, name: &[u8]) -> Result<DisplayCategory, ListError> {
    let md = EntryMetadata::fetch(path)?;
    Ok(DisplayCategory::from_metadata(&md, name))
}

pub fn is_archive_name(name: &[u8]) -> bool {
    ARCHIVE_MARKERS
        .iter()
        .any(|marker| name.windows(marker.len()).any(|w| w == *marker))
}
