//! Directory reading and per-entry metadata for lsx.
//!
//! Provides the [EntryName] and [EntryList] types which flow through the whole pipeline,
//! the case-insensitive sort, and [EntryMetadata] which is fetched fresh from the filesystem.

use crate::core::error::ListError;

use log::{debug, trace};
use unicode_width::UnicodeWidthStr;

use std::borrow::Cow;
use std::cmp::Ordering;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single visible member of a directory.
///
/// Holds the raw name as read from the filesystem and the number of cells it takes when
/// printed, which is what the layout engine pads against. Names that are not valid UTF-8
/// are printed byte for byte, so their width is their byte length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    name: Box<OsStr>,
    width: usize,
}

impl EntryName {
    pub fn new(name: OsString) -> Self {
        let width = match name.to_str() {
            Some(utf8) => UnicodeWidthStr::width(utf8),
            None => name.as_encoded_bytes().len(),
        };
        EntryName {
            name: name.into_boxed_os_str(),
            width,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        self.name.as_encoded_bytes()
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.bytes().first() == Some(&b'.')
    }
}

/// Ordered names of one directory plus the widest name, used for column sizing.
/// Built once per directory and dropped when that directory has been rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<EntryName>,
    max_width: usize,
}

impl EntryList {
    pub fn with_capacity(capacity: usize) -> Self {
        EntryList {
            entries: Vec::with_capacity(capacity),
            max_width: 0,
        }
    }

    pub fn push(&mut self, entry: EntryName) {
        self.max_width = self.max_width.max(entry.width());
        self.entries.push(entry);
    }

    #[inline]
    pub fn entries(&self) -> &[EntryName] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Sorts the names in place, ignoring ASCII case.
    /// The sort is stable, so names equal under folding keep their read order.
    pub fn sort(&mut self) {
        if self.entries.len() > 1 {
            self.entries.sort_by(|a, b| compare_names(a, b));
        }
    }
}

impl FromIterator<EntryName> for EntryList {
    fn from_iter<I: IntoIterator<Item = EntryName>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = EntryList::with_capacity(iter.size_hint().0);
        for entry in iter {
            list.push(entry);
        }
        list
    }
}

/// Case-insensitive, locale independent comparison of two names (ASCII folding only).
pub fn compare_names(a: &EntryName, b: &EntryName) -> Ordering {
    let lhs = a.bytes().iter().map(u8::to_ascii_lowercase);
    let rhs = b.bytes().iter().map(u8::to_ascii_lowercase);
    lhs.cmp(rhs)
}

/// Reads the visible members of `path`, skipping any name starting with `.`.
/// The returned list is in filesystem order; call [EntryList::sort] before rendering.
pub fn read_entries(path: &Path) -> Result<EntryList, ListError> {
    let dir = fs::read_dir(path).map_err(|source| ListError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut list = EntryList::with_capacity(64);
    for entry in dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };

        let name = EntryName::new(entry.file_name());
        if name.is_hidden() {
            continue;
        }
        list.push(name);
    }

    debug!(
        "read {} visible entries from {} (widest {})",
        list.len(),
        path.display(),
        list.max_width()
    );
    Ok(list)
}

/// Reads and sorts in one step.
pub fn read_sorted(path: &Path) -> Result<EntryList, ListError> {
    let mut list = read_entries(path)?;
    list.sort();
    Ok(list)
}

/// Type of a directory entry, as reported without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
}

impl EntryKind {
    pub fn from_file_type(ft: fs::FileType) -> Self {
        if ft.is_dir() {
            return EntryKind::Directory;
        }
        if ft.is_symlink() {
            return EntryKind::Symlink;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;

            if ft.is_char_device() {
                return EntryKind::CharDevice;
            }
            if ft.is_block_device() {
                return EntryKind::BlockDevice;
            }
            if ft.is_fifo() {
                return EntryKind::Fifo;
            }
            if ft.is_socket() {
                return EntryKind::Socket;
            }
        }

        EntryKind::Regular
    }
}

/// Attributes of one entry, fetched on demand with `lstat` semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    kind: EntryKind,
    mode: u32,
    nlink: u64,
    uid: u32,
    gid: u32,
    size: u64,
    modified: Option<SystemTime>,
}

impl EntryMetadata {
    /// Owner, group and other execute bits.
    pub const EXEC_MASK: u32 = 0o111;

    /// Fetches metadata for `path` without following a final symlink.
    pub fn fetch(path: &Path) -> Result<Self, ListError> {
        let md = fs::symlink_metadata(path).map_err(|source| ListError::MetadataFetch {
            path: path.to_path_buf(),
            source,
        })?;
        trace!("fetched metadata for {}", path.display());
        Ok(Self::from_metadata(&md))
    }

    pub fn from_metadata(md: &Metadata) -> Self {
        let kind = EntryKind::from_file_type(md.file_type());

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;

            EntryMetadata {
                kind,
                mode: md.mode() & 0o777,
                nlink: md.nlink(),
                uid: md.uid(),
                gid: md.gid(),
                size: md.size(),
                modified: md.modified().ok(),
            }
        }
        #[cfg(not(unix))]
        {
            let mode = if md.permissions().readonly() { 0o444 } else { 0o644 };
            EntryMetadata {
                kind,
                mode,
                nlink: 1,
                uid: 0,
                gid: 0,
                size: md.len(),
                modified: md.modified().ok(),
            }
        }
    }

    // Accessors

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Permission bits only (`0o777` mask).
    #[inline]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    #[inline]
    pub fn nlink(&self) -> u64 {
        self.nlink
    }

    #[inline]
    pub fn uid(&self) -> u32 {
        self.uid
    }

    #[inline]
    pub fn gid(&self) -> u32 {
        self.gid
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.mode & Self::EXEC_MASK != 0
    }
}

/// Joins a directory and an entry name into the path used for stat calls.
#[inline]
pub fn entry_path(dir: &Path, entry: &EntryName) -> PathBuf {
    dir.join(entry.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn names(list: &EntryList) -> Vec<String> {
        list.entries()
            .iter()
            .map(|e| e.name_str().into_owned())
            .collect()
    }

    #[test]
    fn hidden_entries_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        File::create(tmp.path().join(".hidden"))?;
        File::create(tmp.path().join("visible"))?;
        fs::create_dir(tmp.path().join(".git"))?;

        let list = read_entries(tmp.path())?;
        assert_eq!(names(&list), vec!["visible"]);
        assert_eq!(list.max_width(), "visible".len());
        Ok(())
    }

    #[test]
    fn sort_ignores_case() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        for n in ["banana", "Apple", "cherry", "apricot", "Blueberry"] {
            File::create(tmp.path().join(n))?;
        }

        let list = read_sorted(tmp.path())?;
        assert_eq!(
            names(&list),
            vec!["Apple", "apricot", "banana", "Blueberry", "cherry"]
        );
        Ok(())
    }

    #[test]
    fn sort_is_idempotent_and_non_decreasing() {
        let mut list: EntryList = ["zeta", "Alpha", "beta", "ALPHA", "_x", "Beta2", "a"]
            .into_iter()
            .map(|n| EntryName::new(OsString::from(n)))
            .collect();
        list.sort();
        let once = list.clone();
        list.sort();
        assert_eq!(once, list);

        for pair in list.entries().windows(2) {
            assert_ne!(compare_names(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn folded_ties_keep_read_order() {
        let mut list: EntryList = ["a", "A", "b"]
            .into_iter()
            .map(|n| EntryName::new(OsString::from(n)))
            .collect();
        list.sort();
        assert_eq!(names(&list), vec!["a", "A", "b"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_width_is_byte_length() {
        use std::os::unix::ffi::OsStrExt;

        let entry = EntryName::new(OsStr::from_bytes(b"caf\xe9").to_os_string());
        assert_eq!(entry.bytes(), b"caf\xe9");
        assert_eq!(entry.width(), 4);

        let entry = EntryName::new(OsString::from("日本"));
        assert_eq!(entry.width(), 4);
    }

    #[test]
    fn read_nonexistent_is_directory_access_error() {
        let result = read_entries(Path::new("/path/does/not/exist"));
        assert!(matches!(result, Err(ListError::DirectoryAccess { .. })));
    }

    #[test]
    fn fetch_reports_kind_and_size() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let file = tmp.path().join("data.bin");
        fs::write(&file, vec![0u8; 4096])?;
        fs::create_dir(tmp.path().join("sub"))?;

        let md = EntryMetadata::fetch(&file)?;
        assert_eq!(md.kind(), EntryKind::Regular);
        assert_eq!(md.size(), 4096);
        assert!(md.nlink() >= 1);
        assert!(md.modified().is_some());

        let md = EntryMetadata::fetch(&tmp.path().join("sub"))?;
        assert_eq!(md.kind(), EntryKind::Directory);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn fetch_does_not_follow_symlinks() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("target"))?;
        std::os::unix::fs::symlink(tmp.path().join("target"), tmp.path().join("link"))?;
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("dangling"))?;

        assert_eq!(
            EntryMetadata::fetch(&tmp.path().join("link"))?.kind(),
            EntryKind::Symlink
        );
        assert_eq!(
            EntryMetadata::fetch(&tmp.path().join("dangling"))?.kind(),
            EntryKind::Symlink
        );
        Ok(())
    }

    #[test]
    fn fetch_missing_is_metadata_error() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let result = EntryMetadata::fetch(&tmp.path().join("gone"));
        assert!(matches!(result, Err(ListError::MetadataFetch { .. })));
        Ok(())
    }
}
