//! Long-format attribute rows.
//!
//! Formats permission strings, link counts, owners, sizes and modification times in the
//! classic fixed-width `ls -l` layout.

use crate::core::classify::DisplayCategory;
use crate::core::fm::{EntryKind, EntryMetadata};

use chrono::{DateTime, Local};

use std::io::{self, Write};
use std::time::SystemTime;

/// Fallback for ids with no passwd/group entry.
pub const UNKNOWN_OWNER: &str = "unknown";

/// ctime(3) style: `Wed Jun  3 21:49:08 2026`.
const TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// First character of the permission string.
pub fn type_glyph(kind: EntryKind) -> char {
    match kind {
        EntryKind::Directory => 'd',
        EntryKind::Symlink => 'l',
        EntryKind::CharDevice => 'c',
        EntryKind::BlockDevice => 'b',
        EntryKind::Fifo => 'p',
        EntryKind::Socket => 's',
        EntryKind::Regular => '-',
    }
}

/// Formats the entry type and permission bits in a unix-like format, e.g. `drwxr-xr-x`.
/// Always exactly 10 characters.
pub fn format_permissions(md: &EntryMetadata) -> String {
    let mode = md.mode();
    let mut chars = [type_glyph(md.kind()), '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    let shifts = [6, 3, 0];
    for (i, &shift) in shifts.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1u32 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1u32 != 0 {
            chars[base + 1] = 'w';
        }
        if (mode >> shift) & 1u32 != 0 {
            chars[base + 2] = 'x';
        }
    }
    chars.iter().collect()
}

/// Formats the modification time in local time. Unknown times render as `?`.
pub fn format_file_time(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format(TIME_FORMAT).to_string()
        })
        .unwrap_or_else(|| "?".to_string())
}

/// Resolves uids and gids to names, remembering each lookup for the current listing.
pub struct OwnerNames {
    #[cfg(unix)]
    cache: users::UsersCache,
}

impl OwnerNames {
    pub fn new() -> Self {
        OwnerNames {
            #[cfg(unix)]
            cache: users::UsersCache::new(),
        }
    }

    pub fn user(&self, uid: u32) -> String {
        #[cfg(unix)]
        {
            use users::Users;
            self.cache
                .get_user_by_uid(uid)
                .map(|user| user.name().to_string_lossy().into_owned())
                .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
        }
        #[cfg(not(unix))]
        {
            let _ = uid;
            UNKNOWN_OWNER.to_string()
        }
    }

    pub fn group(&self, gid: u32) -> String {
        #[cfg(unix)]
        {
            use users::Groups;
            self.cache
                .get_group_by_gid(gid)
                .map(|group| group.name().to_string_lossy().into_owned())
                .unwrap_or_else(|| UNKNOWN_OWNER.to_string())
        }
        #[cfg(not(unix))]
        {
            let _ = gid;
            UNKNOWN_OWNER.to_string()
        }
    }
}

impl Default for OwnerNames {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds one attribute line per entry. Holds the owner cache for a single directory.
#[derive(Default)]
pub struct LongFormatter {
    owners: OwnerNames,
}

impl LongFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `perms links owner group size time`, the columns before the name.
    pub fn format_attributes(&self, md: &EntryMetadata) -> String {
        format!(
            "{} {:>2} {} {} {:>8} {}",
            format_permissions(md),
            md.nlink(),
            self.owners.user(md.uid()),
            self.owners.group(md.gid()),
            md.size(),
            format_file_time(md.modified())
        )
    }

    /// Writes one full row and its newline. The name goes out as raw bytes, styled by
    /// `category` when one is given.
    pub fn write_row<W: Write>(
        &self,
        out: &mut W,
        md: &EntryMetadata,
        name: &[u8],
        category: Option<DisplayCategory>,
    ) -> io::Result<()> {
        write!(out, "{} ", self.format_attributes(md))?;
        match category {
            Some(category) => category.write_name(out, name)?,
            None => out.write_all(name)?,
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn assert_well_formed(perms: &str) {
        assert_eq!(perms.chars().count(), 10, "{perms}");
        let mut chars = perms.chars();
        let first = chars.next().unwrap_or(' ');
        assert!("dlcbps-".contains(first), "{perms}");
        assert!(chars.all(|c| "rwx-".contains(c)), "{perms}");
    }

    #[cfg(unix)]
    #[test]
    fn permission_triads_are_independent() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new()?;
        let file = tmp.path().join("f");
        File::create(&file)?;

        for (mode, expected) in [
            (0o644, "-rw-r--r--"),
            (0o755, "-rwxr-xr-x"),
            (0o000, "----------"),
            (0o421, "-r---w---x"),
            (0o777, "-rwxrwxrwx"),
        ] {
            fs::set_permissions(&file, fs::Permissions::from_mode(mode))?;
            let perms = format_permissions(&EntryMetadata::fetch(&file)?);
            assert_eq!(perms, expected);
            assert_well_formed(&perms);
        }
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644))?;
        Ok(())
    }

    #[test]
    fn directory_and_link_glyphs() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("d"))?;
        let perms = format_permissions(&EntryMetadata::fetch(&tmp.path().join("d"))?);
        assert!(perms.starts_with('d'));
        assert_well_formed(&perms);

        #[cfg(unix)]
        {
            std::os::unix::fs::symlink("d", tmp.path().join("l"))?;
            let perms = format_permissions(&EntryMetadata::fetch(&tmp.path().join("l"))?);
            assert!(perms.starts_with('l'));
            assert_well_formed(&perms);
        }
        Ok(())
    }

    #[test]
    fn glyph_table() {
        assert_eq!(type_glyph(EntryKind::Regular), '-');
        assert_eq!(type_glyph(EntryKind::CharDevice), 'c');
        assert_eq!(type_glyph(EntryKind::BlockDevice), 'b');
        assert_eq!(type_glyph(EntryKind::Fifo), 'p');
        assert_eq!(type_glyph(EntryKind::Socket), 's');
    }

    #[test]
    fn time_has_no_trailing_newline() {
        let formatted = format_file_time(Some(SystemTime::now()));
        assert!(!formatted.ends_with('\n'));
        assert_eq!(formatted.len(), 24, "{formatted:?}");
        assert_eq!(format_file_time(None), "?");
    }

    #[test]
    fn unknown_ids_fall_back() {
        let owners = OwnerNames::new();
        assert_eq!(owners.user(u32::MAX - 7), UNKNOWN_OWNER);
        assert_eq!(owners.group(u32::MAX - 7), UNKNOWN_OWNER);
    }

    #[cfg(unix)]
    #[test]
    fn row_layout() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new()?;
        let file = tmp.path().join("report.txt");
        fs::write(&file, vec![b'x'; 4096])?;
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644))?;

        let md = EntryMetadata::fetch(&file)?;
        let mut out = Vec::new();
        LongFormatter::new().write_row(&mut out, &md, b"report.txt", None)?;
        let row = String::from_utf8(out)?;
        assert!(row.ends_with(" report.txt\n"), "{row}");
        let row = row.trim_end_matches('\n');

        assert!(row.starts_with("-rw-r--r--  1 "), "{row}");
        assert!(row.contains("     4096 "), "{row}");
        assert!(row.ends_with(" report.txt"), "{row}");
        assert!(!row.contains('\n'));
        Ok(())
    }
}
