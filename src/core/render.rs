//! Listing orchestration.
//!
//! Each target directory runs `read -> sort -> {long | grid | horizontal}` start to finish
//! before the next one begins. A directory that cannot be read produces no listing and a
//! message on the error stream; it never stops the remaining targets.
//!
//! Output and error streams are passed in, so the whole pipeline can be driven into buffers.

use crate::config::{Config, ListingMode};
use crate::core::classify::{DisplayCategory, classify};
use crate::core::fm::{EntryList, EntryMetadata, EntryName, entry_path, read_sorted};
use crate::core::formatter::LongFormatter;
use crate::core::layout::{LayoutPlan, horizontal_lines};

use log::debug;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Prefix for messages on the error stream.
const ERR_PREFIX: &str = "lsx";

pub struct Renderer<'a> {
    config: &'a Config,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Renderer { config }
    }

    /// Lists every target in order. With no targets the current directory is listed
    /// without a header; otherwise each target gets a header line and a trailing blank line.
    ///
    /// Only write failures on `out` or `err` are returned.
    pub fn run<W: Write, E: Write>(
        &self,
        targets: &[PathBuf],
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        if targets.is_empty() {
            self.render_dir(Path::new("."), out, err)?;
            return out.flush();
        }

        for target in targets {
            writeln!(out, "Directory listing of {}:", target.display())?;
            self.render_dir(target, out, err)?;
            writeln!(out)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Lists a single directory in the configured mode.
    pub fn render_dir<W: Write, E: Write>(
        &self,
        dir: &Path,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let list = match read_sorted(dir) {
            Ok(list) => list,
            Err(e) => {
                writeln!(err, "{}: {}", ERR_PREFIX, e)?;
                return Ok(());
            }
        };

        if list.is_empty() {
            return Ok(());
        }

        debug!(
            "rendering {} entries of {} as {:?}",
            list.len(),
            dir.display(),
            self.config.mode()
        );

        match self.config.mode() {
            ListingMode::Long => self.render_long(dir, &list, out, err),
            ListingMode::Grid => self.render_grid(dir, &list, out),
            ListingMode::Horizontal => self.render_horizontal(dir, &list, out),
        }
    }

    fn render_long<W: Write, E: Write>(
        &self,
        dir: &Path,
        list: &EntryList,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let formatter = LongFormatter::new();

        for entry in list.entries() {
            // one lstat per entry feeds both the attributes and the color
            let md = match EntryMetadata::fetch(&entry_path(dir, entry)) {
                Ok(md) => md,
                Err(e) => {
                    writeln!(err, "{}: {}", ERR_PREFIX, e)?;
                    continue;
                }
            };

            let category = self
                .config
                .colorize()
                .then(|| DisplayCategory::from_metadata(&md, entry.bytes()));
            formatter.write_row(out, &md, entry.bytes(), category)?;
        }
        Ok(())
    }

    fn render_grid<W: Write>(&self, dir: &Path, list: &EntryList, out: &mut W) -> io::Result<()> {
        let plan = LayoutPlan::compute(
            list.len(),
            list.max_width(),
            usize::from(self.config.term_width()),
        );

        for row in plan.grid_rows() {
            for idx in row {
                self.write_cell(dir, &list.entries()[idx], plan.column_width(), out)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn render_horizontal<W: Write>(
        &self,
        dir: &Path,
        list: &EntryList,
        out: &mut W,
    ) -> io::Result<()> {
        let plan = LayoutPlan::compute(
            list.len(),
            list.max_width(),
            usize::from(self.config.term_width()),
        );
        let lines = horizontal_lines(
            list.len(),
            plan.column_width(),
            usize::from(self.config.term_width()),
        );

        for line in lines {
            for idx in line {
                self.write_cell(dir, &list.entries()[idx], plan.column_width(), out)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Writes one name, as raw bytes, padded with spaces to `width`.
    /// Padding counts only the visible name.
    fn write_cell<W: Write>(
        &self,
        dir: &Path,
        entry: &EntryName,
        width: usize,
        out: &mut W,
    ) -> io::Result<()> {
        let padding = width.saturating_sub(entry.width());

        if self.config.colorize() {
            match classify(&entry_path(dir, entry), entry.bytes()) {
                Ok(category) => category.write_name(out, entry.bytes())?,
                Err(e) => {
                    debug!("no color for {}: {}", entry.name_str(), e);
                    out.write_all(entry.bytes())?;
                }
            }
        } else {
            out.write_all(entry.bytes())?;
        }
        write!(out, "{:padding$}", "")
    }
}
