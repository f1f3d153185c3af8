//! Column layout for the grid and row-major listings.
//!
//! The engine only deals with indices into a sorted [EntryList](crate::core::EntryList);
//! painting and padding happen in the renderer.

use log::trace;

/// Blank cells between two columns.
pub const COLUMN_SPACING: usize = 2;

/// Column count, row count and the shared column width for one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutPlan {
    columns: usize,
    rows: usize,
    column_width: usize,
    count: usize,
}

impl LayoutPlan {
    /// Computes the plan for `count` names whose widest is `max_width` cells.
    /// There is always at least one column, even if a single name overflows the terminal.
    pub fn compute(count: usize, max_width: usize, term_width: usize) -> Self {
        let column_width = max_width + COLUMN_SPACING;
        let columns = (term_width / column_width).max(1);
        let rows = count.div_ceil(columns);

        let plan = LayoutPlan {
            columns,
            rows,
            column_width,
            count,
        };
        trace!("layout plan: {:?} for width {}", plan, term_width);
        plan
    }

    // Accessors

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn column_width(&self) -> usize {
        self.column_width
    }

    /// Columns that hold at least one name. Can be fewer than [columns](Self::columns)
    /// when the names run out before the last columns are reached.
    pub fn used_columns(&self) -> usize {
        if self.rows == 0 {
            0
        } else {
            self.count.div_ceil(self.rows)
        }
    }

    /// Down-then-across placement: row `r`, column `c` holds index `r + c * rows`.
    /// Cells past the end of the list are left out of their row.
    pub fn grid_rows(&self) -> Vec<Vec<usize>> {
        (0..self.rows)
            .map(|r| {
                (0..self.columns)
                    .map(|c| r + c * self.rows)
                    .filter(|&idx| idx < self.count)
                    .collect()
            })
            .collect()
    }
}

/// Row-major placement that tracks the running offset on the current line and breaks
/// before a cell that would overflow `term_width`. The check also runs at the start of a
/// line, so a cell wider than the terminal is preceded by an empty line.
pub fn horizontal_lines(count: usize, column_width: usize, term_width: usize) -> Vec<Vec<usize>> {
    let mut lines: Vec<Vec<usize>> = Vec::new();
    let mut current = Vec::new();
    let mut pos = 0;

    for idx in 0..count {
        if pos + column_width > term_width {
            lines.push(std::mem::take(&mut current));
            pos = 0;
        }
        current.push(idx);
        pos += column_width;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
