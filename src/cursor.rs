//! Cursor model.
//!
//! A [`Cursor`] is a position in [`Lines`] denoted by a `1`-based _line_ and a
//! `0`-based _column_, where columns count characters. Every movement returns a
//! new cursor whose column is clamped to the length of its line, so a cursor
//! produced here always addresses a valid insertion point.

use crate::lines::Lines;
use std::cmp;
use std::fmt::{self, Display, Formatter};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

impl Cursor {
    /// A cursor at the start of the first line.
    pub const TOP: Cursor = Cursor::new(1, 0);

    pub const fn new(line: usize, col: usize) -> Cursor {
        Cursor { line, col }
    }

    /// Returns a cursor with `line` and `col` clamped to the extent of `lines`.
    pub fn clamp(self, lines: &Lines) -> Cursor {
        let line = self.line.clamp(1, lines.line_count());
        let col = cmp::min(self.col, lines.len_of(line));
        Cursor::new(line, col)
    }

    /// Returns `true` if this cursor addresses a valid position in `lines`.
    pub fn is_valid(&self, lines: &Lines) -> bool {
        self.line >= 1 && self.line <= lines.line_count() && self.col <= lines.len_of(self.line)
    }

    pub fn left(self, lines: &Lines) -> Cursor {
        let cur = self.clamp(lines);
        Cursor::new(cur.line, cur.col.saturating_sub(1))
    }

    pub fn right(self, lines: &Lines) -> Cursor {
        let cur = self.clamp(lines);
        Cursor::new(cur.line, cmp::min(cur.col + 1, lines.len_of(cur.line)))
    }

    /// Moves up one line, trying to land on `snap_col`, which is normally the column
    /// from which a series of vertical movements started.
    pub fn up(self, lines: &Lines, snap_col: usize) -> Cursor {
        let line = cmp::max(self.line.saturating_sub(1), 1);
        Cursor::new(line, snap_col).clamp(lines)
    }

    /// Moves down one line, trying to land on `snap_col`.
    pub fn down(self, lines: &Lines, snap_col: usize) -> Cursor {
        let line = cmp::min(self.line + 1, lines.line_count());
        Cursor::new(line, snap_col).clamp(lines)
    }

    pub fn home(self, lines: &Lines) -> Cursor {
        Cursor::new(self.line, 0).clamp(lines)
    }

    pub fn end(self, lines: &Lines) -> Cursor {
        let line = self.clamp(lines).line;
        Cursor::new(line, lines.len_of(line))
    }

    pub fn bottom(lines: &Lines) -> Cursor {
        let line = lines.line_count();
        Cursor::new(line, lines.len_of(line))
    }
}

impl Default for Cursor {
    fn default() -> Cursor {
        Cursor::TOP
    }
}

/// Formats as `line:col` with a `1`-based column, which is how positions are shown
/// to users.
impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col + 1)
    }
}
