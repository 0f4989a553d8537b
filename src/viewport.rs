//! Viewport controller.
//!
//! The viewport is the visible rectangle of a document, identified by the `0`-based
//! index of the first visible line and the `0`-based first visible column. It is
//! derived state: after the cursor changes, [`Viewport::reconcile`] adjusts both
//! offsets independently so that the cursor remains visible.

use crate::cursor::Cursor;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Viewport {
    pub top_offset: usize,
    pub left_offset: usize,
}

/// Describes how the cursor arrived at its new column, which determines how the
/// horizontal offset follows it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scroll {
    /// The cursor moved incrementally along its line, so the offset advances or
    /// retreats by just enough to keep the cursor in view.
    Step,

    /// The cursor jumped, either to another line or to a line boundary, so the offset
    /// is recomputed from the cursor column alone.
    Jump,
}

/// The dimensions of the visible area, as supplied by the render host.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Extent {
    /// Number of visible rows.
    pub height: usize,

    /// Number of visible columns before horizontal scrolling applies.
    pub width: usize,

    /// Whether columns beyond `width` are reached by scrolling. If `false`, the
    /// horizontal offset stays at `0`.
    pub scrolls: bool,
}

impl Viewport {
    pub const ORIGIN: Viewport = Viewport::new(0, 0);

    pub const fn new(top_offset: usize, left_offset: usize) -> Viewport {
        Viewport {
            top_offset,
            left_offset,
        }
    }

    /// Adjusts both offsets to follow `cur`.
    pub fn reconcile(&mut self, cur: Cursor, extent: Extent, scroll: Scroll) {
        self.reconcile_vertical(cur.line, extent.height);
        if extent.scrolls {
            self.reconcile_horizontal(cur.col, extent.width, scroll);
        } else {
            self.left_offset = 0;
        }
    }

    fn reconcile_vertical(&mut self, line: usize, height: usize) {
        let height = height.max(1);
        if line <= self.top_offset {
            self.top_offset = line.saturating_sub(1);
        } else if line + 1 >= self.top_offset + height {
            // A single-row viewport would otherwise scroll one line past the cursor.
            let top = (line + 1).saturating_sub(height);
            self.top_offset = top.min(line.saturating_sub(1));
        }
    }

    fn reconcile_horizontal(&mut self, col: usize, width: usize, scroll: Scroll) {
        let width = width.max(1);
        self.left_offset = match scroll {
            Scroll::Step => {
                if col >= self.left_offset + width {
                    col + 1 - width
                } else if col <= self.left_offset {
                    col.saturating_sub(1)
                } else {
                    self.left_offset
                }
            }
            Scroll::Jump => col.saturating_sub(width),
        };
    }
}
