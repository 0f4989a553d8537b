//! Render window extraction.
//!
//! A [`RenderWindow`] is the visible slice of a document together with the overlays
//! an external highlighter applies when painting it. Only lines inside the viewport
//! are visited, so extracting a window costs the same regardless of document size.

use crate::config::LanguageProfile;
use crate::cursor::Cursor;
use crate::etc;
use crate::lines::Lines;
use crate::viewport::Viewport;
use std::cmp;
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// A style overlay covering the columns in `cols` of the `1`-based `line`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Highlight {
    pub line: usize,
    pub cols: Range<usize>,
}

#[derive(Clone, Debug)]
pub struct RenderWindow<'a> {
    /// `1`-based number of the first visible line.
    pub first_line: usize,

    /// Text of each visible line, already clipped to [`cols`](Self::cols) when
    /// horizontal scrolling is active.
    pub lines: Vec<&'a str>,

    /// Columns visible on every line, or `None` if lines are shown in full because
    /// they wrap.
    pub cols: Option<Range<usize>>,

    /// Overlay for the line containing the cursor, covering its full length.
    pub current_line: Highlight,

    /// Overlay for the single cell under the cursor.
    pub cursor_cell: Highlight,

    /// Display column of the cursor relative to the first visible column, which
    /// accounts for wide characters.
    pub cursor_screen_col: usize,

    pub tab_size: usize,
    pub word_wrap: bool,
    pub line_numbers: bool,
    pub indent_guides: bool,
}

impl<'a> RenderWindow<'a> {
    /// Extracts the window of `lines` visible through `view`, which is `height` rows
    /// tall and `width` columns wide.
    pub fn extract(
        lines: &'a Lines,
        view: Viewport,
        cur: Cursor,
        width: usize,
        height: usize,
        profile: &LanguageProfile,
    ) -> RenderWindow<'a> {
        let count = lines.line_count();
        let first = cmp::min(view.top_offset, count);
        let last = cmp::min(view.top_offset.saturating_add(height), count);

        let cols = if profile.scrolls() {
            Some(view.left_offset..view.left_offset + width)
        } else {
            None
        };

        let visible = lines.lines()[first..last]
            .iter()
            .map(|line| match cols {
                Some(ref cols) => etc::char_slice(line, cols.start, cols.end),
                None => line.as_str(),
            })
            .collect();

        let cur = cur.clamp(lines);
        let line = lines.line_at(cur.line).unwrap_or_default();
        let len = etc::char_len(line);
        let cell = if cur.col < len {
            cur.col
        } else {
            len.saturating_sub(1)
        };
        let left = if profile.scrolls() {
            view.left_offset
        } else {
            0
        };

        RenderWindow {
            first_line: first + 1,
            lines: visible,
            cols,
            current_line: Highlight {
                line: cur.line,
                cols: 0..len,
            },
            cursor_cell: Highlight {
                line: cur.line,
                cols: cell..cell + 1,
            },
            cursor_screen_col: screen_width(line, left, cur.col),
            tab_size: profile.tab_size,
            word_wrap: profile.word_wrap,
            line_numbers: profile.line_numbers,
            indent_guides: profile.indent_guides,
        }
    }

    /// Returns the `1`-based range of visible line numbers, which is empty if no
    /// lines are visible.
    pub fn line_range(&self) -> Range<usize> {
        self.first_line..self.first_line + self.lines.len()
    }
}

/// Returns the display width of characters in the range [`from`, `to`) of `line`,
/// counting positions beyond the end of `line` as one cell each.
fn screen_width(line: &str, from: usize, to: usize) -> usize {
    if from >= to {
        0
    } else {
        let slice = etc::char_slice(line, from, to);
        let n = etc::char_len(slice);
        let width = slice
            .chars()
            .map(|c| c.width().unwrap_or(0))
            .sum::<usize>();
        width + (to - from).saturating_sub(n)
    }
}
