//! Word navigation.
//!
//! A _word boundary_ is the position of a word character, in the Unicode sense of
//! letters, marks, digits and connector punctuation, that immediately follows a
//! non-word character. The start of a line is never a boundary, since nothing
//! precedes it. All word-wise motions and deletions share the definitions in this
//! module.
//!
//! Boundaries are found within a single line. Moving left without a boundary stops
//! at the start of the line, whereas moving right without one goes to the end of
//! the document.

use crate::cursor::Cursor;
use crate::etc;
use crate::lines::Lines;
use regex::Regex;
use std::sync::OnceLock;

/// Matches a non-word character followed by a word character. Matches never
/// overlap in a way that hides a boundary, since the trailing word character
/// cannot also be the leading non-word character of the next match.
const WORD_START: &str = r"\W\w";

fn word_start() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(WORD_START).unwrap_or_else(|e| panic!("{WORD_START}: {e}"))
    })
}

/// Returns an iterator over the character positions of all word boundaries in
/// `line` in ascending order.
pub fn boundaries(line: &str) -> impl Iterator<Item = usize> + '_ {
    word_start()
        .find_iter(line)
        .map(move |m| etc::offset_to_pos(line, m.start()) + 1)
}

/// Returns the nearest boundary in `line` strictly before `col`, or `0` if there is
/// none.
pub fn find_left(line: &str, col: usize) -> usize {
    boundaries(line).take_while(|&b| b < col).last().unwrap_or(0)
}

/// Returns the nearest boundary in `line` strictly after `col`, if any.
///
/// A boundary at `col` itself is skipped because the non-word character that forms
/// it lies before the cursor.
pub fn find_right(line: &str, col: usize) -> Option<usize> {
    boundaries(line).find(|&b| b > col)
}

/// Returns the cursor positioned at the word boundary to the left of `cur`.
pub fn left_word(lines: &Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    let line = lines.line_at(cur.line).unwrap_or_default();
    Cursor::new(cur.line, find_left(line, cur.col))
}

/// Returns the cursor positioned at the word boundary to the right of `cur`, or at
/// the end of the document if the rest of the line has no boundary.
pub fn right_word(lines: &Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    let line = lines.line_at(cur.line).unwrap_or_default();
    match find_right(line, cur.col) {
        Some(col) => Cursor::new(cur.line, col),
        None => Cursor::bottom(lines),
    }
}
