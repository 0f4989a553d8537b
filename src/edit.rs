//! Editing operations.
//!
//! Each operation takes the document and the cursor, applies its change, and returns
//! the new cursor. The incoming cursor is clamped before use and the returned cursor
//! always addresses a valid position, so callers never observe a document and cursor
//! that disagree.

use crate::config::LanguageProfile;
use crate::cursor::Cursor;
use crate::etc;
use crate::lines::Lines;
use crate::word;

/// Inserts `text` at the cursor and returns the cursor following the inserted text.
///
/// Text containing `\n` is inserted one line at a time with plain line breaks in
/// between, so pasted text is never re-indented. A `\r` preceding a `\n` is dropped.
pub fn insert(lines: &mut Lines, cur: Cursor, text: &str) -> Cursor {
    let mut cur = cur.clamp(lines);
    let segs = text.split('\n').collect::<Vec<_>>();
    let last = segs.len() - 1;
    for (i, seg) in segs.into_iter().enumerate() {
        if i > 0 {
            cur = break_line(lines, cur, 0);
        }
        let seg = if i < last {
            seg.strip_suffix('\r').unwrap_or(seg)
        } else {
            seg
        };
        cur = splice(lines, cur, seg);
    }
    cur
}

/// Splits the line at the cursor and moves the cursor to the start of the new line.
///
/// If `profile` enables auto-indentation, the new line is prefixed with spaces that
/// carry forward the indentation level of the line above it.
pub fn insert_newline(lines: &mut Lines, cur: Cursor, profile: &LanguageProfile) -> Cursor {
    let cur = cur.clamp(lines);
    let indent = if profile.auto_indent {
        let line = line_of(lines, cur.line);
        let before = etc::char_slice(&line, 0, cur.col);
        profile.tab_size * indent_level(before, profile.tab_size)
    } else {
        0
    };
    break_line(lines, cur, indent)
}

/// Returns the indentation level of `line` in units of `tab_size`.
///
/// Leading spaces and tabs are counted. If any of them is a tab, the count is taken
/// as the level itself, otherwise it is divided by `tab_size`.
pub fn indent_level(line: &str, tab_size: usize) -> usize {
    let (count, tabs) = line
        .chars()
        .take_while(|&c| c == ' ' || c == '\t')
        .fold((0, false), |(count, tabs), c| (count + 1, tabs || c == '\t'));
    if tabs { count } else { count / tab_size.max(1) }
}

/// Removes the character left of the cursor, joining the line onto the previous one
/// when the cursor is at the start of a line.
pub fn delete_left(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    if cur.col > 0 {
        remove_range(lines, cur.line, cur.col - 1, cur.col);
        Cursor::new(cur.line, cur.col - 1)
    } else if cur.line > 1 {
        join_next(lines, cur.line - 1)
    } else {
        cur
    }
}

/// Removes the character at the cursor, joining the next line onto this one when the
/// cursor is at the end of a line. At the end of the document, nothing happens.
pub fn delete_right(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    if cur.col < lines.len_of(cur.line) {
        remove_range(lines, cur.line, cur.col, cur.col + 1);
        cur
    } else if cur.line < lines.line_count() {
        join_next(lines, cur.line)
    } else {
        cur
    }
}

/// Removes text from the word boundary left of the cursor up to the cursor.
pub fn delete_left_word(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    if cur.col == 0 {
        cur
    } else {
        let to = word::left_word(lines, cur);
        remove_range(lines, cur.line, to.col, cur.col);
        to
    }
}

/// Removes text from the cursor up to the word boundary right of the cursor, or to
/// the end of the line if there is none. Lines are never joined.
pub fn delete_right_word(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    let line = line_of(lines, cur.line);
    let to = word::find_right(&line, cur.col).unwrap_or_else(|| etc::char_len(&line));
    remove_range(lines, cur.line, cur.col, to);
    cur
}

/// Removes text from the start of the line up to the cursor.
pub fn delete_left_all(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    remove_range(lines, cur.line, 0, cur.col);
    Cursor::new(cur.line, 0)
}

/// Removes text from the cursor to the end of the line.
pub fn delete_right_all(lines: &mut Lines, cur: Cursor) -> Cursor {
    let cur = cur.clamp(lines);
    remove_range(lines, cur.line, cur.col, lines.len_of(cur.line));
    cur
}

/// Inserts spaces up to the next multiple of `tab_size`, which is a full `tab_size`
/// when the cursor is already aligned.
pub fn add_tab(lines: &mut Lines, cur: Cursor, tab_size: usize) -> Cursor {
    let cur = cur.clamp(lines);
    let tab_size = tab_size.max(1);
    let n = tab_size - cur.col % tab_size;
    splice(lines, cur, &" ".repeat(n))
}

fn line_of(lines: &Lines, n: usize) -> String {
    lines.line_at(n).unwrap_or_default().to_string()
}

/// Inserts `text`, which is free of `\n`, at `cur`.
fn splice(lines: &mut Lines, cur: Cursor, text: &str) -> Cursor {
    if text.len() == 0 {
        cur
    } else {
        let mut line = line_of(lines, cur.line);
        line.insert_str(etc::pos_to_offset(&line, cur.col), text);
        lines.set_line(cur.line, line);
        Cursor::new(cur.line, cur.col + etc::char_len(text))
    }
}

/// Splits the line at `cur`, prefixing the new line with `indent` spaces.
fn break_line(lines: &mut Lines, cur: Cursor, indent: usize) -> Cursor {
    let mut before = line_of(lines, cur.line);
    let after = before.split_off(etc::pos_to_offset(&before, cur.col));
    lines.set_line(cur.line, before);
    lines.insert_line(cur.line + 1, " ".repeat(indent) + &after);
    Cursor::new(cur.line + 1, indent)
}

/// Appends line `n + 1` to line `n` and returns the cursor at the join point.
fn join_next(lines: &mut Lines, n: usize) -> Cursor {
    let next = lines.remove_line(n + 1);
    let mut line = line_of(lines, n);
    let col = etc::char_len(&line);
    line.push_str(&next);
    lines.set_line(n, line);
    Cursor::new(n, col)
}

/// Removes characters in the range [`from`, `to`) of line `n`.
fn remove_range(lines: &mut Lines, n: usize, from: usize, to: usize) {
    if from < to {
        let mut line = line_of(lines, n);
        let start = etc::pos_to_offset(&line, from);
        let end = etc::pos_to_offset(&line, to);
        line.replace_range(start..end, "");
        lines.set_line(n, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(auto_indent: bool) -> LanguageProfile {
        LanguageProfile {
            auto_indent,
            tab_size: 4,
            ..LanguageProfile::default()
        }
    }

    #[test]
    fn insert_text() {
        let mut lines = Lines::from_text("held");
        let cur = insert(&mut lines, Cursor::new(1, 3), "lo worl");
        assert_eq!(lines.lines(), ["hello world"]);
        assert_eq!(cur, Cursor::new(1, 10));
    }

    #[test]
    fn insert_multibyte_text() {
        let mut lines = Lines::from_text("añb");
        let cur = insert(&mut lines, Cursor::new(1, 2), "é");
        assert_eq!(lines.lines(), ["añéb"]);
        assert_eq!(cur, Cursor::new(1, 3));
    }

    #[test]
    fn insert_multiline_text() {
        let mut lines = Lines::from_text("    ab");
        let cur = insert(&mut lines, Cursor::new(1, 5), "x\r\ny\nz");
        assert_eq!(lines.lines(), ["    ax", "y", "zb"]);
        assert_eq!(cur, Cursor::new(3, 1));
    }

    #[test]
    fn newline_without_indent() {
        let mut lines = Lines::from_text("abc\ndef");
        let cur = insert_newline(&mut lines, Cursor::new(1, 3), &profile(false));
        assert_eq!(lines.lines(), ["abc", "", "def"]);
        assert_eq!(cur, Cursor::new(2, 0));
    }

    #[test]
    fn newline_with_indent() {
        let mut lines = Lines::from_text("    x");
        let cur = insert_newline(&mut lines, Cursor::new(1, 5), &profile(true));
        assert_eq!(lines.lines(), ["    x", "    "]);
        assert_eq!(cur, Cursor::new(2, 4));
    }

    #[test]
    fn newline_splits_line() {
        let mut lines = Lines::from_text("        foo(bar)");
        let cur = insert_newline(&mut lines, Cursor::new(1, 12), &profile(true));
        assert_eq!(lines.lines(), ["        foo(", "        bar)"]);
        assert_eq!(cur, Cursor::new(2, 8));
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent_level("x", 4), 0);
        assert_eq!(indent_level("   x", 4), 0);
        assert_eq!(indent_level("        x", 4), 2);
        assert_eq!(indent_level("\t\tx", 4), 2);
        assert_eq!(indent_level(" \tx", 4), 2);
        assert_eq!(indent_level("      ", 2), 3);
    }

    #[test]
    fn newline_then_delete_left_round_trips() {
        let mut lines = Lines::from_text("hello world");
        let start = Cursor::new(1, 5);
        let cur = insert_newline(&mut lines, start, &profile(false));
        let cur = delete_left(&mut lines, cur);
        assert_eq!(lines.lines(), ["hello world"]);
        assert_eq!(cur, start);
    }

    #[test]
    fn newline_then_delete_left_keeps_indent() {
        let mut lines = Lines::from_text("    ab");
        let cur = insert_newline(&mut lines, Cursor::new(1, 5), &profile(true));
        let cur = delete_left(&mut lines, Cursor::new(cur.line, 0));
        assert_eq!(lines.lines(), ["    a    b"]);
        assert_eq!(cur, Cursor::new(1, 5));
    }

    #[test]
    fn delete_left_chars_and_lines() {
        let mut lines = Lines::from_text("ab\ncd");
        let cur = delete_left(&mut lines, Cursor::new(2, 1));
        assert_eq!(lines.lines(), ["ab", "d"]);
        assert_eq!(cur, Cursor::new(2, 0));
        let cur = delete_left(&mut lines, cur);
        assert_eq!(lines.lines(), ["abd"]);
        assert_eq!(cur, Cursor::new(1, 2));
        let cur = delete_left(&mut lines, Cursor::new(1, 0));
        assert_eq!(lines.lines(), ["abd"]);
        assert_eq!(cur, Cursor::new(1, 0));
    }

    #[test]
    fn delete_right_chars_and_lines() {
        let mut lines = Lines::from_text("ab\ncd");
        let cur = delete_right(&mut lines, Cursor::new(1, 1));
        assert_eq!(lines.lines(), ["a", "cd"]);
        assert_eq!(cur, Cursor::new(1, 1));
        let cur = delete_right(&mut lines, cur);
        assert_eq!(lines.lines(), ["acd"]);
        assert_eq!(cur, Cursor::new(1, 1));
        let cur = delete_right(&mut lines, Cursor::new(1, 3));
        assert_eq!(lines.lines(), ["acd"]);
        assert_eq!(cur, Cursor::new(1, 3));
    }

    #[test]
    fn delete_words() {
        let mut lines = Lines::from_text("one two three");
        let cur = delete_left_word(&mut lines, Cursor::new(1, 13));
        assert_eq!(lines.lines(), ["one two "]);
        assert_eq!(cur, Cursor::new(1, 8));

        let mut lines = Lines::from_text("one two three");
        let cur = delete_right_word(&mut lines, Cursor::new(1, 1));
        assert_eq!(lines.lines(), ["otwo three"]);
        assert_eq!(cur, Cursor::new(1, 1));

        let mut lines = Lines::from_text("one two");
        let cur = delete_right_word(&mut lines, Cursor::new(1, 5));
        assert_eq!(lines.lines(), ["one t"]);
        assert_eq!(cur, Cursor::new(1, 5));

        let mut lines = Lines::from_text("one two\nthree");
        let cur = delete_right_word(&mut lines, Cursor::new(1, 5));
        assert_eq!(lines.lines(), ["one t", "three"]);
        assert_eq!(cur, Cursor::new(1, 5));

        let mut lines = Lines::from_text("one");
        let cur = delete_left_word(&mut lines, Cursor::new(1, 0));
        assert_eq!(lines.lines(), ["one"]);
        assert_eq!(cur, Cursor::new(1, 0));
    }

    #[test]
    fn delete_to_line_boundaries() {
        let mut lines = Lines::from_text("abc\nhello world\nxyz");
        let cur = delete_left_all(&mut lines, Cursor::new(2, 6));
        assert_eq!(lines.lines(), ["abc", "world", "xyz"]);
        assert_eq!(cur, Cursor::new(2, 0));
        let cur = delete_right_all(&mut lines, Cursor::new(2, 2));
        assert_eq!(lines.lines(), ["abc", "wo", "xyz"]);
        assert_eq!(cur, Cursor::new(2, 2));
    }

    #[test]
    fn tabs_align_to_stops() {
        let mut lines = Lines::new();
        let cur = add_tab(&mut lines, Cursor::TOP, 4);
        assert_eq!(cur.col, 4);
        let cur = insert(&mut lines, cur, "ab");
        let cur = add_tab(&mut lines, cur, 4);
        assert_eq!(cur.col, 8);
        assert_eq!(lines.lines(), ["    ab  "]);
        for _ in 0..5 {
            let bottom = Cursor::bottom(&lines);
            let cur = add_tab(&mut lines, bottom, 3);
            assert_eq!(cur.col % 3, 0);
        }
    }

    #[test]
    fn cursor_always_valid() {
        // Linear congruential sequence for a repeatable mix of operations.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 33) as usize
        };
        let profile = profile(true);
        let mut lines = Lines::new();
        let mut cur = Cursor::TOP;
        for _ in 0..2_000 {
            cur = match next() % 11 {
                0 | 1 => insert(&mut lines, cur, "ab c"),
                2 => insert_newline(&mut lines, cur, &profile),
                3 => delete_left(&mut lines, cur),
                4 => delete_right(&mut lines, cur),
                5 => delete_left_word(&mut lines, cur),
                6 => delete_right_word(&mut lines, cur),
                7 => delete_left_all(&mut lines, cur),
                8 => delete_right_all(&mut lines, cur),
                9 => add_tab(&mut lines, cur, profile.tab_size),
                _ => {
                    let line = next() % lines.line_count() + 1;
                    Cursor::new(line, next() % (lines.len_of(line) + 1))
                }
            };
            assert!(cur.is_valid(&lines), "{cur:?} invalid");
            assert!(lines.line_count() >= 1);
            assert!(lines.lines().iter().all(|l| !l.contains('\n')));
        }
    }
}
