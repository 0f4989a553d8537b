//! Editing operations.
//!
//! A collection of functions associated with canonical names of editing operations.
//! These functions serve as the glue between a name given by the host, such as an
//! argument to `--exec`, and the corresponding action on a [`Session`].
//!
//! In addition to the names in [`OP_MAPPINGS`], the pseudo-operation `insert:TEXT`
//! inserts `TEXT` literally, where `\n` and `\t` are recognized as escapes.

use crate::error::{Error, Result};
use crate::session::{Notification, Session};
use indexmap::IndexMap;
use std::sync::OnceLock;

/// Function signature of an editing operation.
pub type OpFn = fn(&mut Session) -> Result<Vec<Notification>>;

/// Map of canonical names to operations.
pub type OpMap = IndexMap<&'static str, OpFn>;

/// Prefix of the pseudo-operation that inserts literal text.
pub const INSERT_PREFIX: &str = "insert:";

/// Canonical names of operations, their functions, and descriptions.
pub const OP_MAPPINGS: [(&str, OpFn, &str); 22] = [
    ("cursor-left", cursor_left, "move cursor left"),
    ("cursor-right", cursor_right, "move cursor right"),
    ("cursor-up", cursor_up, "move cursor up"),
    ("cursor-down", cursor_down, "move cursor down"),
    ("home", home, "move cursor to start of line"),
    ("end", end, "move cursor to end of line"),
    ("top", top, "move cursor to top of document"),
    ("bottom", bottom, "move cursor to bottom of document"),
    ("cursor-left-word", cursor_left_word, "move cursor to previous word"),
    ("cursor-right-word", cursor_right_word, "move cursor to next word"),
    ("insert-line", insert_line, "insert line break with indentation"),
    ("delete-left", delete_left, "delete character left of cursor"),
    ("delete-right", delete_right, "delete character at cursor"),
    ("delete-left-word", delete_left_word, "delete to start of word"),
    ("delete-right-word", delete_right_word, "delete to start of next word"),
    ("delete-left-all", delete_left_all, "delete to start of line"),
    ("delete-right-all", delete_right_all, "delete to end of line"),
    ("add-tab", add_tab, "insert spaces to next tab stop"),
    ("save-file", save_file, "format if enabled and save document"),
    ("format-file", format_file, "format document"),
    ("copy", copy, "copy document to clipboard"),
    ("paste", paste, "insert clipboard text at cursor"),
];

/// Returns the mapping of canonical names to operations.
pub fn op_map() -> &'static OpMap {
    static OP_MAP: OnceLock<OpMap> = OnceLock::new();
    OP_MAP.get_or_init(|| {
        OP_MAPPINGS
            .iter()
            .map(|(op, op_fn, _)| (*op, *op_fn))
            .collect()
    })
}

/// Applies the operation named `op` to `session`.
pub fn apply(session: &mut Session, op: &str) -> Result<Vec<Notification>> {
    if let Some(text) = op.strip_prefix(INSERT_PREFIX) {
        Ok(session.insert(&unescape(text)))
    } else if let Some(op_fn) = op_map().get(op) {
        op_fn(session)
    } else {
        Err(Error::unknown_op(op))
    }
}

/// Applies each of the comma-separated operations in `ops` to `session` in order,
/// stopping at the first error.
pub fn apply_all(session: &mut Session, ops: &str) -> Result<Vec<Notification>> {
    let mut notes = Vec::new();
    for op in ops.split(',').map(|op| op.trim()).filter(|op| op.len() > 0) {
        log::debug!("applying operation: {op}");
        notes.extend(apply(session, op)?);
    }
    Ok(notes)
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(c) => out.push(c),
                None => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    out
}

/// cursor-left
fn cursor_left(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_left())
}

/// cursor-right
fn cursor_right(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_right())
}

/// cursor-up
fn cursor_up(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_up())
}

/// cursor-down
fn cursor_down(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_down())
}

/// home
fn home(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.home())
}

/// end
fn end(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.end())
}

/// top
fn top(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.top())
}

/// bottom
fn bottom(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.bottom())
}

/// cursor-left-word
fn cursor_left_word(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_left_word())
}

/// cursor-right-word
fn cursor_right_word(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.cursor_right_word())
}

/// insert-line
fn insert_line(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.insert_newline())
}

/// delete-left
fn delete_left(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_left())
}

/// delete-right
fn delete_right(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_right())
}

/// delete-left-word
fn delete_left_word(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_left_word())
}

/// delete-right-word
fn delete_right_word(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_right_word())
}

/// delete-left-all
fn delete_left_all(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_left_all())
}

/// delete-right-all
fn delete_right_all(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.delete_right_all())
}

/// add-tab
fn add_tab(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.add_tab())
}

/// save-file
fn save_file(session: &mut Session) -> Result<Vec<Notification>> {
    session.save()
}

/// format-file
fn format_file(session: &mut Session) -> Result<Vec<Notification>> {
    session.format()
}

/// copy
fn copy(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.copy())
}

/// paste
fn paste(session: &mut Session) -> Result<Vec<Notification>> {
    Ok(session.paste())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Clipboard, Scope};
    use crate::config::Configuration;
    use crate::cursor::Cursor;

    fn session() -> Session {
        Session::new(Configuration::default().to_ref()).with_clipboard(Clipboard::new(Scope::Local))
    }

    #[test]
    fn names_are_unique() {
        assert_eq!(op_map().len(), OP_MAPPINGS.len());
    }

    #[test]
    fn apply_named_operations() {
        let mut session = session();
        apply_all(&mut session, "insert:hello world,home,cursor-right-word,delete-right-all")
            .unwrap();
        assert_eq!(session.text(), "hello ");
        assert_eq!(session.cursor(), Cursor::new(1, 6));
    }

    #[test]
    fn insert_with_escapes() {
        let mut session = session();
        apply(&mut session, r"insert:a\tb\nc\\").unwrap();
        assert_eq!(session.lines().lines(), ["a\tb", "c\\"]);
    }

    #[test]
    fn unknown_operation() {
        let mut session = session();
        assert!(matches!(
            apply_all(&mut session, "top,bogus,insert:x"),
            Err(Error::UnknownOp { .. })
        ));
        assert_eq!(session.text(), "");
    }

    #[test]
    fn copy_then_paste() {
        let mut session = session();
        apply_all(&mut session, "insert:ab,copy,paste").unwrap();
        assert_eq!(session.text(), "abab");
    }
}
