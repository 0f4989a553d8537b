//! Editing session.
//!
//! A [`Session`] owns a single open document together with its cursor and viewport.
//! Every operation runs to completion and returns the list of [`Notification`]s the
//! host should dispatch, such as updating a status line. Nothing is announced
//! implicitly.

use crate::clip::Clipboard;
use crate::config::{ConfigurationRef, LanguageProfile};
use crate::cursor::Cursor;
use crate::edit;
use crate::error::Result;
use crate::format::{self, ProcessRunner, Runner};
use crate::io;
use crate::lines::Lines;
use crate::render::RenderWindow;
use crate::sys::{self, AsString};
use crate::viewport::{Extent, Scroll, Viewport};
use crate::word;
use std::path::{Path, PathBuf};

/// Changes that a host may want to react to.
///
/// A change to the document is always reported as [`BufferChanged`](Self::BufferChanged)
/// followed by [`CursorChanged`](Self::CursorChanged).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    /// A file was opened.
    FileChanged { path: PathBuf },

    /// The document changed and now contains `text`.
    BufferChanged { text: String },

    /// The cursor moved to `line` and `col`.
    CursorChanged { line: usize, col: usize },

    /// The document was written to `path`.
    Saved { path: PathBuf, bytes: usize },

    /// Formatting failed and the document was left unchanged.
    FormatFailed { cause: String },

    /// Something went wrong that did not prevent the operation from completing.
    Warning { message: String },
}

pub struct Session {
    config: ConfigurationRef,

    /// An optional path if the document is associated with a file.
    path: Option<PathBuf>,

    /// Profile resolved from the file name of `path`.
    profile: LanguageProfile,

    lines: Lines,
    cur: Cursor,

    /// An optional column to which the cursor should *snap* when moving up and down.
    snap_col: Option<usize>,

    view: Viewport,

    /// Number of visible rows, supplied by the host.
    rows: usize,

    /// Number of visible columns if the host overrides the profile.
    code_width: Option<usize>,

    /// Revision of `lines` when it was last read or written.
    saved_rev: u64,

    clipboard: Clipboard,
    runner: Box<dyn Runner>,
}

impl Session {
    /// Number of rows assumed until the host calls [`resize`](Self::resize).
    const DEFAULT_ROWS: usize = 24;

    /// Creates a session with an empty document that is not associated with a file.
    pub fn new(config: ConfigurationRef) -> Session {
        let runner = ProcessRunner::new(config.settings.formatter_timeout);
        let profile = config.default_profile.clone();
        Session {
            config,
            path: None,
            profile,
            lines: Lines::new(),
            cur: Cursor::TOP,
            snap_col: None,
            view: Viewport::ORIGIN,
            rows: Self::DEFAULT_ROWS,
            code_width: None,
            saved_rev: 0,
            clipboard: Clipboard::default(),
            runner: Box::new(runner),
        }
    }

    /// Replaces the formatter runner.
    pub fn with_runner(mut self, runner: Box<dyn Runner>) -> Session {
        self.runner = runner;
        self
    }

    /// Replaces the clipboard.
    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Session {
        self.clipboard = clipboard;
        self
    }

    /// Opens the file at `path`, replacing the current document.
    ///
    /// If the file cannot be read or decoded, the error is returned and the current
    /// document remains open.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<Notification>> {
        let path = path.as_ref();
        let lines = io::read_file(path)?;
        log::debug!(
            "opened {}: {} lines",
            path.as_string(),
            lines.line_count()
        );

        self.profile = self.config.profile(&sys::file_name(path)).clone();
        self.path = Some(path.to_path_buf());
        self.saved_rev = lines.revision();
        self.lines = lines;
        self.cur = Cursor::TOP;
        self.snap_col = None;
        self.view = Viewport::ORIGIN;

        Ok(vec![
            Notification::FileChanged {
                path: path.to_path_buf(),
            },
            self.buffer_changed(),
            self.cursor_changed(),
        ])
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.to_text()
    }

    pub fn cursor(&self) -> Cursor {
        self.cur
    }

    pub fn viewport(&self) -> Viewport {
        self.view
    }

    /// Returns `true` if the document changed since it was opened or last saved.
    pub fn is_modified(&self) -> bool {
        self.lines.revision() != self.saved_rev
    }

    /// Sets the number of visible rows and optionally overrides the number of visible
    /// columns, then brings the cursor back into view.
    pub fn resize(&mut self, rows: usize, code_width: Option<usize>) {
        self.rows = rows;
        self.code_width = code_width;
        self.view.reconcile(self.cur, self.extent(), Scroll::Step);
    }

    /// Returns the visible area of the document.
    pub fn extent(&self) -> Extent {
        Extent {
            height: self.rows,
            width: self.code_width.unwrap_or(self.profile.column_width),
            scrolls: self.profile.scrolls(),
        }
    }

    /// Returns the visible slice of the document and its overlays.
    pub fn render(&self) -> RenderWindow<'_> {
        let extent = self.extent();
        RenderWindow::extract(
            &self.lines,
            self.view,
            self.cur,
            extent.width,
            extent.height,
            &self.profile,
        )
    }

    pub fn cursor_left(&mut self) -> Vec<Notification> {
        let cur = self.cur.left(&self.lines);
        self.move_to(cur, Scroll::Step)
    }

    pub fn cursor_right(&mut self) -> Vec<Notification> {
        let cur = self.cur.right(&self.lines);
        self.move_to(cur, Scroll::Step)
    }

    pub fn cursor_up(&mut self) -> Vec<Notification> {
        let snap_col = self.snap_col.take().unwrap_or(self.cur.col);
        let cur = self.cur.up(&self.lines, snap_col);
        let notes = self.move_to(cur, Scroll::Jump);
        self.snap_col = Some(snap_col);
        notes
    }

    pub fn cursor_down(&mut self) -> Vec<Notification> {
        let snap_col = self.snap_col.take().unwrap_or(self.cur.col);
        let cur = self.cur.down(&self.lines, snap_col);
        let notes = self.move_to(cur, Scroll::Jump);
        self.snap_col = Some(snap_col);
        notes
    }

    pub fn home(&mut self) -> Vec<Notification> {
        let cur = self.cur.home(&self.lines);
        self.move_to(cur, Scroll::Jump)
    }

    pub fn end(&mut self) -> Vec<Notification> {
        let cur = self.cur.end(&self.lines);
        self.move_to(cur, Scroll::Jump)
    }

    pub fn top(&mut self) -> Vec<Notification> {
        self.move_to(Cursor::TOP, Scroll::Jump)
    }

    pub fn bottom(&mut self) -> Vec<Notification> {
        let cur = Cursor::bottom(&self.lines);
        self.move_to(cur, Scroll::Jump)
    }

    pub fn cursor_left_word(&mut self) -> Vec<Notification> {
        let cur = word::left_word(&self.lines, self.cur);
        self.move_to(cur, Scroll::Step)
    }

    pub fn cursor_right_word(&mut self) -> Vec<Notification> {
        let cur = word::right_word(&self.lines, self.cur);
        self.move_to(cur, Scroll::Step)
    }

    /// Moves the cursor to `line` and `col`, clamped to the document.
    pub fn goto(&mut self, line: usize, col: usize) -> Vec<Notification> {
        let cur = Cursor::new(line, col).clamp(&self.lines);
        self.move_to(cur, Scroll::Jump)
    }

    /// Inserts `text` at the cursor, where `\n` breaks lines without indentation.
    pub fn insert(&mut self, text: &str) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::insert(lines, cur, text))
    }

    pub fn insert_newline(&mut self) -> Vec<Notification> {
        self.edit(edit::insert_newline)
    }

    pub fn delete_left(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_left(lines, cur))
    }

    pub fn delete_right(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_right(lines, cur))
    }

    pub fn delete_left_word(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_left_word(lines, cur))
    }

    pub fn delete_right_word(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_right_word(lines, cur))
    }

    pub fn delete_left_all(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_left_all(lines, cur))
    }

    pub fn delete_right_all(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, _| edit::delete_right_all(lines, cur))
    }

    pub fn add_tab(&mut self) -> Vec<Notification> {
        self.edit(|lines, cur, profile| edit::add_tab(lines, cur, profile.tab_size))
    }

    /// Copies the whole document to the clipboard.
    pub fn copy(&mut self) -> Vec<Notification> {
        match self.clipboard.copy(&self.lines.to_text()) {
            Ok(_) => vec![],
            Err(e) => {
                log::warn!("{e}");
                vec![Notification::Warning {
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Inserts the text on the clipboard at the cursor.
    pub fn paste(&mut self) -> Vec<Notification> {
        match self.clipboard.paste() {
            Ok(text) => self.insert(&text),
            Err(e) => {
                log::warn!("{e}");
                vec![Notification::Warning {
                    message: e.to_string(),
                }]
            }
        }
    }

    /// Replaces the document with the output of the profile's formatter.
    ///
    /// If no formatter is configured, a warning is returned. If the formatter fails,
    /// the error is returned and the document is left unchanged.
    pub fn format(&mut self) -> Result<Vec<Notification>> {
        match self.profile.formatter {
            Some(ref formatter) => {
                let text = format::format(self.runner.as_ref(), formatter, &self.lines.to_text())?;
                Ok(self.replace_text(&text))
            }
            None => Ok(vec![Notification::Warning {
                message: format!("{}: no formatter configured", self.profile.name),
            }]),
        }
    }

    /// Writes the document to its file, formatting it first if formatting on save is
    /// enabled and the profile has a formatter.
    ///
    /// A formatting failure does not prevent the unformatted document from being
    /// written, but is reported as [`Notification::FormatFailed`]. Errors writing the
    /// file are returned.
    pub fn save(&mut self) -> Result<Vec<Notification>> {
        let Some(path) = self.path.clone() else {
            return Ok(vec![Notification::Warning {
                message: "no file associated with this document".to_string(),
            }]);
        };

        let mut notes = Vec::new();
        if self.config.settings.format_on_save && self.profile.formatter.is_some() {
            match self.format() {
                Ok(format_notes) => notes.extend(format_notes),
                Err(e) => {
                    log::warn!("{e}");
                    notes.push(Notification::FormatFailed {
                        cause: e.to_string(),
                    });
                }
            }
        }

        let bytes = io::write_file(&path, &self.lines)?;
        log::debug!("saved {}: {bytes} bytes", path.as_string());
        self.saved_rev = self.lines.revision();
        notes.push(Notification::Saved { path, bytes });
        Ok(notes)
    }

    /// Applies an edit and reconciles the viewport with the resulting cursor.
    fn edit<F>(&mut self, f: F) -> Vec<Notification>
    where
        F: FnOnce(&mut Lines, Cursor, &LanguageProfile) -> Cursor,
    {
        let rev = self.lines.revision();
        let cur = f(&mut self.lines, self.cur, &self.profile);
        let notes = self.move_to(cur, Scroll::Step);
        if self.lines.revision() != rev {
            self.changed()
        } else {
            notes
        }
    }

    fn move_to(&mut self, cur: Cursor, scroll: Scroll) -> Vec<Notification> {
        let changed = cur != self.cur;
        self.cur = cur;
        self.snap_col = None;
        self.view.reconcile(self.cur, self.extent(), scroll);
        if changed {
            vec![self.cursor_changed()]
        } else {
            vec![]
        }
    }

    /// Replaces the document with `text`, keeping the cursor as close as possible to
    /// where it was.
    fn replace_text(&mut self, text: &str) -> Vec<Notification> {
        if text == self.lines.to_text() {
            vec![]
        } else {
            self.lines.set_text(text);
            let cur = self.cur.clamp(&self.lines);
            self.move_to(cur, Scroll::Jump);
            self.changed()
        }
    }

    /// Notifications sent after the document changes, which always carry the cursor
    /// even if it did not move.
    fn changed(&self) -> Vec<Notification> {
        vec![self.buffer_changed(), self.cursor_changed()]
    }

    fn buffer_changed(&self) -> Notification {
        Notification::BufferChanged {
            text: self.lines.to_text(),
        }
    }

    fn cursor_changed(&self) -> Notification {
        Notification::CursorChanged {
            line: self.cur.line,
            col: self.cur.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Scope;
    use crate::config::{Configuration, Formatter};
    use crate::error::Error;
    use crate::format::Output;
    use std::fs;
    use std::rc::Rc;

    /// A runner that answers every request with the same output.
    struct FixedRunner(Output);

    impl Runner for FixedRunner {
        fn run(&self, _: &Formatter, _: &str) -> Result<Output> {
            Ok(self.0.clone())
        }
    }

    const CONFIG: &str = r#"
        [default]
        column-width = 10

        [languages.plain]
        extensions = ["txt"]
        auto-indent = false

        [languages.shout]
        extensions = ["up"]
        formatter = { command = "sh", args = ["-c", "tr a-z A-Z"] }

        [languages.broken]
        extensions = ["bad"]
        formatter = { command = "sh", args = ["-c", "cat >/dev/null; echo 'parse error' >&2"] }
    "#;

    fn config() -> ConfigurationRef {
        Configuration::parse("test", CONFIG).unwrap().to_ref()
    }

    fn session() -> Session {
        Session::new(config()).with_clipboard(Clipboard::new(Scope::Local))
    }

    fn open(dir: &Path, name: &str, text: &str) -> Session {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        let mut session = session();
        session.open(&path).unwrap();
        session
    }

    #[test]
    fn open_resets_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(dir.path(), "a.txt", "abc\ndef\n");
        session.end();
        session.cursor_down();
        assert_eq!(session.cursor(), Cursor::new(2, 3));

        let path = dir.path().join("b.txt");
        fs::write(&path, "xyz").unwrap();
        let notes = session.open(&path).unwrap();
        assert_eq!(
            notes,
            vec![
                Notification::FileChanged { path: path.clone() },
                Notification::BufferChanged {
                    text: "xyz".to_string()
                },
                Notification::CursorChanged { line: 1, col: 0 },
            ]
        );
        assert_eq!(session.cursor(), Cursor::TOP);
        assert_eq!(session.viewport(), Viewport::ORIGIN);
        assert_eq!(session.profile().name, "plain");
        assert!(!session.is_modified());
    }

    #[test]
    fn failed_open_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(dir.path(), "a.txt", "keep me");
        let bad = dir.path().join("bad.bin");
        fs::write(&bad, [0xc3u8, 0x28]).unwrap();
        assert!(matches!(session.open(&bad), Err(Error::Decode { .. })));
        assert_eq!(session.text(), "keep me");
        assert_eq!(session.path(), Some(dir.path().join("a.txt").as_path()));
    }

    #[test]
    fn edits_emit_notifications() {
        let mut session = session();
        let notes = session.insert("hi");
        assert_eq!(
            notes,
            vec![
                Notification::BufferChanged {
                    text: "hi".to_string()
                },
                Notification::CursorChanged { line: 1, col: 2 },
            ]
        );
        assert!(session.is_modified());

        session.home();
        assert_eq!(session.delete_left(), vec![]);
        assert_eq!(
            session.delete_right(),
            vec![
                Notification::BufferChanged {
                    text: "i".to_string()
                },
                Notification::CursorChanged { line: 1, col: 0 },
            ]
        );
    }

    #[test]
    fn vertical_moves_remember_column() {
        let mut session = session();
        session.insert("long line here\nab\nanother long line");
        session.top();
        session.goto(1, 9);
        session.cursor_down();
        assert_eq!(session.cursor(), Cursor::new(2, 2));
        session.cursor_down();
        assert_eq!(session.cursor(), Cursor::new(3, 9));
        session.cursor_left();
        session.cursor_up();
        assert_eq!(session.cursor(), Cursor::new(2, 2));
    }

    #[test]
    fn end_scrolls_horizontally() {
        let mut session = session();
        session.insert("0123456789abcdefghij\nshort");
        session.top();
        assert_eq!(session.viewport().left_offset, 0);
        session.end();
        assert_eq!(session.viewport().left_offset, 20 - 10);
        session.cursor_down();
        assert_eq!(session.cursor(), Cursor::new(2, 5));
        assert_eq!(session.viewport().left_offset, 0);
        session.home();
        assert_eq!(session.viewport().left_offset, 0);
    }

    #[test]
    fn typing_scrolls_one_column_at_a_time() {
        let mut session = session();
        for _ in 0..10 {
            session.insert("x");
        }
        assert_eq!(session.viewport().left_offset, 1);
        session.insert("x");
        assert_eq!(session.viewport().left_offset, 2);
        let win = session.render();
        assert_eq!(win.lines, vec!["xxxxxxxxx"]);
    }

    #[test]
    fn viewport_follows_cursor_down() {
        let mut session = session();
        session.resize(5, None);
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        session.insert(&text);
        assert_eq!(session.cursor().line, 20);
        assert_eq!(session.viewport().top_offset, 16);
        session.top();
        assert_eq!(session.viewport().top_offset, 0);
        for _ in 0..4 {
            session.cursor_down();
        }
        assert_eq!(session.viewport().top_offset, 1);
        let win = session.render();
        assert_eq!(win.first_line, 2);
        assert_eq!(win.lines, vec!["2", "3", "4", "5", "6"]);
        assert_eq!(win.current_line.line, 5);
    }

    #[test]
    fn newline_uses_profile() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(dir.path(), "a.rs", "    x");
        session.end();
        session.insert_newline();
        assert_eq!(session.lines().lines(), ["    x", "    "]);
        assert_eq!(session.cursor(), Cursor::new(2, 4));

        let mut session = open(dir.path(), "a.txt", "    x");
        session.end();
        session.insert_newline();
        assert_eq!(session.lines().lines(), ["    x", ""]);
        assert_eq!(session.cursor(), Cursor::new(2, 0));
    }

    #[test]
    fn copy_and_paste() {
        let mut session = session();
        session.insert("ab");
        assert_eq!(session.copy(), vec![]);
        session.paste();
        assert_eq!(session.text(), "abab");
        assert_eq!(session.cursor(), Cursor::new(1, 4));
    }

    #[test]
    fn unavailable_clipboard_warns() {
        let mut session =
            Session::new(config()).with_clipboard(Clipboard::new(Scope::Unavailable));
        session.insert("keep");
        let cur = session.cursor();
        let rev = session.lines().revision();

        for notes in [session.copy(), session.paste()] {
            assert!(matches!(
                notes.as_slice(),
                [Notification::Warning { message }] if message.contains("clipboard unavailable")
            ));
        }
        assert_eq!(session.text(), "keep");
        assert_eq!(session.cursor(), cur);
        assert_eq!(session.lines().revision(), rev);
        assert!(session.is_modified());
    }

    #[test]
    fn save_with_formatter() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(dir.path(), "a.up", "hello\n");
        session.end();
        let notes = session.save().unwrap();
        let path = dir.path().join("a.up");
        assert_eq!(
            notes,
            vec![
                Notification::BufferChanged {
                    text: "HELLO\n".to_string()
                },
                Notification::CursorChanged { line: 1, col: 5 },
                Notification::Saved {
                    path: path.clone(),
                    bytes: 6
                },
            ]
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "HELLO\n");
        assert_eq!(session.cursor(), Cursor::new(1, 5));
        assert!(!session.is_modified());
    }

    #[test]
    fn save_with_failing_formatter_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open(dir.path(), "a.bad", "plain\n");
        session.insert("my ");
        let notes = session.save().unwrap();
        assert!(matches!(
            notes.as_slice(),
            [Notification::FormatFailed { cause }, Notification::Saved { .. }]
                if cause.contains("parse error")
        ));
        assert_eq!(session.text(), "my plain\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("a.bad")).unwrap(),
            "my plain\n"
        );
    }

    #[test]
    fn save_without_format_on_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.up");
        fs::write(&path, "quiet").unwrap();
        let mut config = Configuration::parse("test", CONFIG).unwrap();
        config.settings.format_on_save = false;
        let mut session = Session::new(Rc::new(config));
        session.open(&path).unwrap();
        session.save().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "quiet");
    }

    #[test]
    fn format_with_stub_runner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.up");
        fs::write(&path, "one\ntwo\nthree").unwrap();
        let runner = FixedRunner(Output {
            stdout: "one\n".to_string(),
            stderr: String::new(),
        });
        let mut session = session().with_runner(Box::new(runner));
        session.open(&path).unwrap();
        session.bottom();
        session.format().unwrap();
        assert_eq!(session.lines().lines(), ["one"]);
        assert_eq!(session.cursor(), Cursor::new(1, 3));
    }

    #[test]
    fn format_without_formatter_warns() {
        let mut session = session();
        assert!(matches!(
            session.format().unwrap().as_slice(),
            [Notification::Warning { .. }]
        ));
    }

    #[test]
    fn save_without_path_warns() {
        let mut session = session();
        assert!(matches!(
            session.save().unwrap().as_slice(),
            [Notification::Warning { .. }]
        ));
    }
}
