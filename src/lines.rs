//! Line store.
//!
//! A document is held as an ordered sequence of lines, none of which contain `\n`.
//! The canonical text of a document is the join of its lines with `\n`, followed
//! by a final `\n` only if the source text had one, which allows a document to be
//! read and written without altering its trailing newline.
//!
//! Edits split and join lines in a [`Vec`], so the cost of inserting or removing a
//! line is proportional to the number of lines that follow it.

use crate::error::{Error, Result};
use crate::etc;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lines {
    lines: Vec<String>,
    eol: bool,

    /// Incremented on every change to `lines`.
    revision: u64,
}

impl Lines {
    /// Creates a store containing a single empty line.
    pub fn new() -> Lines {
        Lines {
            lines: vec![String::new()],
            eol: false,
            revision: 0,
        }
    }

    /// Creates a store by splitting `text` on `\n`.
    ///
    /// A trailing `\n` does not produce an extra empty line, but is remembered so
    /// that [`to_text`](Self::to_text) reproduces it.
    pub fn from_text(text: &str) -> Lines {
        let (body, eol) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };
        Lines {
            lines: body.split('\n').map(|line| line.to_string()).collect(),
            eol,
            revision: 0,
        }
    }

    /// Replaces the entire document with `text`, as though read by
    /// [`from_text`](Self::from_text).
    pub fn set_text(&mut self, text: &str) {
        let Lines { lines, eol, .. } = Lines::from_text(text);
        self.lines = lines;
        self.eol = eol;
        self.revision += 1;
    }

    /// Returns the canonical text of this document.
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.eol {
            text.push('\n');
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns a number that changes whenever the document changes, which allows
    /// callers to detect modifications without comparing text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns the `1`-based line `n`.
    pub fn line_at(&self, n: usize) -> Result<&str> {
        if n >= 1 && n <= self.lines.len() {
            Ok(&self.lines[n - 1])
        } else {
            Err(Error::out_of_range(n, self.lines.len()))
        }
    }

    /// Returns the length in characters of line `n`, or `0` if `n` is out of range.
    pub fn len_of(&self, n: usize) -> usize {
        self.line_at(n).map(etc::char_len).unwrap_or(0)
    }

    /// Replaces all lines with `lines`, splitting any that contain `\n`.
    ///
    /// An empty `lines` results in a single empty line.
    pub fn replace_all<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut new_lines = Vec::new();
        for line in lines {
            new_lines.extend(line.as_ref().split('\n').map(|l| l.to_string()));
        }
        if new_lines.len() == 0 {
            new_lines.push(String::new());
        }
        self.lines = new_lines;
        self.revision += 1;
    }

    /// Replaces the text of line `n`, which is presumed to be in range and free of
    /// `\n`.
    pub(crate) fn set_line(&mut self, n: usize, text: String) {
        debug_assert!(!text.contains('\n'));
        self.lines[n - 1] = text;
        self.revision += 1;
    }

    /// Inserts `text` so that it becomes line `n`.
    pub(crate) fn insert_line(&mut self, n: usize, text: String) {
        debug_assert!(!text.contains('\n'));
        self.lines.insert(n - 1, text);
        self.revision += 1;
    }

    /// Removes and returns line `n`, unless it is the only line, in which case the
    /// line is emptied.
    pub(crate) fn remove_line(&mut self, n: usize) -> String {
        self.revision += 1;
        if self.lines.len() > 1 {
            self.lines.remove(n - 1)
        } else {
            std::mem::take(&mut self.lines[0])
        }
    }
}

impl Default for Lines {
    fn default() -> Lines {
        Lines::new()
    }
}
