//! I/O operations with documents.

use crate::error::{Error, Result};
use crate::lines::Lines;
use crate::sys::{self, AsString};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

// Suggested capacity of internal buffers for writers.
const BUFFER_SIZE: usize = 65_536;

/// Reads the file at `path` as UTF-8 text.
///
/// A file that is not valid UTF-8 is rejected with [`Error::Decode`] rather than
/// being opened as an empty or lossy document.
pub fn read_file<P>(path: P) -> Result<Lines>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(&path.as_string(), e))?;
    let text = String::from_utf8(bytes).map_err(|e| Error::decode(&path.as_string(), &e))?;
    Ok(Lines::from_text(&text))
}

/// Writes `lines` to the file at `path` and returns the number of bytes written.
///
/// The text is first written to a temporary file in the same directory, which then
/// replaces `path`, so a failed write never leaves a partially written file behind.
pub fn write_file<P>(path: P, lines: &Lines) -> Result<usize>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let tmp_path = temp_path(path);
    let text = lines.to_text();

    let written = File::create(&tmp_path).and_then(|file| {
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
        writer.write_all(text.as_bytes())?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()
    });

    match written.and_then(|_| fs::rename(&tmp_path, path)) {
        Ok(_) => Ok(text.len()),
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(Error::io(&path.as_string(), e))
        }
    }
}

/// Returns the path of a hidden sibling of `path` used for staging writes.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    sys::base_dir(path).join(format!(".{name}.{}.tmp", std::process::id()))
}
