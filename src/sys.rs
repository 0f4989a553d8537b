//! # System functions
//!
//! A collection of functions that make common system-level operations easier to
//! perform. In most cases, these are convenience wrappers that reduce verbosity
//! and take an opinionated stance on how to interpret errors.
use std::env;
use std::path::{Path, PathBuf};

pub trait AsString {
    fn as_string(&self) -> String;
}

impl AsString for PathBuf {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

impl AsString for Path {
    fn as_string(&self) -> String {
        self.display().to_string()
    }
}

/// Returns the `HOME` path as derived from the environment, or [`this_dir`] if an
/// error occurred while getting the value of `HOME`.
pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(this_dir)
}

/// Returns the path for `"."`.
pub fn this_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Returns the base directory of `path`.
///
/// If `path` is either empty or a single component value, such as `"foo"`, the base
/// directory will be [`this_dir`].
pub fn base_dir<P: AsRef<Path>>(path: P) -> PathBuf {
    match path.as_ref().parent() {
        Some(parent) if parent != Path::new("") => parent.to_path_buf(),
        _ => this_dir(),
    }
}

/// Returns the final component of `path` as a string, or the whole of `path` if it
/// has no final component.
pub fn file_name<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.as_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_dir_of_paths() {
        assert_eq!(base_dir("foo"), this_dir());
        assert_eq!(base_dir(""), this_dir());
        assert_eq!(base_dir("a/b/c.txt"), PathBuf::from("a/b"));
        assert_eq!(base_dir("/c.txt"), PathBuf::from("/"));
    }

    #[test]
    fn file_name_of_paths() {
        assert_eq!(file_name("a/b/main.rs"), "main.rs");
        assert_eq!(file_name("main.rs"), "main.rs");
    }
}
