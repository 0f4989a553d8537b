//! A clipboard that manages access to both local and global instances.
//!
//! A _local_ clipboard lives only as long as the editing session, whereas a _global_
//! clipboard is provided by the OS. Unlike the local clipboard, the global one may
//! be unavailable, in which case [`Error::ClipboardUnavailable`] is returned so the
//! caller can report it and carry on.

use crate::error::{Error, Result};
use arboard::Clipboard as GlobalClipboard;

#[derive(Debug)]
pub struct Clipboard {
    local: Option<String>,
    scope: Scope,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scope {
    Local,
    Global,

    /// Behaves like a platform without a clipboard.
    #[cfg(test)]
    Unavailable,
}

impl Clipboard {
    pub fn new(scope: Scope) -> Clipboard {
        Clipboard { local: None, scope }
    }

    /// Puts `text` on the clipboard.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        match self.scope {
            Scope::Local => {
                self.local = Some(text.to_string());
                Ok(())
            }
            Scope::Global => {
                // OS-specific clipboards behave in different ways, so recommendation
                // is to create new instance prior to each access.
                GlobalClipboard::new()
                    .and_then(|mut clip| clip.set_text(text.to_string()))
                    .map_err(|e| Error::clipboard_unavailable(&e))
            }
            #[cfg(test)]
            Scope::Unavailable => Err(Error::clipboard_unavailable(&"no clipboard")),
        }
    }

    /// Returns the text on the clipboard, which is empty if nothing has been copied.
    pub fn paste(&mut self) -> Result<String> {
        match self.scope {
            Scope::Local => Ok(self.local.clone().unwrap_or_default()),
            Scope::Global => GlobalClipboard::new()
                .and_then(|mut clip| clip.get_text())
                .or_else(|e| match e {
                    arboard::Error::ContentNotAvailable => Ok(String::new()),
                    e => Err(e),
                })
                .map_err(|e| Error::clipboard_unavailable(&e)),
            #[cfg(test)]
            Scope::Unavailable => Err(Error::clipboard_unavailable(&"no clipboard")),
        }
    }
}

impl Default for Clipboard {
    fn default() -> Clipboard {
        Clipboard::new(Scope::Global)
    }
}
