//! Terminal interrogation.
//!
//! The headless host never changes terminal modes. It only asks the terminal for its
//! size so that the render window matches what would be visible.

use crate::error::{Error, Result};
use libc::{STDOUT_FILENO, TIOCGWINSZ, c_int, winsize};
use std::io;
use std::mem::MaybeUninit;

/// Returns `true` if standard output is connected to a terminal.
pub fn is_terminal() -> bool {
    unsafe { libc::isatty(STDOUT_FILENO) == 1 }
}

/// Returns the size of the terminal as (rows, cols).
///
/// Calls to this function always query the underlying driver, as the terminal size may
/// have changed since the prior request.
pub fn size() -> Result<(u32, u32)> {
    let win = unsafe {
        let mut win = MaybeUninit::<winsize>::uninit();
        check_err(libc::ioctl(STDOUT_FILENO, TIOCGWINSZ, win.as_mut_ptr()))?;
        win.assume_init()
    };
    Ok((win.ws_row as u32, win.ws_col as u32))
}

/// Returns the size of the terminal if standard output is a terminal that reports a
/// nonzero size.
pub fn try_size() -> Option<(u32, u32)> {
    if is_terminal() {
        size()
            .ok()
            .filter(|&(rows, cols)| rows > 0 && cols > 0)
    } else {
        None
    }
}

fn check_err(err: c_int) -> Result<()> {
    if err < 0 {
        Err(Error::from(io::Error::last_os_error()))
    } else {
        Ok(())
    }
}
