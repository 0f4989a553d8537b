//! Useful functions with designated modules.

use std::ops::ControlFlow;

/// Returns the byte offset in `buf` corresponding to the `pos`-th character, which is
/// guaranteed to be aligned to a UTF-8 code point boundary in `buf`.
///
/// If `buf` contains less than `pos` characters, then `buf.len()` is returned.
pub fn pos_to_offset(buf: &str, pos: usize) -> usize {
    buf.char_indices()
        .nth(pos)
        .map(|(offset, _)| offset)
        .unwrap_or(buf.len())
}

/// Returns the `pos`-th character in `buf` corresponding to the byte `offset`.
///
/// If `buf` contains less than `offset` bytes, then the value returned is equal to
/// `buf.chars().count()`.
pub fn offset_to_pos(buf: &str, offset: usize) -> usize {
    let result = buf.chars().try_fold((0, 0), |(ofs, pos), c| {
        if ofs < offset {
            ControlFlow::Continue((ofs + c.len_utf8(), pos + 1))
        } else {
            ControlFlow::Break(pos)
        }
    });
    match result {
        ControlFlow::Break(pos) => pos,
        ControlFlow::Continue((_, pos)) => pos,
    }
}

/// Returns the slice of `buf` covering characters in the range [`from`, `to`), where
/// both bounds are clamped to the number of characters in `buf`.
pub fn char_slice(buf: &str, from: usize, to: usize) -> &str {
    let start = pos_to_offset(buf, from);
    let end = pos_to_offset(buf, to.max(from));
    &buf[start..end]
}

/// Returns the number of characters in `buf`.
#[inline]
pub fn char_len(buf: &str) -> usize {
    buf.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_of_multibyte_text() {
        let s = "aé€b";
        assert_eq!(pos_to_offset(s, 0), 0);
        assert_eq!(pos_to_offset(s, 2), 3);
        assert_eq!(pos_to_offset(s, 3), 6);
        assert_eq!(pos_to_offset(s, 10), s.len());
        assert_eq!(offset_to_pos(s, 3), 2);
        assert_eq!(offset_to_pos(s, 6), 3);
        assert_eq!(offset_to_pos(s, 100), 4);
    }

    #[test]
    fn slice_by_chars() {
        let s = "héllo";
        assert_eq!(char_slice(s, 1, 3), "él");
        assert_eq!(char_slice(s, 3, 99), "lo");
        assert_eq!(char_slice(s, 7, 9), "");
        assert_eq!(char_slice(s, 3, 1), "");
        assert_eq!(char_len(s), 5);
    }
}
