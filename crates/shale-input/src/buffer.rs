//! The character cursor and its file/memory implementation.

use std::borrow::Cow;
use std::io;
use std::path::Path;

/// A character stream with a restorable position.
///
/// `offset`/`set_offset` exist solely so the scanner can back out of a
/// failed match attempt.
pub trait Cursor {
    /// The next byte, advancing the position; `None` at or past the end.
    fn next_char(&mut self) -> Option<u8>;

    /// True once the position has passed the final byte.
    fn at_eof(&self) -> bool;

    /// Current position.
    fn offset(&self) -> usize;

    /// Restore a position previously obtained from [`Cursor::offset`].
    fn set_offset(&mut self, offset: usize);
}

/// A cursor over a whole source file or an in-memory region.
pub struct InputBuffer<'a> {
    data: Cow<'a, [u8]>,
    pos: usize,
}

impl InputBuffer<'static> {
    /// Read `path` into an owned buffer.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(InputBuffer {
            data: Cow::Owned(std::fs::read(path)?),
            pos: 0,
        })
    }
}

impl<'a> InputBuffer<'a> {
    /// Wrap a borrowed in-memory region.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        InputBuffer {
            data: Cow::Borrowed(data),
            pos: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Cursor for InputBuffer<'_> {
    fn next_char(&mut self) -> Option<u8> {
        let c = self.data.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn offset(&self) -> usize {
        self.pos
    }

    fn set_offset(&mut self, offset: usize) {
        self.pos = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_bytes_in_order() {
        let mut input = InputBuffer::from_bytes(b"ab");
        assert!(!input.at_eof());
        assert_eq!(input.next_char(), Some(b'a'));
        assert_eq!(input.next_char(), Some(b'b'));
        assert!(input.at_eof());
        assert_eq!(input.next_char(), None);
        assert!(input.at_eof());
    }

    #[test]
    fn offset_round_trips() {
        let mut input = InputBuffer::from_bytes(b"abc");
        let start = input.offset();
        assert_eq!(input.next_char(), Some(b'a'));
        assert_eq!(input.next_char(), Some(b'b'));
        input.set_offset(start);
        assert_eq!(input.next_char(), Some(b'a'));
    }

    #[test]
    fn empty_input_is_eof() {
        let mut input = InputBuffer::from_bytes(b"");
        assert!(input.at_eof());
        assert_eq!(input.next_char(), None);
    }
}
