//! Byte streams that detect their Unicode encoding from a byte-order mark and can be read as
//! bytes, UTF-16 code units or Unicode scalar values without losing track of their position.
//!
//! ```
//! use std::io::Cursor;
//! use textstream::{Encoding, TextRead, TextStream};
//!
//! let mut stream = TextStream::new(Cursor::new(vec![0xFF, 0xFE, b'h', 0, b'i', 0])).unwrap();
//! assert_eq!(stream.encoding(), Encoding::Utf16Le);
//! assert_eq!(stream.position().unwrap(), 2);
//! assert_eq!(stream.peek_byte().unwrap(), Some(b'h'));
//!
//! let mut text = String::new();
//! stream.read_to_text(&mut text).unwrap();
//! assert_eq!(text, "hi");
//! ```

mod codec;
mod encoding;
mod error;
mod foreign_impl;
mod lookahead;
mod peekreader;
mod textstream;
pub mod unicode;
mod util;

pub use codec::Codec;
pub use encoding::{Encoding, UTF16BE_BOM, UTF16LE_BOM, UTF32BE_BOM, UTF32LE_BOM, UTF8_BOM};
pub use error::{Error, Result};
pub use lookahead::Lookahead;
pub use peekreader::PeekReader;
pub use textstream::{TextStream, TextStreamBuilder};

/// A byte stream that can also be read as text.
///
/// All reads report the end of the stream as `Ok(None)`. The character-level reads report
/// malformed sequences the same way.
pub trait TextRead {
    /// Reads one byte.
    fn read_byte(&mut self) -> std::io::Result<Option<u8>>;

    /// Returns the next byte without consuming it.
    fn peek_byte(&mut self) -> std::io::Result<Option<u8>>;

    /// Reads one UTF-16 code unit.
    fn read_char(&mut self) -> Result<Option<u16>>;

    /// Reads one Unicode scalar value.
    fn read_rune(&mut self) -> Result<Option<char>>;

    /// Reads up to `n` scalar values, fewer if the stream ends first.
    fn read_runes(&mut self, n: usize) -> Result<Vec<char>> {
        let mut runes = Vec::with_capacity(n);
        while runes.len() < n {
            match self.read_rune()? {
                Some(c) => runes.push(c),
                None => break,
            }
        }
        Ok(runes)
    }

    /// Appends scalar values to `buf` until the stream ends or a malformed sequence is hit.
    /// Returns the number of scalar values appended.
    fn read_to_text(&mut self, buf: &mut String) -> Result<usize> {
        let mut read = 0;
        while let Some(c) = self.read_rune()? {
            buf.push(c);
            read += 1;
        }
        Ok(read)
    }

    fn chars(self) -> Chars<Self>
    where
        Self: Sized,
    {
        Chars { inner: self }
    }

    fn runes(self) -> Runes<Self>
    where
        Self: Sized,
    {
        Runes { inner: self }
    }
}

/// Iterator over the UTF-16 code units of a [`TextRead`]. See [`TextRead::chars`].
#[derive(Debug)]
pub struct Chars<R> {
    inner: R,
}

impl<R: TextRead> Iterator for Chars<R> {
    type Item = Result<u16>;

    fn next(&mut self) -> Option<Result<u16>> {
        self.inner.read_char().transpose()
    }
}

/// Iterator over the scalar values of a [`TextRead`]. See [`TextRead::runes`].
#[derive(Debug)]
pub struct Runes<R> {
    inner: R,
}

impl<R: TextRead> Iterator for Runes<R> {
    type Item = Result<char>;

    fn next(&mut self) -> Option<Result<char>> {
        self.inner.read_rune().transpose()
    }
}
