use std::io::{Error, ErrorKind, Read, Result, Seek, SeekFrom};

use log::trace;

use crate::util::read_one;
use crate::Lookahead;

/// A byte source fronted by a [`Lookahead`] buffer.
///
/// Every read drains the lookahead first and only then touches the underlying reader, so the
/// bytes come out in stream order no matter which of the two currently holds them. The
/// position reported through [`Seek`] is that of the next byte a caller would get, not that
/// of the underlying reader.
#[derive(Debug)]
pub struct PeekReader<R> {
    // Bytes already taken from `inner` but not yet handed out.
    lookahead: Lookahead,
    inner: R,
}

impl<R> PeekReader<R> {
    /// Creates a new [`PeekReader`] with an empty lookahead.
    pub fn new(reader: R) -> Self {
        Self::with_lookahead(reader, Lookahead::new())
    }

    /// Creates a new [`PeekReader`] whose `lookahead` bytes logically precede `reader`.
    pub fn with_lookahead(reader: R, lookahead: Lookahead) -> Self {
        Self {
            lookahead,
            inner: reader,
        }
    }

    /// Returns the bytes currently held in front of the underlying reader.
    pub fn buffer(&self) -> &[u8] {
        self.lookahead.as_slice()
    }

    pub(crate) fn lookahead(&self) -> &Lookahead {
        &self.lookahead
    }

    pub(crate) fn lookahead_mut(&mut self) -> &mut Lookahead {
        &mut self.lookahead
    }

    /// Gets a reference to the underlying reader.
    ///
    /// It is inadvisable to directly read from the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Gets a mutable reference to the underlying reader.
    ///
    /// It is inadvisable to directly read from the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps this `PeekReader<R>`, returning the underlying reader. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> PeekReader<R> {
    /// Tops the lookahead up with at most `n` bytes from the underlying reader.
    pub fn fill_lookahead(&mut self, n: usize) -> Result<usize> {
        self.lookahead.fill(&mut self.inner, n)
    }

    /// Reads one byte, or `None` at the end of the stream.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        match self.lookahead.take_first() {
            Some(byte) => Ok(Some(byte)),
            None => read_one(&mut self.inner),
        }
    }

    /// Returns the next byte without consuming it, or `None` at the end of the stream.
    ///
    /// At most one byte is pulled from the underlying reader, and it is kept so the following
    /// read returns it.
    pub fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.lookahead.is_stale() {
            self.fill_lookahead(1)?;
        }
        Ok(self.lookahead.peek_first())
    }
}

impl<R: Read> Read for PeekReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.lookahead.is_stale() {
            return self.inner.read(buf);
        }
        let drained = self.lookahead.drain_into(buf);
        if drained == buf.len() {
            return Ok(drained);
        }
        match self.inner.read(&mut buf[drained..]) {
            Ok(n) => Ok(drained + n),
            // The buffered bytes are already handed out, report them and let the next read
            // hit the error again.
            Err(e) => {
                trace!("short read of {} buffered bytes, deferring error: {}", drained, e);
                Ok(drained)
            }
        }
    }
}

impl<R: Seek> Seek for PeekReader<R> {
    /// Seeks the underlying reader and discards the lookahead.
    ///
    /// [`SeekFrom::Current`] is relative to the logical position, which trails the underlying
    /// reader by the number of buffered bytes.
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let buffered = self.lookahead.len() as i64;
        let pos = match pos {
            SeekFrom::Current(offset) if buffered > 0 => {
                let offset = offset.checked_sub(buffered).ok_or_else(|| {
                    Error::new(ErrorKind::InvalidInput, "seek offset out of range")
                })?;
                SeekFrom::Current(offset)
            }
            pos => pos,
        };
        let new_pos = self.inner.seek(pos)?;
        if buffered > 0 {
            trace!("seek to {} discarded {} lookahead bytes", new_pos, buffered);
            self.lookahead.clear();
        }
        Ok(new_pos)
    }

    fn stream_position(&mut self) -> Result<u64> {
        let pos = self.inner.stream_position()?;
        Ok(pos.saturating_sub(self.lookahead.len() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hello() -> PeekReader<Cursor<&'static [u8]>> {
        PeekReader::new(Cursor::new(&b"hello world"[..]))
    }

    #[test]
    fn peek_does_not_advance() {
        let mut rdr = hello();
        assert_eq!(rdr.peek_byte().unwrap(), Some(b'h'));
        assert_eq!(rdr.peek_byte().unwrap(), Some(b'h'));
        assert_eq!(rdr.stream_position().unwrap(), 0);
        assert_eq!(rdr.get_ref().position(), 1);
        assert_eq!(rdr.read_byte().unwrap(), Some(b'h'));
        assert_eq!(rdr.stream_position().unwrap(), 1);
        assert_eq!(rdr.read_byte().unwrap(), Some(b'e'));
    }

    #[test]
    fn read_drains_lookahead_then_source() {
        let mut rdr = hello();
        rdr.fill_lookahead(4).unwrap();
        let mut buf = [0; 2];
        assert_eq!(rdr.read(&mut buf).unwrap(), 2);
        assert_eq!(&buf, b"he");
        let mut buf = [0; 8];
        assert_eq!(rdr.read(&mut buf).unwrap(), 8);
        assert_eq!(&buf, b"llo worl");
        assert!(rdr.buffer().is_empty());
        assert_eq!(rdr.stream_position().unwrap(), 10);
    }

    #[test]
    fn short_reads_are_not_padded() {
        let mut rdr = PeekReader::new(Cursor::new(&b"hello"[..]));
        rdr.fill_lookahead(4).unwrap();
        let mut buf = [0xAA; 4];
        assert_eq!(rdr.read(&mut buf).unwrap(), 4);
        assert_eq!(rdr.read(&mut buf).unwrap(), 1);
        assert_eq!(buf, [b'o', 0xAA, 0xAA, 0xAA]);
        assert_eq!(rdr.read(&mut buf).unwrap(), 0);
        assert_eq!(rdr.stream_position().unwrap(), 5);
    }

    #[test]
    fn relative_seek_accounts_for_lookahead() {
        let mut rdr = hello();
        rdr.read_byte().unwrap();
        rdr.fill_lookahead(3).unwrap();
        assert_eq!(rdr.stream_position().unwrap(), 1);
        assert_eq!(rdr.seek(SeekFrom::Current(2)).unwrap(), 3);
        assert!(rdr.buffer().is_empty());
        assert_eq!(rdr.read_byte().unwrap(), Some(b'l'));
        rdr.peek_byte().unwrap();
        assert_eq!(rdr.seek(SeekFrom::Current(-4)).unwrap(), 0);
        assert_eq!(rdr.read_byte().unwrap(), Some(b'h'));
    }

    #[test]
    fn absolute_seek_discards_lookahead() {
        let mut rdr = hello();
        rdr.fill_lookahead(4).unwrap();
        assert_eq!(rdr.seek(SeekFrom::End(-5)).unwrap(), 6);
        assert!(rdr.buffer().is_empty());
        assert_eq!(rdr.read_byte().unwrap(), Some(b'w'));
        assert_eq!(rdr.seek(SeekFrom::Start(0)).unwrap(), 0);
        assert_eq!(rdr.peek_byte().unwrap(), Some(b'h'));
    }
}
