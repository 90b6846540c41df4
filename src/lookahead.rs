use std::io::{ErrorKind, Read, Result};

/// A tiny FIFO of bytes that were taken from a byte source but not yet handed to the caller.
///
/// This is not a performance buffer, it only exists so that byte-order marks can be sniffed
/// and single bytes peeked without losing track of the source position. It never holds more
/// than [`Lookahead::CAPACITY`] bytes.
#[derive(Clone, Debug, Default)]
pub struct Lookahead {
    buf: [u8; Lookahead::CAPACITY],
    len: usize,
}

impl Lookahead {
    /// Maximum number of bytes held, enough for the longest byte-order mark.
    pub const CAPACITY: usize = 4;

    /// Creates an empty (stale) buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer holding `data`. Bytes past [`Lookahead::CAPACITY`] are dropped.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut lookahead = Self::new();
        let n = data.len().min(Self::CAPACITY);
        lookahead.buf[..n].copy_from_slice(&data[..n]);
        lookahead.len = n;
        lookahead
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds no bytes. A stale buffer is bypassed by all reads.
    pub fn is_stale(&self) -> bool {
        self.len == 0
    }

    /// The buffered bytes, oldest first.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Reads up to `n` bytes from `source` into the tail of the buffer, one byte per read call.
    ///
    /// Stops early when the source is exhausted or the buffer is full, returning the number of
    /// bytes actually appended.
    pub fn fill<R: Read + ?Sized>(&mut self, source: &mut R, n: usize) -> Result<usize> {
        let target = (self.len + n).min(Self::CAPACITY);
        let start = self.len;
        while self.len < target {
            match source.read(&mut self.buf[self.len..self.len + 1]) {
                Ok(0) => break,
                Ok(..) => self.len += 1,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => {} // Ignore interrupt.
                Err(e) => return Err(e),
            }
        }
        Ok(self.len - start)
    }

    /// Returns the first buffered byte without consuming it.
    pub fn peek_first(&self) -> Option<u8> {
        self.as_slice().first().copied()
    }

    /// Removes and returns the first buffered byte.
    pub fn take_first(&mut self) -> Option<u8> {
        let first = self.peek_first()?;
        self.shift(1);
        Some(first)
    }

    /// Discards the first `n` buffered bytes. `n` is clamped to the buffered length.
    pub fn shift(&mut self, n: usize) {
        let n = n.min(self.len);
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Moves as many buffered bytes as fit into `out`, oldest first. Returns the count moved.
    pub fn drain_into(&mut self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.len);
        out[..n].copy_from_slice(&self.buf[..n]);
        self.shift(n);
        n
    }

    /// Marks the buffer stale, dropping everything in it.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Whether the buffered prefix equals `candidate`. A buffer shorter than `candidate`
    /// never matches.
    pub fn starts_with(&self, candidate: &[u8]) -> bool {
        self.as_slice().starts_with(candidate)
    }
}

impl PartialEq for Lookahead {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Lookahead {}
