use std::io::{self, Read, Seek, SeekFrom, Write};

use log::debug;

use crate::{Codec, Encoding, Lookahead, PeekReader, Result};

/// A byte stream that knows its Unicode encoding.
///
/// On construction up to four bytes are sniffed for a byte-order mark. A recognized mark is
/// consumed and selects the encoding; otherwise the sniffed bytes stay buffered as ordinary
/// content and the encoding defaults to UTF-8. Afterwards the stream can be read as bytes
/// ([`Read`], [`read_byte`](TextStream::read_byte), [`peek_byte`](TextStream::peek_byte)),
/// as UTF-16 code units ([`read_char`](TextStream::read_char)) or as scalar values
/// ([`read_rune`](TextStream::read_rune)), freely interleaved. [`Seek`] and
/// [`position`](TextStream::position) always describe the next byte the caller would get.
///
/// A `TextStream` holds mutable decode state and is not meant to be shared between threads
/// without external synchronization.
#[derive(Debug)]
pub struct TextStream<R> {
    source: PeekReader<R>,
    codec: Codec,
}

impl<R: Read> TextStream<R> {
    /// Wraps `reader`, detecting its encoding from a leading byte-order mark.
    ///
    /// Fails only if reading the first bytes fails.
    pub fn new(reader: R) -> io::Result<Self> {
        TextStreamBuilder::new().build(reader)
    }
}

impl<R> TextStream<R> {
    /// Wraps `reader` with a fixed encoding. Nothing is read and no byte-order mark is expected.
    pub fn with_encoding(reader: R, encoding: Encoding) -> Self {
        Self {
            source: PeekReader::new(reader),
            codec: Codec::new(encoding),
        }
    }

    /// The encoding selected at construction.
    pub fn encoding(&self) -> Encoding {
        self.codec.encoding()
    }

    /// Bytes read from the underlying reader that have not been handed out yet.
    pub fn buffered(&self) -> &[u8] {
        self.source.buffer()
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.source.get_ref()
    }

    /// Gets a mutable reference to the underlying reader.
    ///
    /// It is inadvisable to directly read from the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        self.source.get_mut()
    }

    /// Unwraps this `TextStream<R>`, returning the underlying reader. Buffered bytes are lost.
    pub fn into_inner(self) -> R {
        self.source.into_inner()
    }
}

impl<R: Read> TextStream<R> {
    /// Reads one byte, or `None` at the end of the stream.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.source.read_byte()
    }

    /// Returns the next byte without advancing, or `None` at the end of the stream.
    pub fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        self.source.peek_byte()
    }

    /// Reads one UTF-16 code unit.
    ///
    /// Supplementary-plane scalars in UTF-8 and UTF-32 streams come out as two calls, high
    /// surrogate first. The second call consumes no bytes. `None` means the stream ended or
    /// held a malformed sequence.
    pub fn read_char(&mut self) -> Result<Option<u16>> {
        self.codec.read_char(&mut self.source)
    }

    /// Reads one Unicode scalar value. `None` means the stream ended or held a malformed
    /// sequence.
    ///
    /// Fails with [`Error::StraddlingSurrogate`](crate::Error::StraddlingSurrogate) while the
    /// low half of a pair returned by [`read_char`](TextStream::read_char) is still pending.
    pub fn read_rune(&mut self) -> Result<Option<char>> {
        self.codec.read_rune(&mut self.source)
    }
}

impl<R: Read> Read for TextStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.source.read(buf)
    }
}

impl<R: Seek> TextStream<R> {
    /// The position of the next byte a read would return.
    pub fn position(&mut self) -> io::Result<u64> {
        self.source.stream_position()
    }

    /// Moves to an absolute byte offset. See [`Seek::seek`].
    pub fn set_position(&mut self, pos: u64) -> io::Result<u64> {
        self.seek(SeekFrom::Start(pos))
    }
}

impl<R: Seek> Seek for TextStream<R> {
    /// Seeks the underlying stream, discarding buffered bytes and any pending low surrogate.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = self.source.seek(pos)?;
        self.codec.reset();
        Ok(new_pos)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        self.source.stream_position()
    }
}

impl<R: Write> TextStream<R> {
    /// Writes one UTF-16 code unit in this stream's encoding.
    pub fn write_char(&mut self, unit: u16) -> io::Result<()> {
        self.codec.write_char(self.source.get_mut(), unit)
    }

    /// Writes one Unicode scalar value in this stream's encoding.
    pub fn write_rune(&mut self, c: char) -> io::Result<()> {
        self.codec.write_rune(self.source.get_mut(), c)
    }

    /// Writes this stream's byte-order mark.
    pub fn write_bom(&mut self) -> io::Result<()> {
        self.codec.write_bom(self.source.get_mut())
    }
}

/// Writes go straight to the underlying stream at its own cursor, which is ahead of
/// [`position`](TextStream::position) while bytes are buffered.
impl<R: Write> Write for TextStream<R> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.source.get_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.source.get_mut().flush()
    }
}

/// Configures how a [`TextStream`] resolves its encoding.
#[derive(Clone, Debug)]
pub struct TextStreamBuilder {
    encoding: Encoding,
    bom_sniffing: bool,
    lookahead: Lookahead,
}

impl Default for TextStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextStreamBuilder {
    /// UTF-8 fallback, byte-order mark sniffing enabled, empty lookahead.
    pub fn new() -> Self {
        Self {
            encoding: Encoding::Utf8,
            bom_sniffing: true,
            lookahead: Lookahead::new(),
        }
    }

    /// The encoding used when no byte-order mark is found, or always when sniffing is off.
    pub fn encoding(&mut self, encoding: Encoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    /// Whether to look for a byte-order mark at all. When disabled nothing is read during
    /// construction.
    pub fn bom_sniffing(&mut self, yes: bool) -> &mut Self {
        self.bom_sniffing = yes;
        self
    }

    /// Bytes that logically precede the reader, e.g. ones already consumed by the caller.
    /// They take part in byte-order mark detection.
    pub fn lookahead(&mut self, lookahead: Lookahead) -> &mut Self {
        self.lookahead = lookahead;
        self
    }

    /// Builds the stream, sniffing `reader` if enabled.
    pub fn build<R: Read>(&self, reader: R) -> io::Result<TextStream<R>> {
        let mut source = PeekReader::with_lookahead(reader, self.lookahead.clone());
        if !self.bom_sniffing {
            return Ok(TextStream {
                source,
                codec: Codec::new(self.encoding),
            });
        }

        source.fill_lookahead(Lookahead::CAPACITY)?;
        let encoding = match Encoding::sniff(source.lookahead()) {
            Some(encoding) => {
                debug!("detected {} byte-order mark", encoding);
                source.lookahead_mut().shift(encoding.bom().len());
                encoding
            }
            None => {
                debug!(
                    "no byte-order mark in {:X?}, assuming {}",
                    source.buffer(),
                    self.encoding
                );
                self.encoding
            }
        };
        Ok(TextStream {
            source,
            codec: Codec::new(encoding),
        })
    }
}
