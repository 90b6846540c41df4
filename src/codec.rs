use std::io::{self, Read, Write};

use log::trace;

use crate::unicode::{self, utf16_decode_pair, utf16_encode, utf16_sequence_length, utf8_decode};
use crate::util::{read_one, read_up_to};
use crate::{Encoding, Error, Result};

/// Per-stream decode/encode state for one [`Encoding`].
///
/// Decoding UTF-8 or UTF-32 one UTF-16 code unit at a time splits supplementary-plane scalars
/// into a surrogate pair. The low half is kept here and returned by the next
/// [`read_char`](Codec::read_char) before any more bytes are consumed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codec {
    encoding: Encoding,
    pending: Option<u16>,
}

impl Codec {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            pending: None,
        }
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The low surrogate still owed to the caller, if any.
    pub fn pending(&self) -> Option<u16> {
        self.pending
    }

    /// Forgets any pending low surrogate.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Reads one UTF-16 code unit from `source`.
    ///
    /// Returns `Ok(None)` at the end of the source or on a malformed sequence.
    pub fn read_char<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<Option<u16>> {
        if let Some(low) = self.pending.take() {
            return Ok(Some(low));
        }
        let scalar = match self.encoding {
            Encoding::Utf16Be | Encoding::Utf16Le => return Ok(self.read_unit16(source)?),
            Encoding::Utf8 => self.read_utf8(source)?,
            Encoding::Utf32Be | Encoding::Utf32Le => self.read_utf32(source)?,
        };
        Ok(scalar.map(|c| {
            let (first, second) = utf16_encode(c);
            self.pending = second;
            first
        }))
    }

    /// Reads one Unicode scalar value from `source`.
    ///
    /// Returns `Ok(None)` at the end of the source or on a malformed sequence, and
    /// [`Error::StraddlingSurrogate`] if a low surrogate from [`read_char`](Codec::read_char)
    /// has not been drained yet. The pending unit is left in place in that case.
    pub fn read_rune<R: Read + ?Sized>(&mut self, source: &mut R) -> Result<Option<char>> {
        if self.pending.is_some() {
            return Err(Error::StraddlingSurrogate);
        }
        match self.encoding {
            Encoding::Utf16Be | Encoding::Utf16Le => {
                let lead = match self.read_unit16(source)? {
                    Some(unit) => unit,
                    None => return Ok(None),
                };
                match utf16_sequence_length(lead) {
                    Some(1) => Ok(std::char::from_u32(u32::from(lead))),
                    Some(_) => match self.read_unit16(source)? {
                        Some(trail) => Ok(self.check(utf16_decode_pair(lead, trail), &[lead, trail])),
                        None => Ok(self.malformed(&[lead])),
                    },
                    None => Ok(self.malformed(&[lead])),
                }
            }
            Encoding::Utf8 => Ok(self.read_utf8(source)?),
            Encoding::Utf32Be | Encoding::Utf32Le => Ok(self.read_utf32(source)?),
        }
    }

    /// Writes one UTF-16 code unit in this encoding.
    ///
    /// UTF-16 writes the unit verbatim, so surrogate pairs can be written half by half. The
    /// other encodings need a whole scalar value and reject surrogate units.
    pub fn write_char<W: Write + ?Sized>(&self, sink: &mut W, unit: u16) -> io::Result<()> {
        match self.encoding {
            Encoding::Utf16Be => sink.write_all(&unit.to_be_bytes()),
            Encoding::Utf16Le => sink.write_all(&unit.to_le_bytes()),
            Encoding::Utf8 | Encoding::Utf32Be | Encoding::Utf32Le => {
                match std::char::from_u32(u32::from(unit)) {
                    Some(c) => self.write_rune(sink, c),
                    None => Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("cannot write lone surrogate {:#06X} as {}", unit, self.encoding),
                    )),
                }
            }
        }
    }

    /// Writes one Unicode scalar value in this encoding.
    pub fn write_rune<W: Write + ?Sized>(&self, sink: &mut W, c: char) -> io::Result<()> {
        match self.encoding {
            Encoding::Utf8 => sink.write_all(c.encode_utf8(&mut [0; 4]).as_bytes()),
            Encoding::Utf16Be | Encoding::Utf16Le => {
                let (first, second) = utf16_encode(c);
                self.write_char(sink, first)?;
                match second {
                    Some(low) => self.write_char(sink, low),
                    None => Ok(()),
                }
            }
            Encoding::Utf32Be => sink.write_all(&u32::from(c).to_be_bytes()),
            Encoding::Utf32Le => sink.write_all(&u32::from(c).to_le_bytes()),
        }
    }

    /// Writes this encoding's byte-order mark.
    pub fn write_bom<W: Write + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.encoding.bom())
    }

    fn read_utf8<R: Read + ?Sized>(&self, source: &mut R) -> io::Result<Option<char>> {
        let mut seq = [0; 4];
        seq[0] = match read_one(source)? {
            Some(byte) => byte,
            None => return Ok(None),
        };
        let len = match unicode::utf8_sequence_length(seq[0]) {
            Some(len) => len,
            None => return Ok(self.malformed(&seq[..1])),
        };
        let got = 1 + read_up_to(source, &mut seq[1..len])?;
        Ok(self.check(utf8_decode(&seq[..got]), &seq[..got]))
    }

    fn read_utf32<R: Read + ?Sized>(&self, source: &mut R) -> io::Result<Option<char>> {
        let mut bytes = [0; 4];
        match read_up_to(source, &mut bytes)? {
            0 => return Ok(None),
            4 => {}
            n => return Ok(self.malformed(&bytes[..n])),
        }
        let value = if self.encoding == Encoding::Utf32Be {
            u32::from_be_bytes(bytes)
        } else {
            u32::from_le_bytes(bytes)
        };
        Ok(self.check(std::char::from_u32(value), &bytes))
    }

    fn read_unit16<R: Read + ?Sized>(&self, source: &mut R) -> io::Result<Option<u16>> {
        let mut bytes = [0; 2];
        match read_up_to(source, &mut bytes)? {
            0 => Ok(None),
            1 => Ok(self.malformed(&bytes[..1])),
            _ if self.encoding == Encoding::Utf16Be => Ok(Some(u16::from_be_bytes(bytes))),
            _ => Ok(Some(u16::from_le_bytes(bytes))),
        }
    }

    fn check<T, U: std::fmt::Debug>(&self, decoded: Option<T>, raw: &[U]) -> Option<T> {
        decoded.or_else(|| self.malformed(raw))
    }

    fn malformed<T, U: std::fmt::Debug>(&self, raw: &[U]) -> Option<T> {
        trace!("malformed {} sequence {:X?}", self.encoding, raw);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn runes(encoding: Encoding, bytes: &[u8]) -> Vec<Option<char>> {
        let mut codec = Codec::new(encoding);
        let mut src = Cursor::new(bytes);
        let mut out = Vec::new();
        while (src.position() as usize) < bytes.len() {
            out.push(codec.read_rune(&mut src).unwrap());
        }
        out
    }

    #[test]
    fn utf16le_surrogate_pair_as_chars() {
        let mut codec = Codec::new(Encoding::Utf16Le);
        let mut src: &[u8] = &[0x34, 0xD8, 0x1E, 0xDD];
        assert_eq!(codec.read_char(&mut src).unwrap(), Some(0xD834));
        assert_eq!(codec.read_char(&mut src).unwrap(), Some(0xDD1E));
        assert_eq!(codec.read_char(&mut src).unwrap(), None);
    }

    #[test]
    fn utf16be_runes() {
        assert_eq!(
            runes(Encoding::Utf16Be, &[0x00, 0x47, 0xD8, 0x34, 0xDD, 0x1E]),
            vec![Some('G'), Some('\u{1D11E}')]
        );
    }

    #[test]
    fn utf16_unpaired_surrogates_are_malformed() {
        // Lone low surrogate, then a high surrogate followed by a non-surrogate.
        assert_eq!(
            runes(Encoding::Utf16Le, &[0x1E, 0xDD, 0x34, 0xD8, 0x41, 0x00]),
            vec![None, None]
        );
    }

    #[test]
    fn utf8_split_into_surrogates() {
        let mut codec = Codec::new(Encoding::Utf8);
        let mut src: &[u8] = "\u{1D11E}a".as_bytes();
        assert_eq!(codec.read_char(&mut src).unwrap(), Some(0xD834));
        assert_eq!(codec.pending(), Some(0xDD1E));
        assert!(matches!(codec.read_rune(&mut src), Err(Error::StraddlingSurrogate)));
        assert_eq!(codec.read_char(&mut src).unwrap(), Some(0xDD1E));
        assert_eq!(codec.read_rune(&mut src).unwrap(), Some('a'));
        assert_eq!(codec.read_rune(&mut src).unwrap(), None);
    }

    #[test]
    fn utf8_malformed_and_truncated() {
        assert_eq!(runes(Encoding::Utf8, &[0x80]), vec![None]);
        assert_eq!(runes(Encoding::Utf8, &[0xE2, 0x82]), vec![None]);
        assert_eq!(runes(Encoding::Utf8, &[0xC3, 0xB6, 0x41]), vec![Some('ö'), Some('A')]);
    }

    #[test]
    fn utf32_out_of_range_is_malformed() {
        assert_eq!(runes(Encoding::Utf32Be, &[0x00, 0x11, 0x00, 0x00]), vec![None]);
        assert_eq!(runes(Encoding::Utf32Le, &[0x00, 0xD8, 0x00, 0x00]), vec![None]);
        assert_eq!(
            runes(Encoding::Utf32Le, &[0x1E, 0xD1, 0x01, 0x00, 0x41, 0x00]),
            vec![Some('\u{1D11E}'), None]
        );
    }

    #[test]
    fn writes_each_encoding() {
        let cases: &[(Encoding, &[u8])] = &[
            (Encoding::Utf8, &[0xD0, 0xBF]),
            (Encoding::Utf16Be, &[0x04, 0x3F]),
            (Encoding::Utf16Le, &[0x3F, 0x04]),
            (Encoding::Utf32Be, &[0x00, 0x00, 0x04, 0x3F]),
            (Encoding::Utf32Le, &[0x3F, 0x04, 0x00, 0x00]),
        ];
        for &(encoding, expected) in cases {
            let mut out = Vec::new();
            Codec::new(encoding).write_rune(&mut out, 'п').unwrap();
            assert_eq!(out, expected, "{}", encoding);
        }
    }

    #[test]
    fn lone_surrogate_write_is_rejected_outside_utf16() {
        let mut out = Vec::new();
        let err = Codec::new(Encoding::Utf8).write_char(&mut out, 0xD834).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        Codec::new(Encoding::Utf16Le).write_char(&mut out, 0xD834).unwrap();
        assert_eq!(out, [0x34, 0xD8]);
    }
}
