use std::fmt;

use crate::Lookahead;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
/// UTF-16 big-endian byte-order mark.
pub const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
/// UTF-16 little-endian byte-order mark.
pub const UTF16LE_BOM: [u8; 2] = [0xFF, 0xFE];
/// UTF-32 big-endian byte-order mark.
pub const UTF32BE_BOM: [u8; 4] = [0x00, 0x00, 0xFE, 0xFF];
/// UTF-32 little-endian byte-order mark.
pub const UTF32LE_BOM: [u8; 4] = [0xFF, 0xFE, 0x00, 0x00];

/// The Unicode encoding form of a [`TextStream`](crate::TextStream).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl Encoding {
    /// Byte-order marks in the order they must be tested. The UTF-16LE mark is a prefix of the
    /// UTF-32LE mark, so UTF-32LE has to win first.
    pub const SNIFF_ORDER: [Encoding; 5] = [
        Encoding::Utf8,
        Encoding::Utf32Le,
        Encoding::Utf16Le,
        Encoding::Utf16Be,
        Encoding::Utf32Be,
    ];

    /// The byte-order mark identifying this encoding.
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &UTF8_BOM,
            Encoding::Utf16Be => &UTF16BE_BOM,
            Encoding::Utf16Le => &UTF16LE_BOM,
            Encoding::Utf32Be => &UTF32BE_BOM,
            Encoding::Utf32Le => &UTF32LE_BOM,
        }
    }

    /// Width in bytes of one code unit.
    pub const fn unit_width(self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16Be | Encoding::Utf16Le => 2,
            Encoding::Utf32Be | Encoding::Utf32Le => 4,
        }
    }

    /// Finds the encoding whose byte-order mark starts the buffered bytes.
    pub fn sniff(lookahead: &Lookahead) -> Option<Encoding> {
        Self::SNIFF_ORDER
            .iter()
            .copied()
            .find(|enc| lookahead.starts_with(enc.bom()))
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Utf8
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Utf16Be => "UTF-16BE",
            Encoding::Utf16Le => "UTF-16LE",
            Encoding::Utf32Be => "UTF-32BE",
            Encoding::Utf32Le => "UTF-32LE",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(bytes: &[u8]) -> Option<Encoding> {
        Encoding::sniff(&Lookahead::from_bytes(bytes))
    }

    #[test]
    fn utf32le_beats_utf16le() {
        assert_eq!(sniff(&[0xFF, 0xFE, 0x00, 0x00]), Some(Encoding::Utf32Le));
        assert_eq!(sniff(&[0xFF, 0xFE, 0x00, 0x01]), Some(Encoding::Utf16Le));
        assert_eq!(sniff(&[0xFF, 0xFE, 0x00]), Some(Encoding::Utf16Le));
    }

    #[test]
    fn every_mark_sniffs_to_itself() {
        for enc in Encoding::SNIFF_ORDER.iter() {
            assert_eq!(sniff(enc.bom()), Some(*enc));
        }
    }

    #[test]
    fn partial_marks_do_not_match() {
        assert_eq!(sniff(&[0xEF, 0xBB]), None);
        assert_eq!(sniff(&[0x00, 0x00, 0xFE]), None);
        assert_eq!(sniff(&[]), None);
        assert_eq!(sniff(b"hello"), None);
    }
}
