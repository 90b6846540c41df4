//! Single scalar value primitives for UTF-8 and UTF-16.

/// Number of bytes in the UTF-8 sequence introduced by `lead`, or `None` if `lead` can never
/// start a well-formed sequence (continuation bytes, overlong leads, leads above U+10FFFF).
pub const fn utf8_sequence_length(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

pub const fn is_utf8_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Decodes one complete UTF-8 sequence. Rejects bad continuation bytes, overlong forms,
/// surrogates and values above U+10FFFF.
pub fn utf8_decode(seq: &[u8]) -> Option<char> {
    let (&lead, rest) = seq.split_first()?;
    if utf8_sequence_length(lead)? != seq.len() || !rest.iter().all(|&b| is_utf8_continuation(b)) {
        return None;
    }

    let (init, min) = match seq.len() {
        1 => return Some(lead as char),
        2 => (u32::from(lead & 0x1F), 0x80),
        3 => (u32::from(lead & 0x0F), 0x800),
        _ => (u32::from(lead & 0x07), 0x1_0000),
    };
    let value = rest
        .iter()
        .fold(init, |acc, &b| (acc << 6) | u32::from(b & 0x3F));
    if value < min {
        return None;
    }
    std::char::from_u32(value)
}

pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Number of UTF-16 code units in the sequence introduced by `lead`, or `None` for a lone
/// low surrogate.
pub const fn utf16_sequence_length(lead: u16) -> Option<usize> {
    if is_high_surrogate(lead) {
        Some(2)
    } else if is_low_surrogate(lead) {
        None
    } else {
        Some(1)
    }
}

/// Combines a surrogate pair into a scalar value.
pub fn utf16_decode_pair(high: u16, low: u16) -> Option<char> {
    if !is_high_surrogate(high) || !is_low_surrogate(low) {
        return None;
    }
    let value = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    std::char::from_u32(value)
}

/// Splits a scalar value into UTF-16 code units; the second unit is present only for
/// supplementary-plane values.
pub fn utf16_encode(c: char) -> (u16, Option<u16>) {
    let mut units = [0; 2];
    let len = c.encode_utf16(&mut units).len();
    (units[0], if len == 2 { Some(units[1]) } else { None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_utf8_width() {
        for c in ['A', 'ö', 'Ж', '€', '\u{1D11E}'].iter() {
            let mut buf = [0; 4];
            let seq = c.encode_utf8(&mut buf).as_bytes();
            assert_eq!(utf8_sequence_length(seq[0]), Some(seq.len()));
            assert_eq!(utf8_decode(seq), Some(*c));
        }
    }

    #[test]
    fn rejects_malformed_utf8() {
        assert_eq!(utf8_sequence_length(0x80), None);
        assert_eq!(utf8_sequence_length(0xC0), None);
        assert_eq!(utf8_sequence_length(0xF5), None);
        // Overlong encoding of '/'.
        assert_eq!(utf8_decode(&[0xE0, 0x80, 0xAF]), None);
        // Encoded surrogate.
        assert_eq!(utf8_decode(&[0xED, 0xA0, 0x80]), None);
        // Above U+10FFFF.
        assert_eq!(utf8_decode(&[0xF4, 0x90, 0x80, 0x80]), None);
        // Bad continuation.
        assert_eq!(utf8_decode(&[0xC3, 0x28]), None);
        // Truncated.
        assert_eq!(utf8_decode(&[0xE2, 0x82]), None);
    }

    #[test]
    fn surrogate_pairs() {
        assert_eq!(utf16_encode('\u{1D11E}'), (0xD834, Some(0xDD1E)));
        assert_eq!(utf16_encode('G'), (0x47, None));
        assert_eq!(utf16_decode_pair(0xD834, 0xDD1E), Some('\u{1D11E}'));
        assert_eq!(utf16_decode_pair(0xDD1E, 0xD834), None);
        assert_eq!(utf16_sequence_length(0xDD1E), None);
        assert_eq!(utf16_sequence_length(0xD834), Some(2));
        assert_eq!(utf16_sequence_length(0x0041), Some(1));
    }
}
