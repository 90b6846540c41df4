use std::io::{ErrorKind, Read, Result};

/// Reads a single byte, retrying on interrupts. `None` means the source is exhausted.
pub fn read_one<R: Read + ?Sized>(source: &mut R) -> Result<Option<u8>> {
    let mut byte = 0;
    loop {
        return match source.read(std::slice::from_mut(&mut byte)) {
            Ok(0) => Ok(None),
            Ok(..) => Ok(Some(byte)),
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => Err(e),
        };
    }
}

/// Fills `buf` one byte at a time until it is full or the source is exhausted.
/// Returns the number of bytes obtained.
pub fn read_up_to<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    for (i, slot) in buf.iter_mut().enumerate() {
        match read_one(source)? {
            Some(byte) => *slot = byte,
            None => return Ok(i),
        }
    }
    Ok(buf.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_up_to_reports_short_counts() {
        let mut src: &[u8] = &[1, 2, 3];
        let mut buf = [0; 4];
        assert_eq!(read_up_to(&mut src, &mut buf).unwrap(), 3);
        assert_eq!(buf, [1, 2, 3, 0]);
        assert_eq!(read_one(&mut src).unwrap(), None);
    }
}
