use std::io;

use thiserror::Error;

/// Errors produced by the character-level operations of a [`TextStream`].
///
/// End of stream and malformed sequences are not errors, they are reported as `Ok(None)`.
///
/// [`TextStream`]: crate::TextStream
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A rune was requested while the low half of a surrogate pair produced by an earlier
    /// `read_char` is still pending. Call `read_char` once more to drain it.
    #[error("the stream is positioned between the two halves of a surrogate pair")]
    StraddlingSurrogate,
}

/// A `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            e @ Error::StraddlingSurrogate => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert_back_unchanged() {
        let err: io::Error = Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn straddling_becomes_invalid_data() {
        let err: io::Error = Error::StraddlingSurrogate.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
