use std::io::{self, Read};

use crate::{Result, TextRead, TextStream};

impl<T: TextRead + ?Sized> TextRead for &mut T {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline]
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).peek_byte()
    }

    #[inline]
    fn read_char(&mut self) -> Result<Option<u16>> {
        (**self).read_char()
    }

    #[inline]
    fn read_rune(&mut self) -> Result<Option<char>> {
        (**self).read_rune()
    }
}

impl<T: TextRead + ?Sized> TextRead for Box<T> {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    #[inline]
    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).peek_byte()
    }

    #[inline]
    fn read_char(&mut self) -> Result<Option<u16>> {
        (**self).read_char()
    }

    #[inline]
    fn read_rune(&mut self) -> Result<Option<char>> {
        (**self).read_rune()
    }
}

impl<R: Read> TextRead for TextStream<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        TextStream::read_byte(self)
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        TextStream::peek_byte(self)
    }

    fn read_char(&mut self) -> Result<Option<u16>> {
        TextStream::read_char(self)
    }

    fn read_rune(&mut self) -> Result<Option<char>> {
        TextStream::read_rune(self)
    }
}
