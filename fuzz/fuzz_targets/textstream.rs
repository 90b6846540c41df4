#![no_main]

use core::fmt::Debug;
use std::io::{Cursor, Read, Result, Seek, SeekFrom};
use libfuzzer_sys::arbitrary::{self, Arbitrary};
use textstream::TextStream;

#[derive(Arbitrary, Debug)]
pub struct Target {
    pub refdat: Vec<u8>,
    pub ops: Vec<Op>,
}

#[derive(Arbitrary, Debug)]
pub enum Op {
    Read(u8),
    ReadByte,
    PeekByte,
    ReadChar,
    ReadRune,

    SeekStart(u64),
    SeekEnd(i64),
    SeekCurrent(i64),
    StreamPosition,
}

fn assert_reseq<T: Eq + Debug>(x: Result<T>, y: Result<T>) {
    match (x, y) {
        (Ok(xo), Ok(yo)) => assert_eq!(xo, yo),
        (Err(xe), Err(ye)) => assert_eq!(xe.kind(), ye.kind()),
        _ => assert!(false, "Result assert mismatch")
    }
}

fn ref_read_byte(refcursor: &mut Cursor<Vec<u8>>) -> Result<Option<u8>> {
    let mut byte = [0];
    Ok(match refcursor.read(&mut byte)? {
        0 => None,
        _ => Some(byte[0]),
    })
}

fn ref_peek_byte(refcursor: &mut Cursor<Vec<u8>>) -> Result<Option<u8>> {
    let pos = refcursor.position();
    let byte = ref_read_byte(refcursor);
    refcursor.set_position(pos);
    byte
}

fn check_ops(ops: &[Op], refcursor: &mut Cursor<Vec<u8>>, stream: &mut TextStream<Cursor<Vec<u8>>>) {
    for op in ops {
        match *op {
            Op::Read(n) => {
                let mut vr = vec![0; n as usize]; let mut vs = vec![0; n as usize];
                assert_reseq(refcursor.read(&mut vr), stream.read(&mut vs));
                assert_eq!(vr, vs);
            }
            Op::ReadByte => assert_reseq(ref_read_byte(refcursor), stream.read_byte()),
            Op::PeekByte => assert_reseq(ref_peek_byte(refcursor), stream.peek_byte()),
            // Decoding may consume any number of bytes, resync the reference afterwards.
            Op::ReadChar | Op::ReadRune => {
                let before = stream.position().unwrap();
                let _ = if let Op::ReadChar = *op {
                    stream.read_char().map(|_| ())
                } else {
                    stream.read_rune().map(|_| ())
                };
                let after = stream.position().unwrap();
                assert!(after >= before && after - before <= 4);
                refcursor.set_position(after);
            }
            Op::SeekStart(n) => assert_reseq(refcursor.seek(SeekFrom::Start(n)), stream.seek(SeekFrom::Start(n))),
            Op::SeekEnd(n) => assert_reseq(refcursor.seek(SeekFrom::End(n)), stream.seek(SeekFrom::End(n))),
            Op::SeekCurrent(n) => assert_reseq(refcursor.seek(SeekFrom::Current(n)), stream.seek(SeekFrom::Current(n))),
            Op::StreamPosition => assert_reseq(refcursor.stream_position(), stream.stream_position()),
        }
    }
}


use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Target| {
    let mut stream = TextStream::new(Cursor::new(data.refdat.clone())).unwrap();
    let mut reference = Cursor::new(data.refdat);
    reference.set_position(stream.position().unwrap());
    check_ops(&data.ops, &mut reference, &mut stream)
});
