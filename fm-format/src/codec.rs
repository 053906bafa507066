//! Sans-IO primitive codecs over a single fixed-size record.
//!
//! [`RecordReader`] and [`RecordWriter`] walk a record slice front to back.
//! Record spans are static, so reading or writing past the end is a layout bug
//! and panics like any other out-of-bounds slice access.

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::WINDOWS_1251;

use crate::datetime::{FiscalDateTime, DATE_TIME_SIZE};

/// Decode a fixed-width Windows-1251 field, dropping trailing NULs.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1251.decode_without_bom_handling(bytes);
    text.trim_end_matches('\0').to_string()
}

/// Encode `text` into a zero-filled fixed-width field, truncating silently.
///
/// Characters without a Windows-1251 mapping become `?`.
pub fn encode_text(text: &str, out: &mut [u8]) {
    for b in out.iter_mut() {
        *b = 0;
    }

    let (encoded, _, had_errors) = WINDOWS_1251.encode(text);
    let encoded = if had_errors {
        let mut bytes = Vec::with_capacity(text.len());
        let mut buf = [0u8; 4];
        for c in text.chars() {
            let (single, _, unmappable) = WINDOWS_1251.encode(c.encode_utf8(&mut buf));
            if unmappable {
                bytes.push(b'?');
            } else {
                bytes.extend_from_slice(&single);
            }
        }
        bytes
    } else {
        encoded.into_owned()
    };

    let len = encoded.len().min(out.len());
    out[..len].copy_from_slice(&encoded[..len]);
}

pub struct RecordReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> RecordReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RecordReader { data, pos: 0 }
    }

    #[inline]
    fn take(&mut self, len: usize) -> &'a [u8] {
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        slice
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn skip(&mut self, len: usize) {
        self.pos += len;
    }

    pub fn u8(&mut self) -> u8 {
        self.take(1)[0]
    }

    pub fn u16(&mut self) -> u16 {
        LittleEndian::read_u16(self.take(2))
    }

    pub fn u32(&mut self) -> u32 {
        LittleEndian::read_u32(self.take(4))
    }

    pub fn u64(&mut self) -> u64 {
        LittleEndian::read_u64(self.take(8))
    }

    pub fn u16_array<const N: usize>(&mut self) -> [u16; N] {
        let mut out = [0u16; N];
        LittleEndian::read_u16_into(self.take(N * 2), &mut out);
        out
    }

    pub fn u64_array<const N: usize>(&mut self) -> [u64; N] {
        let mut out = [0u64; N];
        LittleEndian::read_u64_into(self.take(N * 8), &mut out);
        out
    }

    pub fn text(&mut self, len: usize) -> String {
        decode_text(self.take(len))
    }

    pub fn date_time(&mut self) -> FiscalDateTime {
        FiscalDateTime::read(self.take(DATE_TIME_SIZE))
    }
}

pub struct RecordWriter<'a> {
    data: &'a mut [u8],
    pos: usize,
}

impl<'a> RecordWriter<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        RecordWriter { data, pos: 0 }
    }

    #[inline]
    fn take(&mut self, len: usize) -> &mut [u8] {
        let start = self.pos;
        self.pos += len;
        &mut self.data[start..start + len]
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn u8(&mut self, value: u8) {
        self.take(1)[0] = value;
    }

    pub fn u16(&mut self, value: u16) {
        LittleEndian::write_u16(self.take(2), value);
    }

    pub fn u32(&mut self, value: u32) {
        LittleEndian::write_u32(self.take(4), value);
    }

    pub fn u64(&mut self, value: u64) {
        LittleEndian::write_u64(self.take(8), value);
    }

    pub fn u16_array(&mut self, values: &[u16]) {
        LittleEndian::write_u16_into(values, self.take(values.len() * 2));
    }

    pub fn u64_array(&mut self, values: &[u64]) {
        LittleEndian::write_u64_into(values, self.take(values.len() * 8));
    }

    pub fn text(&mut self, len: usize, value: &str) {
        encode_text(value, self.take(len));
    }

    pub fn date_time(&mut self, value: &FiscalDateTime) {
        value.write(self.take(DATE_TIME_SIZE));
    }

    /// Zero-fill reserved bytes.
    pub fn reserved(&mut self, len: usize) {
        for b in self.take(len) {
            *b = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_strips_trailing_nuls() {
        assert_eq!(decode_text(b"AB12\0\0\0\0\0\0"), "AB12");
        assert_eq!(decode_text(&[0u8; 10]), "");
    }

    #[test]
    fn cyrillic_round_trip() {
        let mut field = [0xFFu8; 10];
        encode_text("ПН123", &mut field);
        assert_eq!(&field[..5], &[0xCF, 0xCD, b'1', b'2', b'3']);
        assert_eq!(&field[5..], &[0u8; 5]);
        assert_eq!(decode_text(&field), "ПН123");
    }

    #[test]
    fn text_is_truncated() {
        let mut field = [0u8; 4];
        encode_text("ABCDEFG", &mut field);
        assert_eq!(&field, b"ABCD");
    }

    #[test]
    fn unmappable_becomes_question_mark() {
        let mut field = [0u8; 6];
        encode_text("A\u{4e2d}B", &mut field);
        assert_eq!(&field, b"A?B\0\0\0");
    }

    #[test]
    fn reader_writer_mirror() {
        let mut record = [0xFFu8; 24];
        {
            let mut w = RecordWriter::new(&mut record);
            w.u8(7);
            w.u16(0x1234);
            w.u32(0xDEADBEEF);
            w.u64(u64::MAX - 1);
            w.reserved(2);
            assert_eq!(w.position(), 17);
        }
        assert_eq!(&record[1..3], &[0x34, 0x12]);
        assert_eq!(&record[15..17], &[0, 0]);
        assert_eq!(record[17], 0xFF);

        let mut r = RecordReader::new(&record);
        assert_eq!(r.u8(), 7);
        assert_eq!(r.u16(), 0x1234);
        assert_eq!(r.u32(), 0xDEADBEEF);
        assert_eq!(r.u64(), u64::MAX - 1);
        r.skip(2);
        assert_eq!(r.position(), 17);
    }
}
