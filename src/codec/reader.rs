//! Bounds-checked cursor over an encoded message.
//!
//! Every read checks the remaining length first, so a short input surfaces
//! as [`FramingError::Truncated`] rather than a panic or an over-read.

use super::error::{FramingError, WireField};
use crate::byte_order::{read_wire_i32, read_wire_u16};

pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self { Self { buf } }

    pub(crate) fn remaining(&self) -> usize { self.buf.len() }

    /// Consume exactly `len` bytes.
    pub(crate) fn take(&mut self, len: usize, field: WireField) -> Result<&'a [u8], FramingError> {
        if self.buf.len() < len {
            return Err(FramingError::Truncated {
                field,
                needed: len,
                available: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self, field: WireField) -> Result<[u8; N], FramingError> {
        let bytes = self.take(N, field)?;
        let mut out = [0_u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self, field: WireField) -> Result<u8, FramingError> {
        let [byte] = self.take_array::<1>(field)?;
        Ok(byte)
    }

    pub(crate) fn read_u16(&mut self, field: WireField) -> Result<u16, FramingError> {
        self.take_array(field).map(read_wire_u16)
    }

    pub(crate) fn read_i32(&mut self, field: WireField) -> Result<i32, FramingError> {
        self.take_array(field).map(read_wire_i32)
    }

    /// Read a `u16` length prefix followed by that many bytes.
    ///
    /// Lengths above `ceiling` are rejected before any string bytes are
    /// consumed.
    pub(crate) fn read_prefixed(
        &mut self,
        length_field: WireField,
        body_field: WireField,
        ceiling: usize,
    ) -> Result<&'a [u8], FramingError> {
        let len = usize::from(self.read_u16(length_field)?);
        if len > ceiling {
            return Err(FramingError::StringTooLong {
                field: length_field,
                len,
                max: ceiling,
            });
        }
        self.take(len, body_field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_reports_shortfall_without_consuming() {
        let mut reader = WireReader::new(&[1, 2, 3]);
        let err = reader
            .take(4, WireField::Payload)
            .expect_err("short input must fail");
        assert_eq!(
            err,
            FramingError::Truncated {
                field: WireField::Payload,
                needed: 4,
                available: 3,
            }
        );
        assert_eq!(reader.remaining(), 3);
    }

    #[test]
    fn reads_little_endian_integers() {
        let mut reader = WireReader::new(&[0x34, 0x12, 0xfe, 0xff, 0xff, 0xff]);
        assert_eq!(reader.read_u16(WireField::HeaderKeyLength), Ok(0x1234));
        assert_eq!(reader.read_i32(WireField::PayloadLength), Ok(-2));
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn prefixed_read_rejects_length_above_ceiling_before_reading() {
        let mut reader = WireReader::new(&[0xd0, 0x07]);
        let err = reader
            .read_prefixed(WireField::HeaderKeyLength, WireField::HeaderKey, 1023)
            .expect_err("length above ceiling must fail");
        assert_eq!(
            err,
            FramingError::StringTooLong {
                field: WireField::HeaderKeyLength,
                len: 2000,
                max: 1023,
            }
        );
    }

    #[test]
    fn prefixed_read_returns_body() {
        let mut reader = WireReader::new(&[3, 0, b'v', b'a', b'l', 9]);
        let body = reader
            .read_prefixed(WireField::HeaderValueLength, WireField::HeaderValue, 1023)
            .expect("read value");
        assert_eq!(body, b"val");
        assert_eq!(reader.remaining(), 1);
    }
}
