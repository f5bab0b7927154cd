//! Variable-length integers.
//!
//! Seven data bits per byte, least significant group first, with the high
//! bit set on every byte except the last. Negative values always take the
//! maximum length.

use bytes::{Buf, BufMut};

use crate::shared::error::DecodeError;

pub const MAX_VAR_INT_LEN: usize = 5;
pub const MAX_VAR_LONG_LEN: usize = 10;

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Number of bytes `value` occupies as a VarInt
pub fn var_int_len(value: i32) -> usize {
    let mut value = value as u32;
    let mut len = 1;
    while value >= u32::from(CONTINUE_BIT) {
        value >>= 7;
        len += 1;
    }
    len
}

pub fn write_var_int(buf: &mut impl BufMut, value: i32) {
    let mut value = value as u32;
    loop {
        if value & !u32::from(SEGMENT_BITS) == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value as u8 & SEGMENT_BITS) | CONTINUE_BIT);
        value >>= 7;
    }
}

pub fn write_var_long(buf: &mut impl BufMut, value: i64) {
    let mut value = value as u64;
    loop {
        if value & !u64::from(SEGMENT_BITS) == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value as u8 & SEGMENT_BITS) | CONTINUE_BIT);
        value >>= 7;
    }
}

pub fn read_var_int(buf: &mut impl Buf) -> Result<i32, DecodeError> {
    let mut value: u32 = 0;
    for position in 0..MAX_VAR_INT_LEN {
        if !buf.has_remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = buf.get_u8();
        value |= u32::from(byte & SEGMENT_BITS) << (position * 7);
        if byte & CONTINUE_BIT == 0 {
            return Ok(value as i32);
        }
    }
    Err(DecodeError::VarIntTooLong)
}

pub fn read_var_long(buf: &mut impl Buf) -> Result<i64, DecodeError> {
    let mut value: u64 = 0;
    for position in 0..MAX_VAR_LONG_LEN {
        if !buf.has_remaining() {
            return Err(DecodeError::UnexpectedEof {
                needed: 1,
                remaining: 0,
            });
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & SEGMENT_BITS) << (position * 7);
        if byte & CONTINUE_BIT == 0 {
            return Ok(value as i64);
        }
    }
    Err(DecodeError::VarLongTooLong)
}

/// Decode a VarInt at the start of a possibly incomplete buffer.
///
/// Returns the value and its encoded length, or `None` when the buffer ends
/// before the final byte.
pub fn peek_var_int(buf: &[u8]) -> Result<Option<(i32, usize)>, DecodeError> {
    let mut value: u32 = 0;
    for (position, &byte) in buf.iter().take(MAX_VAR_INT_LEN).enumerate() {
        value |= u32::from(byte & SEGMENT_BITS) << (position * 7);
        if byte & CONTINUE_BIT == 0 {
            return Ok(Some((value as i32, position + 1)));
        }
    }
    if buf.len() >= MAX_VAR_INT_LEN {
        Err(DecodeError::VarIntTooLong)
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use test_case::test_case;

    // ==========================================================================
    // VarInt
    // ==========================================================================

    #[test_case(0, &[0x00])]
    #[test_case(1, &[0x01])]
    #[test_case(127, &[0x7f])]
    #[test_case(128, &[0x80, 0x01])]
    #[test_case(255, &[0xff, 0x01])]
    #[test_case(25565, &[0xdd, 0xc7, 0x01])]
    #[test_case(2097151, &[0xff, 0xff, 0x7f])]
    #[test_case(i32::MAX, &[0xff, 0xff, 0xff, 0xff, 0x07])]
    #[test_case(-1, &[0xff, 0xff, 0xff, 0xff, 0x0f])]
    #[test_case(i32::MIN, &[0x80, 0x80, 0x80, 0x80, 0x08])]
    fn test_var_int_encoding(value: i32, expected: &[u8]) {
        let mut buf = BytesMut::new();
        write_var_int(&mut buf, value);
        assert_eq!(&buf[..], expected);
        assert_eq!(var_int_len(value), expected.len());

        let mut slice = expected;
        assert_eq!(read_var_int(&mut slice).unwrap(), value);
        assert!(slice.is_empty());
    }

    #[test]
    fn test_var_int_too_long() {
        let mut data: &[u8] = &[0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        assert!(matches!(
            read_var_int(&mut data),
            Err(DecodeError::VarIntTooLong)
        ));
    }

    #[test]
    fn test_var_int_truncated() {
        let mut data: &[u8] = &[0x80, 0x80];
        assert!(matches!(
            read_var_int(&mut data),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    // ==========================================================================
    // VarLong
    // ==========================================================================

    #[test_case(0, &[0x00])]
    #[test_case(2147483648, &[0x80, 0x80, 0x80, 0x80, 0x08])]
    #[test_case(i64::MAX, &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f])]
    #[test_case(-1, &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01])]
    #[test_case(i64::MIN, &[0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01])]
    fn test_var_long_encoding(value: i64, expected: &[u8]) {
        let mut buf = BytesMut::new();
        write_var_long(&mut buf, value);
        assert_eq!(&buf[..], expected);

        let mut slice = expected;
        assert_eq!(read_var_long(&mut slice).unwrap(), value);
    }

    // ==========================================================================
    // Incremental decode
    // ==========================================================================

    #[test]
    fn test_peek_incomplete() {
        assert_eq!(peek_var_int(&[]).unwrap(), None);
        assert_eq!(peek_var_int(&[0xdd, 0xc7]).unwrap(), None);
    }

    #[test]
    fn test_peek_complete_ignores_trailing_bytes() {
        assert_eq!(
            peek_var_int(&[0xdd, 0xc7, 0x01, 0xaa]).unwrap(),
            Some((25565, 3))
        );
    }

    #[test]
    fn test_peek_too_long() {
        assert!(peek_var_int(&[0x80, 0x80, 0x80, 0x80, 0x80]).is_err());
    }
}
