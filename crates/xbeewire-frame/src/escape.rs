//! Control-byte escaping for escaped API mode (`AP=2`).
//!
//! Four byte values have meaning to the serial layer and must not appear
//! raw inside a frame: the delimiter, the escape introducer, and the two
//! software flow control bytes. Each is transmitted as the escape introducer
//! followed by the value XORed with `0x20`. The leading frame delimiter
//! itself is never escaped.

use bytes::{BufMut, BytesMut};

use crate::error::{FrameError, Result};

/// XOR mask applied to the byte following an escape introducer.
pub const ESCAPE_XOR: u8 = 0x20;

/// Byte values that are escaped inside a frame in escaped API mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SpecialByte {
    /// Software flow control resume.
    Xon = 0x11,
    /// Software flow control pause.
    Xoff = 0x13,
    /// Escape introducer.
    Escape = 0x7D,
    /// Start-of-frame delimiter.
    FrameDelimiter = 0x7E,
}

impl SpecialByte {
    /// Looks up the special byte with this wire value.
    pub fn from_byte(byte: u8) -> Option<SpecialByte> {
        match byte {
            0x11 => Some(SpecialByte::Xon),
            0x13 => Some(SpecialByte::Xoff),
            0x7D => Some(SpecialByte::Escape),
            0x7E => Some(SpecialByte::FrameDelimiter),
            _ => None,
        }
    }

    /// True when `byte` needs escaping on the wire.
    pub fn is_special(byte: u8) -> bool {
        Self::from_byte(byte).is_some()
    }
}

/// Appends `src` to `dst`, escaping every special byte.
pub fn escape_into(src: &[u8], dst: &mut BytesMut) {
    for &byte in src {
        if SpecialByte::is_special(byte) {
            dst.put_u8(SpecialByte::Escape as u8);
            dst.put_u8(byte ^ ESCAPE_XOR);
        } else {
            dst.put_u8(byte);
        }
    }
}

/// Escapes `src` into a fresh buffer.
pub fn escape(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for &byte in src {
        if SpecialByte::is_special(byte) {
            out.push(SpecialByte::Escape as u8);
            out.push(byte ^ ESCAPE_XOR);
        } else {
            out.push(byte);
        }
    }
    out
}

/// Removes escaping from a complete escaped run.
///
/// A run ending on a lone escape introducer fails with
/// [`FrameError::TruncatedEscape`]. The streaming decoder never produces
/// that condition (it waits for the following byte instead); this is for
/// callers working on buffers they know to be complete.
pub fn unescape(src: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(src.len());
    let mut iter = src.iter();
    while let Some(&byte) = iter.next() {
        if byte == SpecialByte::Escape as u8 {
            match iter.next() {
                Some(&escaped) => out.push(escaped ^ ESCAPE_XOR),
                None => return Err(FrameError::TruncatedEscape),
            }
        } else {
            out.push(byte);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn special_bytes_are_escaped() {
        assert_eq!(escape(&hex!("7E")), hex!("7D 5E"));
        assert_eq!(escape(&hex!("7D")), hex!("7D 5D"));
        assert_eq!(escape(&hex!("11")), hex!("7D 31"));
        assert_eq!(escape(&hex!("13")), hex!("7D 33"));
    }

    #[test]
    fn plain_bytes_pass_through() {
        let data = hex!("00 01 7F 23 FF");
        assert_eq!(escape(&data), data);
    }

    #[test]
    fn unescape_reverses_escape() {
        let data = hex!("7E 00 04 08 01 4E 49 5F");
        assert_eq!(unescape(&escape(&data)).unwrap(), data);
    }

    #[test]
    fn lone_trailing_escape_is_an_error() {
        let err = unescape(&hex!("23 7D")).unwrap_err();
        assert!(matches!(err, FrameError::TruncatedEscape));
    }

    #[test]
    fn escape_into_matches_escape() {
        let data = hex!("7E 42 11");
        let mut buf = BytesMut::new();
        escape_into(&data, &mut buf);
        assert_eq!(buf.as_ref(), escape(&data).as_slice());
    }

    proptest! {
        #[test]
        fn roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(unescape(&escape(&data)).unwrap(), data);
        }

        #[test]
        fn escaped_output_has_no_raw_special_bytes(
            data in proptest::collection::vec(any::<u8>(), 0..512),
        ) {
            let escaped = escape(&data);
            let mut i = 0;
            while i < escaped.len() {
                if escaped[i] == SpecialByte::Escape as u8 {
                    // Introducer plus payload byte; the pair is opaque.
                    i += 2;
                } else {
                    prop_assert!(!SpecialByte::is_special(escaped[i]));
                    i += 1;
                }
            }
        }
    }
}
