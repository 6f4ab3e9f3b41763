//! Type-length-value elements.
//!
//! Bluetooth advertisement payloads (and several newer module surfaces)
//! carry back-to-back TLV elements: a type tag, a length, then that many
//! value bytes. A length byte of `0xFF` means the real length follows as a
//! 16-bit big-endian field.

use crate::error::{PacketError, Result};

/// Marker in the length byte meaning "extended 16-bit length follows".
pub const EXTENDED_LENGTH_MARKER: u8 = 0xFF;

/// Smallest wire size of a single element.
pub const MIN_TLV_WIRE_LEN: usize = 3;

/// One type-length-value element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    /// Element type tag.
    pub tlv_type: u8,
    /// Element value bytes.
    pub value: Vec<u8>,
}

impl Tlv {
    /// Builds an element, rejecting values a 16-bit length cannot express.
    pub fn new(tlv_type: u8, value: impl Into<Vec<u8>>) -> Result<Self> {
        let value = value.into();
        if value.len() > u16::MAX as usize {
            return Err(PacketError::InvalidFieldValue {
                field: "TLV value",
                reason: format!("{} bytes does not fit a 16-bit length", value.len()),
            });
        }
        Ok(Tlv { tlv_type, value })
    }

    /// Wire size of this element.
    pub fn wire_len(&self) -> usize {
        if self.value.len() >= EXTENDED_LENGTH_MARKER as usize {
            4 + self.value.len()
        } else {
            2 + self.value.len()
        }
    }

    /// Encodes this element.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.wire_len());
        out.push(self.tlv_type);
        if self.value.len() >= EXTENDED_LENGTH_MARKER as usize {
            out.push(EXTENDED_LENGTH_MARKER);
            out.extend_from_slice(&(self.value.len() as u16).to_be_bytes());
        } else {
            out.push(self.value.len() as u8);
        }
        out.extend_from_slice(&self.value);
        out
    }

    /// Decodes one element from the front of `buf`.
    ///
    /// Returns the element and the number of bytes it spanned, so a caller
    /// can walk a stream of elements.
    pub fn decode_one(buf: &[u8]) -> Result<(Tlv, usize)> {
        if buf.len() < MIN_TLV_WIRE_LEN {
            return Err(PacketError::TlvTooShort { len: buf.len() });
        }
        let tlv_type = buf[0];
        let (declared, header) = if buf[1] == EXTENDED_LENGTH_MARKER {
            if buf.len() < 4 {
                return Err(PacketError::TlvTooShort { len: buf.len() });
            }
            (u16::from_be_bytes([buf[2], buf[3]]) as usize, 4)
        } else {
            (buf[1] as usize, 2)
        };
        let available = buf.len() - header;
        if declared > available {
            return Err(PacketError::TlvOverrun {
                declared,
                available,
            });
        }
        let value = buf[header..header + declared].to_vec();
        Ok((Tlv { tlv_type, value }, header + declared))
    }

    /// Decodes back-to-back elements until the buffer is exhausted.
    pub fn decode_all(buf: &[u8]) -> Result<Vec<Tlv>> {
        let mut out = Vec::new();
        let mut rest = buf;
        while !rest.is_empty() {
            let (tlv, used) = Self::decode_one(rest)?;
            rest = &rest[used..];
            out.push(tlv);
        }
        Ok(out)
    }

    /// Encodes a sequence of elements back to back.
    pub fn encode_all(tlvs: &[Tlv]) -> Vec<u8> {
        let mut out = Vec::with_capacity(tlvs.iter().map(Tlv::wire_len).sum());
        for tlv in tlvs {
            out.extend_from_slice(&tlv.encode());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn decode_one_simple_element() {
        let (tlv, used) = Tlv::decode_one(&hex!("01 02 AA BB")).unwrap();
        assert_eq!(tlv.tlv_type, 0x01);
        assert_eq!(tlv.value, hex!("AA BB"));
        assert_eq!(used, 4);
    }

    #[test]
    fn two_bytes_are_too_short() {
        let err = Tlv::decode_one(&hex!("01 02")).unwrap_err();
        assert!(matches!(err, PacketError::TlvTooShort { len: 2 }));
    }

    #[test]
    fn declared_length_beyond_buffer_is_an_overrun() {
        let err = Tlv::decode_one(&hex!("01 05 AA")).unwrap_err();
        assert!(matches!(
            err,
            PacketError::TlvOverrun {
                declared: 5,
                available: 1
            }
        ));
    }

    #[test]
    fn extended_length_marker_reads_sixteen_bit_length() {
        let mut wire = hex!("09 FF 01 00").to_vec();
        wire.extend(vec![0x42u8; 256]);
        let (tlv, used) = Tlv::decode_one(&wire).unwrap();
        assert_eq!(tlv.tlv_type, 0x09);
        assert_eq!(tlv.value.len(), 256);
        assert_eq!(used, 4 + 256);
    }

    #[test]
    fn long_values_encode_with_the_marker() {
        let tlv = Tlv::new(0x09, vec![0x42u8; 255]).unwrap();
        let wire = tlv.encode();
        assert_eq!(&wire[..4], &hex!("09 FF 00 FF"));
        assert_eq!(wire.len(), tlv.wire_len());

        let (decoded, used) = Tlv::decode_one(&wire).unwrap();
        assert_eq!(decoded, tlv);
        assert_eq!(used, wire.len());
    }

    #[test]
    fn short_values_use_the_single_length_byte() {
        let tlv = Tlv::new(0x01, hex!("AA BB")).unwrap();
        assert_eq!(tlv.encode(), hex!("01 02 AA BB"));
    }

    #[test]
    fn decode_all_walks_back_to_back_elements() {
        let tlvs = Tlv::decode_all(&hex!("01 02 AA BB 09 01 CC")).unwrap();
        assert_eq!(tlvs.len(), 2);
        assert_eq!(tlvs[0].value, hex!("AA BB"));
        assert_eq!(tlvs[1].tlv_type, 0x09);
    }

    #[test]
    fn decode_all_fails_on_a_truncated_tail() {
        let err = Tlv::decode_all(&hex!("01 02 AA BB 09 01")).unwrap_err();
        assert!(matches!(err, PacketError::TlvTooShort { .. }));
    }

    #[test]
    fn decode_all_of_empty_buffer_is_empty() {
        assert!(Tlv::decode_all(&[]).unwrap().is_empty());
    }

    #[test]
    fn encode_all_concatenates() {
        let a = Tlv::new(0x01, hex!("AA")).unwrap();
        let b = Tlv::new(0x02, hex!("BB CC")).unwrap();
        assert_eq!(
            Tlv::encode_all(&[a, b]),
            hex!("01 01 AA 02 02 BB CC").to_vec()
        );
    }

    #[test]
    fn oversized_value_is_rejected_at_construction() {
        let err = Tlv::new(0x01, vec![0u8; 70_000]).unwrap_err();
        assert!(matches!(err, PacketError::InvalidFieldValue { .. }));
    }
}
