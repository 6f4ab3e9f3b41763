//! The generic packet: an opaque payload behind the `0xFF` frame type.

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::packet::Packet;
use crate::types::ApiFrameType;

/// Application-defined payload carried under the generic frame type.
///
/// The data round-trips unparsed; the `0xFF` tag says nothing about the
/// payload shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generic {
    pub data: Vec<u8>,
}

impl Generic {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl Packet for Generic {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Generic;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            data: cursor.rest().to_vec(),
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![("data", encode_upper(&self.data))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_payload_round_trips() {
        let packet = Generic::new(vec![0x00, 0x7E, 0xFF]);
        assert_eq!(packet.frame_data(), [0xFF, 0x00, 0x7E, 0xFF]);
        assert_eq!(
            Generic::from_frame_data(&packet.frame_data()).unwrap(),
            packet
        );
    }

    #[test]
    fn empty_payload_is_valid() {
        let packet = Generic::decode_payload(&[]).unwrap();
        assert!(packet.data.is_empty());
    }
}
