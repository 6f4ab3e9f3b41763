//! User data relay packets: moving bytes between the module's local
//! interfaces (serial, Bluetooth, MicroPython) without going over the air.

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::packet::Packet;
use crate::status::RelayInterface;
use crate::types::ApiFrameType;

/// Send data to another local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataRelay {
    /// Correlates a transmit status on failure; zero suppresses it.
    pub frame_id: u8,
    pub dest_interface: RelayInterface,
    pub data: Vec<u8>,
}

impl UserDataRelay {
    pub fn new(frame_id: u8, dest_interface: RelayInterface, data: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            dest_interface,
            data: data.into(),
        }
    }
}

impl Packet for UserDataRelay {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::UserDataRelay;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_interface = RelayInterface::from_byte(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_interface,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.data.len());
        out.push(self.frame_id);
        out.push(self.dest_interface.byte());
        out.extend_from_slice(&self.data);
        out
    }

    fn needs_frame_id(&self) -> bool {
        true
    }

    fn frame_id(&self) -> Option<u8> {
        Some(self.frame_id)
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("frame ID", format!("{:#04x}", self.frame_id)),
            ("destination interface", self.dest_interface.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Data relayed from another local interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataRelayOutput {
    pub src_interface: RelayInterface,
    pub data: Vec<u8>,
}

impl UserDataRelayOutput {
    pub fn new(src_interface: RelayInterface, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src_interface,
            data: data.into(),
        }
    }
}

impl Packet for UserDataRelayOutput {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::UserDataRelayOutput;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_interface = RelayInterface::from_byte(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_interface,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.data.len());
        out.push(self.src_interface.byte());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source interface", self.src_interface.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}
