//! Wi-Fi (S6B) packets. These firmware versions address nodes by IPv4
//! address carried in an 8-byte field whose upper half is zero.

use std::net::Ipv4Addr;

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::options::{ReceiveOptions, RemoteAtOptions};
use crate::packet::Packet;
use crate::status::AtCommandStatus;
use crate::types::{ApiFrameType, AtCmd};

fn put_padded_ipv4(addr: Ipv4Addr, out: &mut Vec<u8>) {
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&addr.octets());
}

/// AT command addressed to a remote Wi-Fi node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAtCommandWifi {
    /// Correlates the command response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Ipv4Addr,
    pub options: RemoteAtOptions,
    pub cmd: AtCmd,
    pub parameter: Vec<u8>,
}

impl RemoteAtCommandWifi {
    pub fn new(
        frame_id: u8,
        dest_addr: Ipv4Addr,
        options: RemoteAtOptions,
        cmd: AtCmd,
        parameter: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            options,
            cmd,
            parameter: parameter.into(),
        }
    }
}

impl Packet for RemoteAtCommandWifi {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RemoteAtCommandWifi;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.ipv4_padded()?;
        let options = RemoteAtOptions::from_bits_retain(cursor.u8()?);
        let cmd = cursor.at_cmd()?;
        let parameter = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            options,
            cmd,
            parameter,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.parameter.len());
        out.push(self.frame_id);
        put_padded_ipv4(self.dest_addr, &mut out);
        out.push(self.options.bits());
        out.extend_from_slice(self.cmd.as_bytes());
        out.extend_from_slice(&self.parameter);
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
            ("destination", self.dest_addr.to_string()),
            ("command", self.cmd.to_string()),
            ("parameter", encode_upper(&self.parameter)),
        ]
    }
}

/// Response to a [`RemoteAtCommandWifi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAtCommandResponseWifi {
    /// Frame ID of the command this answers.
    pub frame_id: u8,
    pub src_addr: Ipv4Addr,
    pub cmd: AtCmd,
    /// Raw status byte as received.
    pub status: u8,
    /// Register value for queries; usually empty for sets.
    pub value: Vec<u8>,
}

impl RemoteAtCommandResponseWifi {
    pub fn new(
        frame_id: u8,
        src_addr: Ipv4Addr,
        cmd: AtCmd,
        status: u8,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            src_addr,
            cmd,
            status,
            value: value.into(),
        }
    }

    /// Interpreted view of the status byte.
    pub fn command_status(&self) -> AtCommandStatus {
        AtCommandStatus::from_byte(self.status)
    }
}

impl Packet for RemoteAtCommandResponseWifi {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RemoteAtCommandResponseWifi;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let src_addr = cursor.ipv4_padded()?;
        let cmd = cursor.at_cmd()?;
        let status = cursor.u8()?;
        let value = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            src_addr,
            cmd,
            status,
            value,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.value.len());
        out.push(self.frame_id);
        put_padded_ipv4(self.src_addr, &mut out);
        out.extend_from_slice(self.cmd.as_bytes());
        out.push(self.status);
        out.extend_from_slice(&self.value);
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
            ("source", self.src_addr.to_string()),
            ("command", self.cmd.to_string()),
            ("status", self.command_status().to_string()),
            ("value", encode_upper(&self.value)),
        ]
    }
}

/// I/O data sample pushed by a remote Wi-Fi node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoDataSampleRxIndicatorWifi {
    pub src_addr: Ipv4Addr,
    /// Signal strength of the received frame, in -dBm.
    pub rssi: u8,
    /// Raw receive options byte.
    pub options: ReceiveOptions,
    /// Raw sample bytes; at least one is required.
    pub data: Vec<u8>,
}

impl IoDataSampleRxIndicatorWifi {
    pub fn new(
        src_addr: Ipv4Addr,
        rssi: u8,
        options: ReceiveOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            src_addr,
            rssi,
            options,
            data: data.into(),
        }
    }
}

impl Packet for IoDataSampleRxIndicatorWifi {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::IoDataSampleRxIndicatorWifi;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.ipv4_padded()?;
        let rssi = cursor.u8()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest_nonempty()?.to_vec();
        Ok(Self {
            src_addr,
            rssi,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.data.len());
        put_padded_ipv4(self.src_addr, &mut out);
        out.push(self.rssi);
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("RSSI", format!("-{} dBm", self.rssi)),
            ("sample data", encode_upper(&self.data)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn remote_wifi_command_pads_address() {
        let packet = RemoteAtCommandWifi::new(
            0x01,
            Ipv4Addr::new(192, 168, 1, 20),
            RemoteAtOptions::APPLY_CHANGES,
            AtCmd::new("D0").unwrap(),
            vec![0x05],
        );
        let payload = packet.encode_payload();
        assert_eq!(&payload[1..9], hex!("00000000 C0A80114"));
        assert_eq!(RemoteAtCommandWifi::decode_payload(&payload).unwrap(), packet);
    }

    #[test]
    fn wifi_response_parses_value() {
        let payload = hex!("01 00000000 C0A80114 4D59 00 0B");
        let packet = RemoteAtCommandResponseWifi::decode_payload(&payload).unwrap();
        assert_eq!(packet.src_addr, Ipv4Addr::new(192, 168, 1, 20));
        assert_eq!(packet.cmd, AtCmd::new("MY").unwrap());
        assert_eq!(packet.command_status(), AtCommandStatus::Ok);
        assert_eq!(packet.value, [0x0B]);
    }

    #[test]
    fn wifi_io_sample_requires_sample_bytes() {
        let err =
            IoDataSampleRxIndicatorWifi::decode_payload(&hex!("00000000 C0A80114 30 00")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PacketError::IncompleteFrame { minimum: 11, .. }
        ));
    }
}
