//! 802.15.4 ("raw") packets: the original 64/16-bit addressed TX/RX set.

use xbeewire_addr::hexutil::encode_upper;
use xbeewire_addr::{Addr16, Addr64};

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::options::{ReceiveOptions, TransmitOptions};
use crate::packet::Packet;
use crate::types::ApiFrameType;

/// Transmit request with 64-bit addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx64Request {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Addr64,
    pub options: TransmitOptions,
    pub data: Vec<u8>,
}

impl Tx64Request {
    pub fn new(
        frame_id: u8,
        dest_addr: Addr64,
        options: TransmitOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            options,
            data: data.into(),
        }
    }
}

impl Packet for Tx64Request {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Tx64Request;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr64()?;
        let options = TransmitOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.push(self.options.bits());
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
            ("destination", self.dest_addr.to_string()),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Transmit request with 16-bit addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tx16Request {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Addr16,
    pub options: TransmitOptions,
    pub data: Vec<u8>,
}

impl Tx16Request {
    pub fn new(
        frame_id: u8,
        dest_addr: Addr16,
        options: TransmitOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            options,
            data: data.into(),
        }
    }
}

impl Packet for Tx16Request {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Tx16Request;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr16()?;
        let options = TransmitOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.push(self.options.bits());
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
            ("destination", self.dest_addr.to_string()),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Received packet with 64-bit source addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rx64 {
    pub src_addr: Addr64,
    /// Signal strength of the received frame, in -dBm.
    pub rssi: u8,
    pub options: ReceiveOptions,
    pub data: Vec<u8>,
}

impl Rx64 {
    pub fn new(src_addr: Addr64, rssi: u8, options: ReceiveOptions, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src_addr,
            rssi,
            options,
            data: data.into(),
        }
    }

    /// True when the frame arrived as an address or PAN broadcast.
    pub fn is_broadcast(&self) -> bool {
        self.options
            .intersects(ReceiveOptions::BROADCAST_PACKET | ReceiveOptions::PAN_BROADCAST)
    }
}

impl Packet for Rx64 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Rx64;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
        let rssi = cursor.u8()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_addr,
            rssi,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.push(self.rssi);
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("RSSI", format!("-{} dBm", self.rssi)),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Received packet with 16-bit source addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rx16 {
    pub src_addr: Addr16,
    /// Signal strength of the received frame, in -dBm.
    pub rssi: u8,
    pub options: ReceiveOptions,
    pub data: Vec<u8>,
}

impl Rx16 {
    pub fn new(src_addr: Addr16, rssi: u8, options: ReceiveOptions, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src_addr,
            rssi,
            options,
            data: data.into(),
        }
    }

    /// True when the frame arrived as an address or PAN broadcast.
    pub fn is_broadcast(&self) -> bool {
        self.options
            .intersects(ReceiveOptions::BROADCAST_PACKET | ReceiveOptions::PAN_BROADCAST)
    }
}

impl Packet for Rx16 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Rx16;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr16()?;
        let rssi = cursor.u8()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_addr,
            rssi,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.push(self.rssi);
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("RSSI", format!("-{} dBm", self.rssi)),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// I/O data sample with 64-bit source addressing.
///
/// The sample bytes are carried raw; interpreting channel masks is left to
/// the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rx64IoSample {
    pub src_addr: Addr64,
    /// Signal strength of the received frame, in -dBm.
    pub rssi: u8,
    pub options: ReceiveOptions,
    /// Raw sample bytes; at least one is required.
    pub data: Vec<u8>,
}

impl Rx64IoSample {
    pub fn new(src_addr: Addr64, rssi: u8, options: ReceiveOptions, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src_addr,
            rssi,
            options,
            data: data.into(),
        }
    }
}

impl Packet for Rx64IoSample {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Rx64IoSample;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
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
        out.extend_from_slice(self.src_addr.as_bytes());
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

/// I/O data sample with 16-bit source addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rx16IoSample {
    pub src_addr: Addr16,
    /// Signal strength of the received frame, in -dBm.
    pub rssi: u8,
    pub options: ReceiveOptions,
    /// Raw sample bytes; at least one is required.
    pub data: Vec<u8>,
}

impl Rx16IoSample {
    pub fn new(src_addr: Addr16, rssi: u8, options: ReceiveOptions, data: impl Into<Vec<u8>>) -> Self {
        Self {
            src_addr,
            rssi,
            options,
            data: data.into(),
        }
    }
}

impl Packet for Rx16IoSample {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Rx16IoSample;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr16()?;
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
        let mut out = Vec::with_capacity(4 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
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

/// Transmit status for a 64/16-bit addressed transmit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatus {
    /// Frame ID of the transmit request this answers.
    pub frame_id: u8,
    /// Raw delivery status byte; zero means success.
    pub status: u8,
}

impl TxStatus {
    pub fn new(frame_id: u8, status: u8) -> Self {
        Self { frame_id, status }
    }

    /// True when the transmission was delivered.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl Packet for TxStatus {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TxStatus;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            frame_id: cursor.u8()?,
            status: cursor.u8()?,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        vec![self.frame_id, self.status]
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
            ("status", format!("{:#04x}", self.status)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn tx64_round_trips() {
        let packet = Tx64Request::new(
            0x01,
            Addr64::new(0x0013_A200_4052_2BAA),
            TransmitOptions::DISABLE_ACK,
            *b"hello",
        );
        let payload = packet.encode_payload();
        assert_eq!(&payload[..9], &hex!("01 0013A20040522BAA"));
        assert_eq!(payload[9], 0x01);
        assert_eq!(Tx64Request::decode_payload(&payload).unwrap(), packet);
    }

    #[test]
    fn rx16_parses_fields_in_order() {
        let packet = Rx16::decode_payload(&hex!("52 1A 28 02 AB CD")).unwrap();
        assert_eq!(packet.src_addr, Addr16::new(0x521A));
        assert_eq!(packet.rssi, 0x28);
        assert!(packet.options.contains(ReceiveOptions::BROADCAST_PACKET));
        assert_eq!(packet.data, hex!("AB CD"));
    }

    #[test]
    fn rx64_empty_data_is_allowed() {
        let packet = Rx64::decode_payload(&hex!("0013A20040522BAA 30 00")).unwrap();
        assert!(packet.data.is_empty());
    }

    #[test]
    fn io_sample_requires_sample_bytes() {
        let err = Rx64IoSample::decode_payload(&hex!("0013A20040522BAA 30 00")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PacketError::IncompleteFrame { minimum: 11, .. }
        ));
        let ok = Rx64IoSample::decode_payload(&hex!("0013A20040522BAA 30 00 01")).unwrap();
        assert_eq!(ok.data, [0x01]);
    }

    #[test]
    fn truncated_tx64_reports_shortfall() {
        let err = Tx64Request::decode_payload(&hex!("01 00 13")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::PacketError::IncompleteFrame { minimum: 9, actual: 3, .. }
        ));
    }

    #[test]
    fn tx_status_success_flag() {
        assert!(TxStatus::new(1, 0).is_success());
        assert!(!TxStatus::new(1, 0x21).is_success());
    }

    #[test]
    fn pan_broadcast_counts_as_broadcast() {
        let rx = Rx16::new(
            Addr16::new(1),
            40,
            ReceiveOptions::PAN_BROADCAST,
            Vec::new(),
        );
        assert!(rx.is_broadcast());
    }
}
