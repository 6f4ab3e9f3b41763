//! IP and cellular packets: socket-style IPv4/IPv6 transport and SMS.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use xbeewire_addr::hexutil::encode_upper;

use crate::cursor::FieldCursor;
use crate::error::{PacketError, Result};
use crate::packet::Packet;
use crate::status::IpProtocol;
use crate::types::ApiFrameType;

fn decode_protocol(byte: u8) -> Result<IpProtocol> {
    IpProtocol::from_byte(byte).ok_or_else(|| PacketError::InvalidFieldValue {
        field: "IP protocol",
        reason: format!("{byte:#04x} is not UDP, TCP or TLS"),
    })
}

/// Phone number field of an SMS packet: up to 20 ASCII characters,
/// NUL-padded on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneNumber([u8; 20]);

impl PhoneNumber {
    /// Wire width in bytes.
    pub const WIDTH: usize = 20;

    /// Parses a number of up to 20 digits, with an optional leading `+`.
    pub fn new(number: &str) -> Result<Self> {
        let bytes = number.as_bytes();
        let valid = !bytes.is_empty()
            && bytes.len() <= Self::WIDTH
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| b.is_ascii_digit() || (i == 0 && *b == b'+'));
        if !valid {
            return Err(PacketError::InvalidFieldValue {
                field: "phone number",
                reason: format!("{number:?} is not up to 20 digits with an optional leading +"),
            });
        }
        let mut padded = [0u8; Self::WIDTH];
        padded[..bytes.len()].copy_from_slice(bytes);
        Ok(PhoneNumber(padded))
    }

    /// Builds a number from its wire bytes, unchecked.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        PhoneNumber(bytes)
    }

    /// Wire bytes, including any NUL padding.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// The number without wire padding.
    pub fn number(&self) -> String {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(Self::WIDTH);
        String::from_utf8_lossy(&self.0[..end]).into_owned()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.number())
    }
}

impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhoneNumber({self})")
    }
}

/// Transmit over an IPv4 socket (Wi-Fi and cellular firmware).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIpv4 {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Ipv4Addr,
    pub dest_port: u16,
    pub src_port: u16,
    pub protocol: IpProtocol,
    /// Raw options byte; bit 1 closes the TCP socket after transmission.
    pub options: u8,
    pub data: Vec<u8>,
}

impl TxIpv4 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        frame_id: u8,
        dest_addr: Ipv4Addr,
        dest_port: u16,
        src_port: u16,
        protocol: IpProtocol,
        options: u8,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            dest_port,
            src_port,
            protocol,
            options,
            data: data.into(),
        }
    }
}

impl Packet for TxIpv4 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TxIpv4;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.ipv4()?;
        let dest_port = cursor.u16_be()?;
        let src_port = cursor.u16_be()?;
        let protocol = decode_protocol(cursor.u8()?)?;
        let options = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            dest_port,
            src_port,
            protocol,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(11 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(&self.dest_addr.octets());
        out.extend_from_slice(&self.dest_port.to_be_bytes());
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.push(self.protocol.byte());
        out.push(self.options);
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
            ("destination", format!("{}:{}", self.dest_addr, self.dest_port)),
            ("source port", self.src_port.to_string()),
            ("protocol", self.protocol.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Data received over an IPv4 socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxIpv4 {
    pub src_addr: Ipv4Addr,
    pub dest_port: u16,
    pub src_port: u16,
    pub protocol: IpProtocol,
    /// Reserved status byte, kept verbatim.
    pub status: u8,
    pub data: Vec<u8>,
}

impl RxIpv4 {
    pub fn new(
        src_addr: Ipv4Addr,
        dest_port: u16,
        src_port: u16,
        protocol: IpProtocol,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            src_addr,
            dest_port,
            src_port,
            protocol,
            status: 0,
            data: data.into(),
        }
    }
}

impl Packet for RxIpv4 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RxIpv4;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.ipv4()?;
        let dest_port = cursor.u16_be()?;
        let src_port = cursor.u16_be()?;
        let protocol = decode_protocol(cursor.u8()?)?;
        let status = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_addr,
            dest_port,
            src_port,
            protocol,
            status,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(10 + self.data.len());
        out.extend_from_slice(&self.src_addr.octets());
        out.extend_from_slice(&self.dest_port.to_be_bytes());
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.push(self.protocol.byte());
        out.push(self.status);
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", format!("{}:{}", self.src_addr, self.src_port)),
            ("destination port", self.dest_port.to_string()),
            ("protocol", self.protocol.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Transmit over an IPv6 socket (Thread firmware).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIpv6 {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Ipv6Addr,
    pub dest_port: u16,
    pub src_port: u16,
    pub protocol: IpProtocol,
    /// Raw options byte.
    pub options: u8,
    pub data: Vec<u8>,
}

impl TxIpv6 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        frame_id: u8,
        dest_addr: Ipv6Addr,
        dest_port: u16,
        src_port: u16,
        protocol: IpProtocol,
        options: u8,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            dest_port,
            src_port,
            protocol,
            options,
            data: data.into(),
        }
    }
}

impl Packet for TxIpv6 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TxIpv6;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.ipv6()?;
        let dest_port = cursor.u16_be()?;
        let src_port = cursor.u16_be()?;
        let protocol = decode_protocol(cursor.u8()?)?;
        let options = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            dest_port,
            src_port,
            protocol,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(23 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(&self.dest_addr.octets());
        out.extend_from_slice(&self.dest_port.to_be_bytes());
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.push(self.protocol.byte());
        out.push(self.options);
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
            ("destination", format!("[{}]:{}", self.dest_addr, self.dest_port)),
            ("source port", self.src_port.to_string()),
            ("protocol", self.protocol.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Data received over an IPv6 socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxIpv6 {
    /// Local address the data arrived on.
    pub dest_addr: Ipv6Addr,
    pub src_addr: Ipv6Addr,
    pub dest_port: u16,
    pub src_port: u16,
    pub protocol: IpProtocol,
    /// Reserved status byte, kept verbatim.
    pub status: u8,
    pub data: Vec<u8>,
}

impl RxIpv6 {
    pub fn new(
        dest_addr: Ipv6Addr,
        src_addr: Ipv6Addr,
        dest_port: u16,
        src_port: u16,
        protocol: IpProtocol,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            dest_addr,
            src_addr,
            dest_port,
            src_port,
            protocol,
            status: 0,
            data: data.into(),
        }
    }
}

impl Packet for RxIpv6 {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RxIpv6;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let dest_addr = cursor.ipv6()?;
        let src_addr = cursor.ipv6()?;
        let dest_port = cursor.u16_be()?;
        let src_port = cursor.u16_be()?;
        let protocol = decode_protocol(cursor.u8()?)?;
        let status = cursor.u8()?;
        let data = cursor.rest().to_vec();
        Ok(Self {
            dest_addr,
            src_addr,
            dest_port,
            src_port,
            protocol,
            status,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(38 + self.data.len());
        out.extend_from_slice(&self.dest_addr.octets());
        out.extend_from_slice(&self.src_addr.octets());
        out.extend_from_slice(&self.dest_port.to_be_bytes());
        out.extend_from_slice(&self.src_port.to_be_bytes());
        out.push(self.protocol.byte());
        out.push(self.status);
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", format!("[{}]:{}", self.src_addr, self.src_port)),
            ("destination", format!("[{}]:{}", self.dest_addr, self.dest_port)),
            ("protocol", self.protocol.to_string()),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Send an SMS (cellular firmware).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxSms {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    /// Raw options byte, currently reserved.
    pub options: u8,
    pub phone_number: PhoneNumber,
    /// Message text bytes.
    pub data: Vec<u8>,
}

impl TxSms {
    pub fn new(frame_id: u8, phone_number: PhoneNumber, data: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            options: 0,
            phone_number,
            data: data.into(),
        }
    }
}

impl Packet for TxSms {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TxSms;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let options = cursor.u8()?;
        let mut number = [0u8; PhoneNumber::WIDTH];
        number.copy_from_slice(cursor.take(PhoneNumber::WIDTH)?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            options,
            phone_number: PhoneNumber::from_bytes(number),
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(22 + self.data.len());
        out.push(self.frame_id);
        out.push(self.options);
        out.extend_from_slice(self.phone_number.as_bytes());
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
            ("phone number", self.phone_number.to_string()),
            ("message", String::from_utf8_lossy(&self.data).into_owned()),
        ]
    }
}

/// SMS received by the modem (cellular firmware).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RxSms {
    pub phone_number: PhoneNumber,
    /// Message text bytes.
    pub data: Vec<u8>,
}

impl RxSms {
    pub fn new(phone_number: PhoneNumber, data: impl Into<Vec<u8>>) -> Self {
        Self {
            phone_number,
            data: data.into(),
        }
    }
}

impl Packet for RxSms {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RxSms;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let mut number = [0u8; PhoneNumber::WIDTH];
        number.copy_from_slice(cursor.take(PhoneNumber::WIDTH)?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            phone_number: PhoneNumber::from_bytes(number),
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(20 + self.data.len());
        out.extend_from_slice(self.phone_number.as_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("phone number", self.phone_number.to_string()),
            ("message", String::from_utf8_lossy(&self.data).into_owned()),
        ]
    }
}
