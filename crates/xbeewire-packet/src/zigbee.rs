//! Zigbee-specific packets: source routing and joining device registration.

use xbeewire_addr::hexutil::encode_upper;
use xbeewire_addr::{Addr16, Addr64};

use crate::cursor::FieldCursor;
use crate::error::{PacketError, Result};
use crate::options::ReceiveOptions;
use crate::packet::Packet;
use crate::types::ApiFrameType;

fn decode_hops(cursor: &mut FieldCursor<'_>) -> Result<Vec<Addr16>> {
    let count = cursor.u8()? as usize;
    let mut hops = Vec::with_capacity(count);
    for _ in 0..count {
        hops.push(cursor.addr16()?);
    }
    let leftover = cursor.remaining();
    if leftover != 0 {
        return Err(PacketError::InvalidFieldValue {
            field: "hop count",
            reason: format!("{leftover} bytes left after {count} hops"),
        });
    }
    Ok(hops)
}

fn encode_hops(hops: &[Addr16], out: &mut Vec<u8>) {
    out.push(hops.len() as u8);
    for hop in hops {
        out.extend_from_slice(hop.as_bytes());
    }
}

/// Route taken by a received packet, reported when `AR` is enabled.
///
/// Hops are listed from the node closest to the destination to the node
/// closest to the source, excluding both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRecordIndicator {
    pub src_addr: Addr64,
    pub src_addr16: Addr16,
    pub options: ReceiveOptions,
    pub hops: Vec<Addr16>,
}

impl RouteRecordIndicator {
    pub fn new(
        src_addr: Addr64,
        src_addr16: Addr16,
        options: ReceiveOptions,
        hops: impl Into<Vec<Addr16>>,
    ) -> Self {
        Self {
            src_addr,
            src_addr16,
            options,
            hops: hops.into(),
        }
    }
}

impl Packet for RouteRecordIndicator {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RouteRecordIndicator;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
        let src_addr16 = cursor.addr16()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let hops = decode_hops(&mut cursor)?;
        Ok(Self {
            src_addr,
            src_addr16,
            options,
            hops,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + 2 * self.hops.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(self.src_addr16.as_bytes());
        out.push(self.options.bits());
        encode_hops(&self.hops, &mut out);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        let route = self
            .hops
            .iter()
            .map(Addr16::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        vec![
            ("source", self.src_addr.to_string()),
            ("source (16-bit)", self.src_addr16.to_string()),
            ("hops", route),
        ]
    }
}

/// Store a source route for a destination ahead of a transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSourceRoute {
    /// No response exists for this frame; firmware expects zero.
    pub frame_id: u8,
    pub dest_addr: Addr64,
    /// 16-bit address hint, or [`Addr16::UNKNOWN`].
    pub dest_addr16: Addr16,
    /// Reserved route options byte, zero on current firmware.
    pub route_options: u8,
    /// Intermediate hops, closest to the destination first.
    pub hops: Vec<Addr16>,
}

impl CreateSourceRoute {
    pub fn new(dest_addr: Addr64, dest_addr16: Addr16, hops: impl Into<Vec<Addr16>>) -> Self {
        Self {
            frame_id: 0,
            dest_addr,
            dest_addr16,
            route_options: 0,
            hops: hops.into(),
        }
    }
}

impl Packet for CreateSourceRoute {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::CreateSourceRoute;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr64()?;
        let dest_addr16 = cursor.addr16()?;
        let route_options = cursor.u8()?;
        let hops = decode_hops(&mut cursor)?;
        Ok(Self {
            frame_id,
            dest_addr,
            dest_addr16,
            route_options,
            hops,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(13 + 2 * self.hops.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.extend_from_slice(self.dest_addr16.as_bytes());
        out.push(self.route_options);
        encode_hops(&self.hops, &mut out);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        let route = self
            .hops
            .iter()
            .map(Addr16::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        vec![
            ("destination", self.dest_addr.to_string()),
            ("destination (16-bit)", self.dest_addr16.to_string()),
            ("hops", route),
        ]
    }
}

/// Register a joining device's link key or install code with the trust
/// center. An empty key deregisters the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterJoiningDevice {
    /// Correlates the register device status; zero suppresses it.
    pub frame_id: u8,
    /// Address of the device being registered.
    pub registrant_addr: Addr64,
    /// Key material kind: 0 for a link key, 1 for an install code.
    pub options: u8,
    /// Link key (16 bytes), install code with CRC, or empty to deregister.
    pub key: Vec<u8>,
}

impl RegisterJoiningDevice {
    pub fn new(frame_id: u8, registrant_addr: Addr64, options: u8, key: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            registrant_addr,
            options,
            key: key.into(),
        }
    }
}

impl Packet for RegisterJoiningDevice {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RegisterJoiningDevice;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let registrant_addr = cursor.addr64()?;
        // Reserved 16-bit address field, always 0xFFFE.
        let _ = cursor.addr16()?;
        let options = cursor.u8()?;
        let key = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            registrant_addr,
            options,
            key,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.key.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.registrant_addr.as_bytes());
        out.extend_from_slice(Addr16::UNKNOWN.as_bytes());
        out.push(self.options);
        out.extend_from_slice(&self.key);
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
            ("registrant", self.registrant_addr.to_string()),
            ("options", format!("{:#04x}", self.options)),
            ("key", format!("{} bytes", self.key.len())),
        ]
    }
}

/// Outcome of a [`RegisterJoiningDevice`] request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDeviceStatus {
    /// Frame ID of the request this answers.
    pub frame_id: u8,
    /// Raw status byte; zero means success.
    pub status: u8,
}

impl RegisterDeviceStatus {
    pub fn new(frame_id: u8, status: u8) -> Self {
        Self { frame_id, status }
    }

    /// True when the registration was accepted.
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl Packet for RegisterDeviceStatus {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RegisterDeviceStatus;

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
