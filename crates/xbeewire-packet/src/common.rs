//! Packets shared across Zigbee, DigiMesh and 802.15.4 firmware: AT
//! commands, transmit/receive, explicit addressing and modem status.

use xbeewire_addr::hexutil::encode_upper;
use xbeewire_addr::{Addr16, Addr64};

use crate::cursor::FieldCursor;
use crate::error::Result;
use crate::options::{ReceiveOptions, RemoteAtOptions, TransmitOptions};
use crate::packet::Packet;
use crate::status::{AtCommandStatus, ModemStatusEvent};
use crate::types::{ApiFrameType, AtCmd};

/// Local AT command, applied immediately.
///
/// An empty parameter queries the current value; a non-empty one sets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommand {
    /// Correlates the command response; zero suppresses it.
    pub frame_id: u8,
    pub cmd: AtCmd,
    pub parameter: Vec<u8>,
}

impl AtCommand {
    pub fn new(frame_id: u8, cmd: AtCmd, parameter: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            cmd,
            parameter: parameter.into(),
        }
    }

    /// Command with no parameter, reading the current value.
    pub fn query(frame_id: u8, cmd: AtCmd) -> Self {
        Self::new(frame_id, cmd, Vec::new())
    }
}

impl Packet for AtCommand {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::AtCommand;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let cmd = cursor.at_cmd()?;
        let parameter = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            cmd,
            parameter,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.parameter.len());
        out.push(self.frame_id);
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
            ("command", self.cmd.to_string()),
            ("parameter", encode_upper(&self.parameter)),
        ]
    }
}

/// Local AT command, queued until an `AC` or applying command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommandQueue {
    /// Correlates the command response; zero suppresses it.
    pub frame_id: u8,
    pub cmd: AtCmd,
    pub parameter: Vec<u8>,
}

impl AtCommandQueue {
    pub fn new(frame_id: u8, cmd: AtCmd, parameter: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            cmd,
            parameter: parameter.into(),
        }
    }
}

impl Packet for AtCommandQueue {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::AtCommandQueue;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let cmd = cursor.at_cmd()?;
        let parameter = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            cmd,
            parameter,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(3 + self.parameter.len());
        out.push(self.frame_id);
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
            ("command", self.cmd.to_string()),
            ("parameter", encode_upper(&self.parameter)),
        ]
    }
}

/// Response to a local AT command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtCommandResponse {
    /// Frame ID of the command this answers.
    pub frame_id: u8,
    pub cmd: AtCmd,
    /// Raw status byte as received; see [`AtCommandResponse::command_status`].
    pub status: u8,
    /// Register value for queries; usually empty for sets.
    pub value: Vec<u8>,
}

impl AtCommandResponse {
    pub fn new(frame_id: u8, cmd: AtCmd, status: u8, value: impl Into<Vec<u8>>) -> Self {
        Self {
            frame_id,
            cmd,
            status,
            value: value.into(),
        }
    }

    /// Interpreted view of the status byte.
    pub fn command_status(&self) -> AtCommandStatus {
        AtCommandStatus::from_byte(self.status)
    }

    /// True when the command was accepted.
    pub fn is_ok(&self) -> bool {
        self.command_status() == AtCommandStatus::Ok
    }
}

impl Packet for AtCommandResponse {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::AtCommandResponse;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let cmd = cursor.at_cmd()?;
        let status = cursor.u8()?;
        let value = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            cmd,
            status,
            value,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.value.len());
        out.push(self.frame_id);
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
            ("command", self.cmd.to_string()),
            ("status", self.command_status().to_string()),
            ("value", encode_upper(&self.value)),
        ]
    }
}

/// Unsolicited modem state report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModemStatus {
    /// Raw status byte as received; see [`ModemStatus::event`].
    pub status: u8,
}

impl ModemStatus {
    pub fn new(status: u8) -> Self {
        Self { status }
    }

    /// Interpreted view of the status byte.
    pub fn event(&self) -> ModemStatusEvent {
        ModemStatusEvent::from_byte(self.status)
    }
}

impl Packet for ModemStatus {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::ModemStatus;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            status: cursor.u8()?,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        vec![self.status]
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![("status", self.event().to_string())]
    }
}

/// Transmit request for Zigbee and DigiMesh firmware.
///
/// Send to a 64-bit address, with [`Addr16::UNKNOWN`] as the 16-bit hint
/// when the network address is not known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitRequest {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Addr64,
    /// 16-bit address hint, or [`Addr16::UNKNOWN`].
    pub dest_addr16: Addr16,
    /// Maximum hops for a broadcast; zero means the network maximum.
    pub broadcast_radius: u8,
    pub options: TransmitOptions,
    pub data: Vec<u8>,
}

impl TransmitRequest {
    pub fn new(
        frame_id: u8,
        dest_addr: Addr64,
        dest_addr16: Addr16,
        broadcast_radius: u8,
        options: TransmitOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            dest_addr16,
            broadcast_radius,
            options,
            data: data.into(),
        }
    }

    /// Unicast to a 64-bit address with default routing.
    pub fn unicast(frame_id: u8, dest_addr: Addr64, data: impl Into<Vec<u8>>) -> Self {
        Self::new(
            frame_id,
            dest_addr,
            Addr16::UNKNOWN,
            0,
            TransmitOptions::empty(),
            data,
        )
    }

    /// Broadcast to every node on the network.
    pub fn broadcast(frame_id: u8, data: impl Into<Vec<u8>>) -> Self {
        Self::new(
            frame_id,
            Addr64::BROADCAST,
            Addr16::UNKNOWN,
            0,
            TransmitOptions::empty(),
            data,
        )
    }
}

impl Packet for TransmitRequest {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TransmitRequest;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr64()?;
        let dest_addr16 = cursor.addr16()?;
        let broadcast_radius = cursor.u8()?;
        let options = TransmitOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            dest_addr16,
            broadcast_radius,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(13 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.extend_from_slice(self.dest_addr16.as_bytes());
        out.push(self.broadcast_radius);
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
            ("destination (16-bit)", self.dest_addr16.to_string()),
            ("broadcast radius", self.broadcast_radius.to_string()),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Delivery report for a [`TransmitRequest`] or [`ExplicitAddressing`] frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitStatus {
    /// Frame ID of the transmit request this answers.
    pub frame_id: u8,
    /// 16-bit address the packet was actually delivered to.
    pub dest_addr16: Addr16,
    /// Application retries used by the delivery.
    pub retry_count: u8,
    /// Raw delivery status byte; zero means success.
    pub delivery_status: u8,
    /// Raw route discovery status byte.
    pub discovery_status: u8,
}

impl TransmitStatus {
    pub fn new(
        frame_id: u8,
        dest_addr16: Addr16,
        retry_count: u8,
        delivery_status: u8,
        discovery_status: u8,
    ) -> Self {
        Self {
            frame_id,
            dest_addr16,
            retry_count,
            delivery_status,
            discovery_status,
        }
    }

    /// True when the transmission was delivered.
    pub fn is_success(&self) -> bool {
        self.delivery_status == 0
    }
}

impl Packet for TransmitStatus {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::TransmitStatus;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        Ok(Self {
            frame_id: cursor.u8()?,
            dest_addr16: cursor.addr16()?,
            retry_count: cursor.u8()?,
            delivery_status: cursor.u8()?,
            discovery_status: cursor.u8()?,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(6);
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr16.as_bytes());
        out.push(self.retry_count);
        out.push(self.delivery_status);
        out.push(self.discovery_status);
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
            ("destination (16-bit)", self.dest_addr16.to_string()),
            ("retries", self.retry_count.to_string()),
            ("delivery status", format!("{:#04x}", self.delivery_status)),
            ("discovery status", format!("{:#04x}", self.discovery_status)),
        ]
    }
}

/// Received data packet for Zigbee and DigiMesh firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receive {
    pub src_addr: Addr64,
    pub src_addr16: Addr16,
    pub options: ReceiveOptions,
    pub data: Vec<u8>,
}

impl Receive {
    pub fn new(
        src_addr: Addr64,
        src_addr16: Addr16,
        options: ReceiveOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            src_addr,
            src_addr16,
            options,
            data: data.into(),
        }
    }

    /// True when the frame arrived as a broadcast.
    pub fn is_broadcast(&self) -> bool {
        self.options.intersects(ReceiveOptions::BROADCAST_PACKET)
    }
}

impl Packet for Receive {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::Receive;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
        let src_addr16 = cursor.addr16()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_addr,
            src_addr16,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(11 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(self.src_addr16.as_bytes());
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("source (16-bit)", self.src_addr16.to_string()),
            ("options", format!("{:#04x}", self.options.bits())),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Transmit request with explicit application-layer addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitAddressing {
    /// Correlates the transmit status response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Addr64,
    /// 16-bit address hint, or [`Addr16::UNKNOWN`].
    pub dest_addr16: Addr16,
    pub src_endpoint: u8,
    pub dest_endpoint: u8,
    pub cluster_id: u16,
    pub profile_id: u16,
    /// Maximum hops for a broadcast; zero means the network maximum.
    pub broadcast_radius: u8,
    pub options: TransmitOptions,
    pub data: Vec<u8>,
}

impl ExplicitAddressing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        frame_id: u8,
        dest_addr: Addr64,
        dest_addr16: Addr16,
        src_endpoint: u8,
        dest_endpoint: u8,
        cluster_id: u16,
        profile_id: u16,
        broadcast_radius: u8,
        options: TransmitOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            dest_addr16,
            src_endpoint,
            dest_endpoint,
            cluster_id,
            profile_id,
            broadcast_radius,
            options,
            data: data.into(),
        }
    }
}

impl Packet for ExplicitAddressing {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::ExplicitAddressing;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr64()?;
        let dest_addr16 = cursor.addr16()?;
        let src_endpoint = cursor.u8()?;
        let dest_endpoint = cursor.u8()?;
        let cluster_id = cursor.u16_be()?;
        let profile_id = cursor.u16_be()?;
        let broadcast_radius = cursor.u8()?;
        let options = TransmitOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            dest_addr16,
            src_endpoint,
            dest_endpoint,
            cluster_id,
            profile_id,
            broadcast_radius,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(19 + self.data.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.extend_from_slice(self.dest_addr16.as_bytes());
        out.push(self.src_endpoint);
        out.push(self.dest_endpoint);
        out.extend_from_slice(&self.cluster_id.to_be_bytes());
        out.extend_from_slice(&self.profile_id.to_be_bytes());
        out.push(self.broadcast_radius);
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
            ("endpoints", format!("{:#04x} -> {:#04x}", self.src_endpoint, self.dest_endpoint)),
            ("cluster", format!("{:#06x}", self.cluster_id)),
            ("profile", format!("{:#06x}", self.profile_id)),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// Received packet with explicit application-layer addressing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitRxIndicator {
    pub src_addr: Addr64,
    pub src_addr16: Addr16,
    pub src_endpoint: u8,
    pub dest_endpoint: u8,
    pub cluster_id: u16,
    pub profile_id: u16,
    pub options: ReceiveOptions,
    pub data: Vec<u8>,
}

impl ExplicitRxIndicator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        src_addr: Addr64,
        src_addr16: Addr16,
        src_endpoint: u8,
        dest_endpoint: u8,
        cluster_id: u16,
        profile_id: u16,
        options: ReceiveOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            src_addr,
            src_addr16,
            src_endpoint,
            dest_endpoint,
            cluster_id,
            profile_id,
            options,
            data: data.into(),
        }
    }

    /// True when the frame arrived as a broadcast.
    pub fn is_broadcast(&self) -> bool {
        self.options.intersects(ReceiveOptions::BROADCAST_PACKET)
    }
}

impl Packet for ExplicitRxIndicator {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::ExplicitRxIndicator;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
        let src_addr16 = cursor.addr16()?;
        let src_endpoint = cursor.u8()?;
        let dest_endpoint = cursor.u8()?;
        let cluster_id = cursor.u16_be()?;
        let profile_id = cursor.u16_be()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest().to_vec();
        Ok(Self {
            src_addr,
            src_addr16,
            src_endpoint,
            dest_endpoint,
            cluster_id,
            profile_id,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(17 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(self.src_addr16.as_bytes());
        out.push(self.src_endpoint);
        out.push(self.dest_endpoint);
        out.extend_from_slice(&self.cluster_id.to_be_bytes());
        out.extend_from_slice(&self.profile_id.to_be_bytes());
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("endpoints", format!("{:#04x} -> {:#04x}", self.src_endpoint, self.dest_endpoint)),
            ("cluster", format!("{:#06x}", self.cluster_id)),
            ("profile", format!("{:#06x}", self.profile_id)),
            ("data", encode_upper(&self.data)),
        ]
    }
}

/// I/O data sample pushed by a remote node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoDataSampleRxIndicator {
    pub src_addr: Addr64,
    pub src_addr16: Addr16,
    pub options: ReceiveOptions,
    /// Raw sample bytes; at least one is required.
    pub data: Vec<u8>,
}

impl IoDataSampleRxIndicator {
    pub fn new(
        src_addr: Addr64,
        src_addr16: Addr16,
        options: ReceiveOptions,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            src_addr,
            src_addr16,
            options,
            data: data.into(),
        }
    }
}

impl Packet for IoDataSampleRxIndicator {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::IoDataSampleRxIndicator;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let src_addr = cursor.addr64()?;
        let src_addr16 = cursor.addr16()?;
        let options = ReceiveOptions::from_bits_retain(cursor.u8()?);
        let data = cursor.rest_nonempty()?.to_vec();
        Ok(Self {
            src_addr,
            src_addr16,
            options,
            data,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(11 + self.data.len());
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(self.src_addr16.as_bytes());
        out.push(self.options.bits());
        out.extend_from_slice(&self.data);
        out
    }

    fn describe(&self) -> Vec<(&'static str, String)> {
        vec![
            ("source", self.src_addr.to_string()),
            ("options", format!("{:#04x}", self.options.bits())),
            ("sample data", encode_upper(&self.data)),
        ]
    }
}

/// AT command addressed to a remote node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAtCommand {
    /// Correlates the command response; zero suppresses it.
    pub frame_id: u8,
    pub dest_addr: Addr64,
    /// 16-bit address hint, or [`Addr16::UNKNOWN`].
    pub dest_addr16: Addr16,
    pub options: RemoteAtOptions,
    pub cmd: AtCmd,
    pub parameter: Vec<u8>,
}

impl RemoteAtCommand {
    pub fn new(
        frame_id: u8,
        dest_addr: Addr64,
        dest_addr16: Addr16,
        options: RemoteAtOptions,
        cmd: AtCmd,
        parameter: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            dest_addr,
            dest_addr16,
            options,
            cmd,
            parameter: parameter.into(),
        }
    }
}

impl Packet for RemoteAtCommand {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RemoteAtCommand;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let dest_addr = cursor.addr64()?;
        let dest_addr16 = cursor.addr16()?;
        let options = RemoteAtOptions::from_bits_retain(cursor.u8()?);
        let cmd = cursor.at_cmd()?;
        let parameter = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            dest_addr,
            dest_addr16,
            options,
            cmd,
            parameter,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(14 + self.parameter.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.dest_addr.as_bytes());
        out.extend_from_slice(self.dest_addr16.as_bytes());
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
            ("options", format!("{:#04x}", self.options.bits())),
            ("command", self.cmd.to_string()),
            ("parameter", encode_upper(&self.parameter)),
        ]
    }
}

/// Response to a [`RemoteAtCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAtCommandResponse {
    /// Frame ID of the command this answers.
    pub frame_id: u8,
    pub src_addr: Addr64,
    pub src_addr16: Addr16,
    pub cmd: AtCmd,
    /// Raw status byte as received.
    pub status: u8,
    /// Register value for queries; usually empty for sets.
    pub value: Vec<u8>,
}

impl RemoteAtCommandResponse {
    pub fn new(
        frame_id: u8,
        src_addr: Addr64,
        src_addr16: Addr16,
        cmd: AtCmd,
        status: u8,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            frame_id,
            src_addr,
            src_addr16,
            cmd,
            status,
            value: value.into(),
        }
    }

    /// Interpreted view of the status byte.
    pub fn command_status(&self) -> AtCommandStatus {
        AtCommandStatus::from_byte(self.status)
    }

    /// True when the command was accepted.
    pub fn is_ok(&self) -> bool {
        self.command_status() == AtCommandStatus::Ok
    }
}

impl Packet for RemoteAtCommandResponse {
    const FRAME_TYPE: ApiFrameType = ApiFrameType::RemoteAtCommandResponse;

    fn decode_payload(payload: &[u8]) -> Result<Self> {
        let mut cursor = FieldCursor::new(Self::FRAME_TYPE, payload);
        let frame_id = cursor.u8()?;
        let src_addr = cursor.addr64()?;
        let src_addr16 = cursor.addr16()?;
        let cmd = cursor.at_cmd()?;
        let status = cursor.u8()?;
        let value = cursor.rest().to_vec();
        Ok(Self {
            frame_id,
            src_addr,
            src_addr16,
            cmd,
            status,
            value,
        })
    }

    fn encode_payload(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(14 + self.value.len());
        out.push(self.frame_id);
        out.extend_from_slice(self.src_addr.as_bytes());
        out.extend_from_slice(self.src_addr16.as_bytes());
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
