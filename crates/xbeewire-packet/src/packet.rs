//! The [`Packet`] trait shared by every typed packet, and [`ApiPacket`],
//! the tagged union the registry dispatches into.

use std::net::Ipv4Addr;

use tracing::{debug, trace};
use xbeewire_addr::{Addr16, Addr64};
use xbeewire_frame::Frame;

use crate::bluetooth::GapScanResponse;
use crate::common::{
    AtCommand, AtCommandQueue, AtCommandResponse, ExplicitAddressing, ExplicitRxIndicator,
    IoDataSampleRxIndicator, ModemStatus, Receive, RemoteAtCommand, RemoteAtCommandResponse,
    TransmitRequest, TransmitStatus,
};
use crate::devicecloud::{
    DeviceRequest, DeviceResponse, DeviceResponseStatus, SendDataRequest, SendDataResponse,
};
use crate::error::{PacketError, Result};
use crate::generic::Generic;
use crate::ip::{RxIpv4, RxIpv6, RxSms, TxIpv4, TxIpv6, TxSms};
use crate::options::ReceiveOptions;
use crate::raw::{Rx16, Rx16IoSample, Rx64, Rx64IoSample, Tx16Request, Tx64Request, TxStatus};
use crate::relay::{UserDataRelay, UserDataRelayOutput};
use crate::types::ApiFrameType;
use crate::wifi::{IoDataSampleRxIndicatorWifi, RemoteAtCommandResponseWifi, RemoteAtCommandWifi};
use crate::zigbee::{
    CreateSourceRoute, RegisterDeviceStatus, RegisterJoiningDevice, RouteRecordIndicator,
};

/// Behavior shared by every typed API packet.
///
/// Implementors provide the payload codec; the frame-level plumbing
/// (type byte handling, frame construction, tag checking) is provided.
pub trait Packet: Sized {
    /// Frame type tag this packet owns.
    const FRAME_TYPE: ApiFrameType;

    /// Parses the payload that follows the frame type byte.
    fn decode_payload(payload: &[u8]) -> Result<Self>;

    /// Serializes the payload that follows the frame type byte.
    fn encode_payload(&self) -> Vec<u8>;

    /// Field-by-field rendering for diagnostics.
    fn describe(&self) -> Vec<(&'static str, String)>;

    /// True when the packet carries a frame ID for response correlation.
    fn needs_frame_id(&self) -> bool {
        false
    }

    /// The frame ID, for packets that carry one.
    fn frame_id(&self) -> Option<u8> {
        None
    }

    /// Frame type tag of this packet.
    fn frame_type(&self) -> ApiFrameType {
        Self::FRAME_TYPE
    }

    /// Complete frame data: the type byte followed by the payload.
    fn frame_data(&self) -> Vec<u8> {
        let payload = self.encode_payload();
        let mut data = Vec::with_capacity(1 + payload.len());
        data.push(Self::FRAME_TYPE.byte());
        data.extend_from_slice(&payload);
        data
    }

    /// Wraps this packet in a wire frame.
    fn to_frame(&self) -> Frame {
        Frame::new(Self::FRAME_TYPE.byte(), self.encode_payload())
    }

    /// Parses a decoded wire frame, checking the tag first.
    fn from_frame(frame: &Frame) -> Result<Self> {
        if frame.frame_type != Self::FRAME_TYPE.byte() {
            return Err(PacketError::InvalidFrameType {
                expected: Self::FRAME_TYPE,
                found: frame.frame_type,
            });
        }
        Self::decode_payload(&frame.payload)
    }

    /// Parses complete frame data (type byte first), checking the tag.
    fn from_frame_data(data: &[u8]) -> Result<Self> {
        match data.split_first() {
            Some((&tag, _)) if tag != Self::FRAME_TYPE.byte() => {
                Err(PacketError::InvalidFrameType {
                    expected: Self::FRAME_TYPE,
                    found: tag,
                })
            }
            Some((_, payload)) => Self::decode_payload(payload),
            None => Err(PacketError::InvalidFieldValue {
                field: "frame data",
                reason: "empty frame data has no type byte".to_string(),
            }),
        }
    }
}

/// Applies `$body` to the typed packet inside any [`ApiPacket`] variant.
macro_rules! with_packet {
    ($value:expr, $packet:ident => $body:expr) => {
        match $value {
            ApiPacket::Tx64Request($packet) => $body,
            ApiPacket::Tx16Request($packet) => $body,
            ApiPacket::Rx64($packet) => $body,
            ApiPacket::Rx16($packet) => $body,
            ApiPacket::Rx64IoSample($packet) => $body,
            ApiPacket::Rx16IoSample($packet) => $body,
            ApiPacket::TxStatus($packet) => $body,
            ApiPacket::AtCommand($packet) => $body,
            ApiPacket::AtCommandQueue($packet) => $body,
            ApiPacket::AtCommandResponse($packet) => $body,
            ApiPacket::ModemStatus($packet) => $body,
            ApiPacket::TransmitRequest($packet) => $body,
            ApiPacket::TransmitStatus($packet) => $body,
            ApiPacket::Receive($packet) => $body,
            ApiPacket::ExplicitAddressing($packet) => $body,
            ApiPacket::ExplicitRxIndicator($packet) => $body,
            ApiPacket::IoDataSampleRxIndicator($packet) => $body,
            ApiPacket::RemoteAtCommand($packet) => $body,
            ApiPacket::RemoteAtCommandResponse($packet) => $body,
            ApiPacket::TxIpv4($packet) => $body,
            ApiPacket::RxIpv4($packet) => $body,
            ApiPacket::TxIpv6($packet) => $body,
            ApiPacket::RxIpv6($packet) => $body,
            ApiPacket::TxSms($packet) => $body,
            ApiPacket::RxSms($packet) => $body,
            ApiPacket::SendDataRequest($packet) => $body,
            ApiPacket::SendDataResponse($packet) => $body,
            ApiPacket::DeviceRequest($packet) => $body,
            ApiPacket::DeviceResponse($packet) => $body,
            ApiPacket::DeviceResponseStatus($packet) => $body,
            ApiPacket::UserDataRelay($packet) => $body,
            ApiPacket::UserDataRelayOutput($packet) => $body,
            ApiPacket::RouteRecordIndicator($packet) => $body,
            ApiPacket::CreateSourceRoute($packet) => $body,
            ApiPacket::RegisterJoiningDevice($packet) => $body,
            ApiPacket::RegisterDeviceStatus($packet) => $body,
            ApiPacket::RemoteAtCommandWifi($packet) => $body,
            ApiPacket::RemoteAtCommandResponseWifi($packet) => $body,
            ApiPacket::IoDataSampleRxIndicatorWifi($packet) => $body,
            ApiPacket::GapScanResponse($packet) => $body,
            ApiPacket::Generic($packet) => $body,
        }
    };
}

/// Any packet of the registry, decoded from its frame type tag.
///
/// This is the type application code works with: the frame layer produces
/// [`Frame`]s, [`ApiPacket::decode`] turns them into typed packets, and the
/// queue stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPacket {
    // 802.15.4
    Tx64Request(Tx64Request),
    Tx16Request(Tx16Request),
    Rx64(Rx64),
    Rx16(Rx16),
    Rx64IoSample(Rx64IoSample),
    Rx16IoSample(Rx16IoSample),
    TxStatus(TxStatus),
    // Common and Zigbee/DigiMesh
    AtCommand(AtCommand),
    AtCommandQueue(AtCommandQueue),
    AtCommandResponse(AtCommandResponse),
    ModemStatus(ModemStatus),
    TransmitRequest(TransmitRequest),
    TransmitStatus(TransmitStatus),
    Receive(Receive),
    ExplicitAddressing(ExplicitAddressing),
    ExplicitRxIndicator(ExplicitRxIndicator),
    IoDataSampleRxIndicator(IoDataSampleRxIndicator),
    RemoteAtCommand(RemoteAtCommand),
    RemoteAtCommandResponse(RemoteAtCommandResponse),
    // IP and cellular
    TxIpv4(TxIpv4),
    RxIpv4(RxIpv4),
    TxIpv6(TxIpv6),
    RxIpv6(RxIpv6),
    TxSms(TxSms),
    RxSms(RxSms),
    // Device Cloud
    SendDataRequest(SendDataRequest),
    SendDataResponse(SendDataResponse),
    DeviceRequest(DeviceRequest),
    DeviceResponse(DeviceResponse),
    DeviceResponseStatus(DeviceResponseStatus),
    // Local interface relay
    UserDataRelay(UserDataRelay),
    UserDataRelayOutput(UserDataRelayOutput),
    // Zigbee source routing and registration
    RouteRecordIndicator(RouteRecordIndicator),
    CreateSourceRoute(CreateSourceRoute),
    RegisterJoiningDevice(RegisterJoiningDevice),
    RegisterDeviceStatus(RegisterDeviceStatus),
    // Wi-Fi
    RemoteAtCommandWifi(RemoteAtCommandWifi),
    RemoteAtCommandResponseWifi(RemoteAtCommandResponseWifi),
    IoDataSampleRxIndicatorWifi(IoDataSampleRxIndicatorWifi),
    // Bluetooth
    GapScanResponse(GapScanResponse),
    // Application-defined
    Generic(Generic),
}

impl ApiPacket {
    /// Decodes a wire frame into a typed packet.
    ///
    /// The frame type byte picks the parser; a tag that is not in the
    /// registry fails with [`PacketError::UnknownFrameType`].
    pub fn decode(frame: &Frame) -> Result<ApiPacket> {
        let Some(frame_type) = ApiFrameType::from_byte(frame.frame_type) else {
            debug!(frame_type = frame.frame_type, "frame type not in the registry");
            return Err(PacketError::UnknownFrameType(frame.frame_type));
        };
        trace!(%frame_type, payload_len = frame.payload.len(), "decoding packet");
        Self::parse(frame_type, &frame.payload)
    }

    /// Decodes complete frame data: the type byte followed by the payload.
    pub fn from_frame_data(data: &[u8]) -> Result<ApiPacket> {
        match data.split_first() {
            Some((&tag, payload)) => {
                let frame_type = ApiFrameType::from_byte(tag)
                    .ok_or(PacketError::UnknownFrameType(tag))?;
                Self::parse(frame_type, payload)
            }
            None => Err(PacketError::InvalidFieldValue {
                field: "frame data",
                reason: "empty frame data has no type byte".to_string(),
            }),
        }
    }

    fn parse(frame_type: ApiFrameType, payload: &[u8]) -> Result<ApiPacket> {
        use ApiFrameType as T;
        Ok(match frame_type {
            T::Tx64Request => ApiPacket::Tx64Request(Tx64Request::decode_payload(payload)?),
            T::Tx16Request => ApiPacket::Tx16Request(Tx16Request::decode_payload(payload)?),
            T::Rx64 => ApiPacket::Rx64(Rx64::decode_payload(payload)?),
            T::Rx16 => ApiPacket::Rx16(Rx16::decode_payload(payload)?),
            T::Rx64IoSample => ApiPacket::Rx64IoSample(Rx64IoSample::decode_payload(payload)?),
            T::Rx16IoSample => ApiPacket::Rx16IoSample(Rx16IoSample::decode_payload(payload)?),
            T::TxStatus => ApiPacket::TxStatus(TxStatus::decode_payload(payload)?),
            T::AtCommand => ApiPacket::AtCommand(AtCommand::decode_payload(payload)?),
            T::AtCommandQueue => {
                ApiPacket::AtCommandQueue(AtCommandQueue::decode_payload(payload)?)
            }
            T::AtCommandResponse => {
                ApiPacket::AtCommandResponse(AtCommandResponse::decode_payload(payload)?)
            }
            T::ModemStatus => ApiPacket::ModemStatus(ModemStatus::decode_payload(payload)?),
            T::TransmitRequest => {
                ApiPacket::TransmitRequest(TransmitRequest::decode_payload(payload)?)
            }
            T::TransmitStatus => {
                ApiPacket::TransmitStatus(TransmitStatus::decode_payload(payload)?)
            }
            T::Receive => ApiPacket::Receive(Receive::decode_payload(payload)?),
            T::ExplicitAddressing => {
                ApiPacket::ExplicitAddressing(ExplicitAddressing::decode_payload(payload)?)
            }
            T::ExplicitRxIndicator => {
                ApiPacket::ExplicitRxIndicator(ExplicitRxIndicator::decode_payload(payload)?)
            }
            T::IoDataSampleRxIndicator => {
                ApiPacket::IoDataSampleRxIndicator(IoDataSampleRxIndicator::decode_payload(payload)?)
            }
            T::RemoteAtCommand => {
                ApiPacket::RemoteAtCommand(RemoteAtCommand::decode_payload(payload)?)
            }
            T::RemoteAtCommandResponse => {
                ApiPacket::RemoteAtCommandResponse(RemoteAtCommandResponse::decode_payload(payload)?)
            }
            T::TxIpv4 => ApiPacket::TxIpv4(TxIpv4::decode_payload(payload)?),
            T::RxIpv4 => ApiPacket::RxIpv4(RxIpv4::decode_payload(payload)?),
            T::TxIpv6 => ApiPacket::TxIpv6(TxIpv6::decode_payload(payload)?),
            T::RxIpv6 => ApiPacket::RxIpv6(RxIpv6::decode_payload(payload)?),
            T::TxSms => ApiPacket::TxSms(TxSms::decode_payload(payload)?),
            T::RxSms => ApiPacket::RxSms(RxSms::decode_payload(payload)?),
            T::SendDataRequest => {
                ApiPacket::SendDataRequest(SendDataRequest::decode_payload(payload)?)
            }
            T::SendDataResponse => {
                ApiPacket::SendDataResponse(SendDataResponse::decode_payload(payload)?)
            }
            T::DeviceRequest => ApiPacket::DeviceRequest(DeviceRequest::decode_payload(payload)?),
            T::DeviceResponse => {
                ApiPacket::DeviceResponse(DeviceResponse::decode_payload(payload)?)
            }
            T::DeviceResponseStatus => {
                ApiPacket::DeviceResponseStatus(DeviceResponseStatus::decode_payload(payload)?)
            }
            T::UserDataRelay => ApiPacket::UserDataRelay(UserDataRelay::decode_payload(payload)?),
            T::UserDataRelayOutput => {
                ApiPacket::UserDataRelayOutput(UserDataRelayOutput::decode_payload(payload)?)
            }
            T::RouteRecordIndicator => {
                ApiPacket::RouteRecordIndicator(RouteRecordIndicator::decode_payload(payload)?)
            }
            T::CreateSourceRoute => {
                ApiPacket::CreateSourceRoute(CreateSourceRoute::decode_payload(payload)?)
            }
            T::RegisterJoiningDevice => {
                ApiPacket::RegisterJoiningDevice(RegisterJoiningDevice::decode_payload(payload)?)
            }
            T::RegisterDeviceStatus => {
                ApiPacket::RegisterDeviceStatus(RegisterDeviceStatus::decode_payload(payload)?)
            }
            T::RemoteAtCommandWifi => {
                ApiPacket::RemoteAtCommandWifi(RemoteAtCommandWifi::decode_payload(payload)?)
            }
            T::RemoteAtCommandResponseWifi => ApiPacket::RemoteAtCommandResponseWifi(
                RemoteAtCommandResponseWifi::decode_payload(payload)?,
            ),
            T::IoDataSampleRxIndicatorWifi => ApiPacket::IoDataSampleRxIndicatorWifi(
                IoDataSampleRxIndicatorWifi::decode_payload(payload)?,
            ),
            T::GapScanResponse => {
                ApiPacket::GapScanResponse(GapScanResponse::decode_payload(payload)?)
            }
            T::Generic => ApiPacket::Generic(Generic::decode_payload(payload)?),
        })
    }

    /// Frame type tag of the packet inside.
    pub fn frame_type(&self) -> ApiFrameType {
        with_packet!(self, packet => packet.frame_type())
    }

    /// Complete frame data: the type byte followed by the payload.
    pub fn frame_data(&self) -> Vec<u8> {
        with_packet!(self, packet => packet.frame_data())
    }

    /// Wraps the packet in a wire frame.
    pub fn to_frame(&self) -> Frame {
        with_packet!(self, packet => packet.to_frame())
    }

    /// True when the packet carries a frame ID for response correlation.
    pub fn needs_frame_id(&self) -> bool {
        with_packet!(self, packet => packet.needs_frame_id())
    }

    /// The frame ID, for packets that carry one.
    pub fn frame_id(&self) -> Option<u8> {
        with_packet!(self, packet => packet.frame_id())
    }

    /// Field-by-field rendering for diagnostics.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        with_packet!(self, packet => packet.describe())
    }

    /// True for packets that deliver application data received over the air.
    pub fn is_data_packet(&self) -> bool {
        matches!(
            self,
            ApiPacket::Receive(_)
                | ApiPacket::Rx64(_)
                | ApiPacket::Rx16(_)
                | ApiPacket::ExplicitRxIndicator(_)
        )
    }

    /// True for received data packets with explicit addressing information.
    pub fn is_explicit_data_packet(&self) -> bool {
        matches!(self, ApiPacket::ExplicitRxIndicator(_))
    }

    /// True for data received over an IPv4 socket.
    pub fn is_ip_data_packet(&self) -> bool {
        matches!(self, ApiPacket::RxIpv4(_))
    }

    /// True for data received over an IPv6 socket.
    pub fn is_ipv6_data_packet(&self) -> bool {
        matches!(self, ApiPacket::RxIpv6(_))
    }

    /// 64-bit source address, for packets that report one.
    pub fn source_addr64(&self) -> Option<Addr64> {
        match self {
            ApiPacket::Rx64(p) => Some(p.src_addr),
            ApiPacket::Rx64IoSample(p) => Some(p.src_addr),
            ApiPacket::Receive(p) => Some(p.src_addr),
            ApiPacket::ExplicitRxIndicator(p) => Some(p.src_addr),
            ApiPacket::IoDataSampleRxIndicator(p) => Some(p.src_addr),
            ApiPacket::RemoteAtCommandResponse(p) => Some(p.src_addr),
            ApiPacket::RouteRecordIndicator(p) => Some(p.src_addr),
            _ => None,
        }
    }

    /// 16-bit source address, for packets that report one.
    pub fn source_addr16(&self) -> Option<Addr16> {
        match self {
            ApiPacket::Rx16(p) => Some(p.src_addr),
            ApiPacket::Rx16IoSample(p) => Some(p.src_addr),
            ApiPacket::Receive(p) => Some(p.src_addr16),
            ApiPacket::ExplicitRxIndicator(p) => Some(p.src_addr16),
            ApiPacket::IoDataSampleRxIndicator(p) => Some(p.src_addr16),
            ApiPacket::RemoteAtCommandResponse(p) => Some(p.src_addr16),
            ApiPacket::RouteRecordIndicator(p) => Some(p.src_addr16),
            _ => None,
        }
    }

    /// IPv4 source address, for packets that report one.
    pub fn source_ip(&self) -> Option<Ipv4Addr> {
        match self {
            ApiPacket::RxIpv4(p) => Some(p.src_addr),
            ApiPacket::RemoteAtCommandResponseWifi(p) => Some(p.src_addr),
            ApiPacket::IoDataSampleRxIndicatorWifi(p) => Some(p.src_addr),
            _ => None,
        }
    }

    /// True for packets received as a broadcast and for transmit packets
    /// addressed to a broadcast destination.
    pub fn is_broadcast(&self) -> bool {
        let broadcast_bits = ReceiveOptions::BROADCAST_PACKET | ReceiveOptions::PAN_BROADCAST;
        match self {
            ApiPacket::Rx64(p) => p.is_broadcast(),
            ApiPacket::Rx16(p) => p.is_broadcast(),
            ApiPacket::Rx64IoSample(p) => p.options.intersects(broadcast_bits),
            ApiPacket::Rx16IoSample(p) => p.options.intersects(broadcast_bits),
            ApiPacket::Receive(p) => p.is_broadcast(),
            ApiPacket::ExplicitRxIndicator(p) => p.is_broadcast(),
            ApiPacket::IoDataSampleRxIndicator(p) => {
                p.options.intersects(ReceiveOptions::BROADCAST_PACKET)
            }
            ApiPacket::IoDataSampleRxIndicatorWifi(p) => {
                p.options.intersects(ReceiveOptions::BROADCAST_PACKET)
            }
            ApiPacket::Tx64Request(p) => p.dest_addr.is_broadcast(),
            ApiPacket::Tx16Request(p) => p.dest_addr.is_broadcast(),
            ApiPacket::TransmitRequest(p) => {
                p.dest_addr.is_broadcast() || p.dest_addr16.is_broadcast()
            }
            ApiPacket::ExplicitAddressing(p) => {
                p.dest_addr.is_broadcast() || p.dest_addr16.is_broadcast()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::status::ModemStatusEvent;
    use crate::types::AtCmd;

    #[test]
    fn decode_dispatches_on_frame_type() {
        let frame = Frame::new(0x8A, vec![0x06]);
        let packet = ApiPacket::decode(&frame).unwrap();
        match &packet {
            ApiPacket::ModemStatus(status) => {
                assert_eq!(status.event(), ModemStatusEvent::CoordinatorStarted);
            }
            other => panic!("wrong variant: {other:?}"),
        }
        assert_eq!(packet.frame_type(), ApiFrameType::ModemStatus);
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let frame = Frame::new(0x02, vec![0x00]);
        let err = ApiPacket::decode(&frame).unwrap_err();
        assert!(matches!(err, PacketError::UnknownFrameType(0x02)));
    }

    #[test]
    fn generic_tag_is_in_the_registry() {
        let packet = ApiPacket::from_frame_data(&hex!("FF 010203")).unwrap();
        assert!(matches!(packet, ApiPacket::Generic(_)));
        assert_eq!(packet.frame_data(), hex!("FF 010203"));
    }

    #[test]
    fn documented_transmit_request_reserializes_byte_exact() {
        let frame_data = hex!("10 01 0013A200400A0127 FFFE 00 00 5478446174613041");
        let packet = ApiPacket::from_frame_data(&frame_data).unwrap();
        assert_eq!(packet.frame_type(), ApiFrameType::TransmitRequest);
        assert_eq!(packet.frame_id(), Some(0x01));
        assert_eq!(packet.frame_data(), frame_data);
    }

    #[test]
    fn to_frame_matches_frame_data() {
        let packet = ApiPacket::AtCommand(AtCommand::query(0x01, AtCmd::new("NI").unwrap()));
        let frame = packet.to_frame();
        assert_eq!(frame.frame_type, 0x08);
        assert_eq!(&frame.payload[..], hex!("01 4E 49"));
        assert_eq!(ApiPacket::decode(&frame).unwrap(), packet);
    }

    #[test]
    fn frame_id_exposure() {
        let with_id = ApiPacket::AtCommand(AtCommand::query(0x42, AtCmd::new("SH").unwrap()));
        assert!(with_id.needs_frame_id());
        assert_eq!(with_id.frame_id(), Some(0x42));

        let without = ApiPacket::ModemStatus(ModemStatus::new(0));
        assert!(!without.needs_frame_id());
        assert_eq!(without.frame_id(), None);
    }

    #[test]
    fn empty_frame_data_is_rejected() {
        let err = ApiPacket::from_frame_data(&[]).unwrap_err();
        assert!(matches!(err, PacketError::InvalidFieldValue { field: "frame data", .. }));
    }

    #[test]
    fn typed_from_frame_checks_the_tag() {
        let frame = Frame::new(0x90, vec![0u8; 11]);
        let err = AtCommandResponse::from_frame(&frame).unwrap_err();
        assert!(matches!(
            err,
            PacketError::InvalidFrameType {
                expected: ApiFrameType::AtCommandResponse,
                found: 0x90,
            }
        ));
    }

    #[test]
    fn classification_of_received_data() {
        let rx = ApiPacket::from_frame_data(&hex!("90 0013A20040522BAA 7D84 02 527844617461"))
            .unwrap();
        assert!(rx.is_data_packet());
        assert!(!rx.is_explicit_data_packet());
        assert!(rx.is_broadcast());
        assert_eq!(rx.source_addr64(), Some(Addr64::new(0x0013_A200_4052_2BAA)));
        assert_eq!(rx.source_addr16(), Some(Addr16::new(0x7D84)));
        assert_eq!(rx.source_ip(), None);
    }

    #[test]
    fn classification_of_ip_data() {
        let rx = ApiPacket::from_frame_data(&hex!("B0 C0A80114 2616 1FC3 00 00 AB")).unwrap();
        assert!(rx.is_ip_data_packet());
        assert!(!rx.is_data_packet());
        assert_eq!(rx.source_ip(), Some(Ipv4Addr::new(192, 168, 1, 20)));
        assert_eq!(rx.source_addr64(), None);
    }

    #[test]
    fn broadcast_destination_counts_as_broadcast() {
        let broadcast = ApiPacket::TransmitRequest(TransmitRequest::broadcast(0x01, *b"ping"));
        assert!(broadcast.is_broadcast());

        let unicast = ApiPacket::TransmitRequest(TransmitRequest::unicast(
            0x01,
            Addr64::new(0x0013_A200_400A_0127),
            *b"ping",
        ));
        assert!(!unicast.is_broadcast());

        let tx16 = ApiPacket::from_frame_data(&hex!("01 01 FFFF 00")).unwrap();
        assert!(matches!(tx16, ApiPacket::Tx16Request(_)));
        assert!(tx16.is_broadcast());
    }

    #[test]
    fn describe_renders_every_field_pair() {
        let packet = ApiPacket::from_frame_data(&hex!("8A 06")).unwrap();
        let fields = packet.describe();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].0, "status");
        assert!(fields[0].1.contains("coordinator started"));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;
        use crate::options::TransmitOptions;

        proptest! {
            #[test]
            fn transmit_request_frame_data_round_trips(
                frame_id in any::<u8>(),
                dest in any::<u64>(),
                data in proptest::collection::vec(any::<u8>(), 0..64),
            ) {
                let packet = ApiPacket::TransmitRequest(TransmitRequest::new(
                    frame_id,
                    Addr64::new(dest),
                    Addr16::UNKNOWN,
                    0,
                    TransmitOptions::empty(),
                    data,
                ));
                let decoded = ApiPacket::from_frame_data(&packet.frame_data()).unwrap();
                prop_assert_eq!(decoded, packet);
            }

            #[test]
            fn arbitrary_frame_data_never_panics(
                tag in any::<u8>(),
                payload in proptest::collection::vec(any::<u8>(), 0..48),
            ) {
                let mut data = vec![tag];
                data.extend_from_slice(&payload);
                let _ = ApiPacket::from_frame_data(&data);
            }
        }
    }
}
