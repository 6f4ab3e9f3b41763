use std::fmt;

use crate::error::{PacketError, Result};

/// Every API frame type byte this crate understands.
///
/// The discriminant is the wire tag. One packet struct owns each tag; the
/// [`ApiPacket`](crate::ApiPacket) dispatch is a single match over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ApiFrameType {
    /// Transmit request, 64-bit addressing (802.15.4).
    Tx64Request = 0x00,
    /// Transmit request, 16-bit addressing (802.15.4).
    Tx16Request = 0x01,
    /// Remote AT command request (Wi-Fi).
    RemoteAtCommandWifi = 0x07,
    /// AT command.
    AtCommand = 0x08,
    /// AT command, parameter queued until `AC`.
    AtCommandQueue = 0x09,
    /// Transmit request.
    TransmitRequest = 0x10,
    /// Explicit addressing command frame.
    ExplicitAddressing = 0x11,
    /// Remote AT command request.
    RemoteAtCommand = 0x17,
    /// Transmit IPv6 data (Thread).
    TxIpv6 = 0x1A,
    /// Transmit SMS (cellular).
    TxSms = 0x1F,
    /// Transmit IPv4 data.
    TxIpv4 = 0x20,
    /// Create source route (Zigbee).
    CreateSourceRoute = 0x21,
    /// Register joining device (Zigbee).
    RegisterJoiningDevice = 0x24,
    /// Send data to Device Cloud.
    SendDataRequest = 0x28,
    /// Response to a Device Cloud device request.
    DeviceResponse = 0x2A,
    /// User data relay to another local interface.
    UserDataRelay = 0x2D,
    /// Received packet, 64-bit addressing (802.15.4).
    Rx64 = 0x80,
    /// Received packet, 16-bit addressing (802.15.4).
    Rx16 = 0x81,
    /// I/O data sample, 64-bit addressing (802.15.4).
    Rx64IoSample = 0x82,
    /// I/O data sample, 16-bit addressing (802.15.4).
    Rx16IoSample = 0x83,
    /// Remote AT command response (Wi-Fi).
    RemoteAtCommandResponseWifi = 0x87,
    /// AT command response.
    AtCommandResponse = 0x88,
    /// Transmit status (802.15.4).
    TxStatus = 0x89,
    /// Modem status.
    ModemStatus = 0x8A,
    /// Transmit status.
    TransmitStatus = 0x8B,
    /// I/O data sample RX indicator (Wi-Fi).
    IoDataSampleRxIndicatorWifi = 0x8F,
    /// Received packet.
    Receive = 0x90,
    /// Explicit RX indicator.
    ExplicitRxIndicator = 0x91,
    /// I/O data sample RX indicator.
    IoDataSampleRxIndicator = 0x92,
    /// Remote AT command response.
    RemoteAtCommandResponse = 0x97,
    /// Received IPv6 data (Thread).
    RxIpv6 = 0x9A,
    /// Received SMS (cellular).
    RxSms = 0x9F,
    /// Route record indicator (Zigbee).
    RouteRecordIndicator = 0xA1,
    /// Register joining device status (Zigbee).
    RegisterDeviceStatus = 0xA4,
    /// User data relay output.
    UserDataRelayOutput = 0xAD,
    /// Received IPv4 data.
    RxIpv4 = 0xB0,
    /// Device Cloud send data response.
    SendDataResponse = 0xB8,
    /// Device Cloud device request.
    DeviceRequest = 0xB9,
    /// Device Cloud device response status.
    DeviceResponseStatus = 0xBA,
    /// Bluetooth GAP scan advertisement response.
    GapScanResponse = 0xD4,
    /// Opaque frame with no typed layout.
    Generic = 0xFF,
}

impl ApiFrameType {
    /// Looks up the registered frame type for a wire tag.
    pub fn from_byte(byte: u8) -> Option<ApiFrameType> {
        use ApiFrameType::*;
        match byte {
            0x00 => Some(Tx64Request),
            0x01 => Some(Tx16Request),
            0x07 => Some(RemoteAtCommandWifi),
            0x08 => Some(AtCommand),
            0x09 => Some(AtCommandQueue),
            0x10 => Some(TransmitRequest),
            0x11 => Some(ExplicitAddressing),
            0x17 => Some(RemoteAtCommand),
            0x1A => Some(TxIpv6),
            0x1F => Some(TxSms),
            0x20 => Some(TxIpv4),
            0x21 => Some(CreateSourceRoute),
            0x24 => Some(RegisterJoiningDevice),
            0x28 => Some(SendDataRequest),
            0x2A => Some(DeviceResponse),
            0x2D => Some(UserDataRelay),
            0x80 => Some(Rx64),
            0x81 => Some(Rx16),
            0x82 => Some(Rx64IoSample),
            0x83 => Some(Rx16IoSample),
            0x87 => Some(RemoteAtCommandResponseWifi),
            0x88 => Some(AtCommandResponse),
            0x89 => Some(TxStatus),
            0x8A => Some(ModemStatus),
            0x8B => Some(TransmitStatus),
            0x8F => Some(IoDataSampleRxIndicatorWifi),
            0x90 => Some(Receive),
            0x91 => Some(ExplicitRxIndicator),
            0x92 => Some(IoDataSampleRxIndicator),
            0x97 => Some(RemoteAtCommandResponse),
            0x9A => Some(RxIpv6),
            0x9F => Some(RxSms),
            0xA1 => Some(RouteRecordIndicator),
            0xA4 => Some(RegisterDeviceStatus),
            0xAD => Some(UserDataRelayOutput),
            0xB0 => Some(RxIpv4),
            0xB8 => Some(SendDataResponse),
            0xB9 => Some(DeviceRequest),
            0xBA => Some(DeviceResponseStatus),
            0xD4 => Some(GapScanResponse),
            0xFF => Some(Generic),
            _ => None,
        }
    }

    /// Wire tag.
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Conventional name of the frame type.
    pub fn description(self) -> &'static str {
        use ApiFrameType::*;
        match self {
            Tx64Request => "TX Request (64-bit address)",
            Tx16Request => "TX Request (16-bit address)",
            RemoteAtCommandWifi => "Remote AT Command Request (Wi-Fi)",
            AtCommand => "AT Command",
            AtCommandQueue => "AT Command Queue",
            TransmitRequest => "Transmit Request",
            ExplicitAddressing => "Explicit Addressing Command Frame",
            RemoteAtCommand => "Remote AT Command Request",
            TxIpv6 => "TX IPv6",
            TxSms => "TX SMS",
            TxIpv4 => "TX IPv4",
            CreateSourceRoute => "Create Source Route",
            RegisterJoiningDevice => "Register Joining Device",
            SendDataRequest => "Send Data Request",
            DeviceResponse => "Device Response",
            UserDataRelay => "User Data Relay",
            Rx64 => "RX Packet (64-bit address)",
            Rx16 => "RX Packet (16-bit address)",
            Rx64IoSample => "IO Data Sample RX (64-bit address)",
            Rx16IoSample => "IO Data Sample RX (16-bit address)",
            RemoteAtCommandResponseWifi => "Remote AT Command Response (Wi-Fi)",
            AtCommandResponse => "AT Command Response",
            TxStatus => "TX Status",
            ModemStatus => "Modem Status",
            TransmitStatus => "Transmit Status",
            IoDataSampleRxIndicatorWifi => "IO Data Sample RX Indicator (Wi-Fi)",
            Receive => "Receive Packet",
            ExplicitRxIndicator => "Explicit RX Indicator",
            IoDataSampleRxIndicator => "IO Data Sample RX Indicator",
            RemoteAtCommandResponse => "Remote AT Command Response",
            RxIpv6 => "RX IPv6",
            RxSms => "RX SMS",
            RouteRecordIndicator => "Route Record Indicator",
            RegisterDeviceStatus => "Register Joining Device Status",
            UserDataRelayOutput => "User Data Relay Output",
            RxIpv4 => "RX IPv4",
            SendDataResponse => "Send Data Response",
            DeviceRequest => "Device Request",
            DeviceResponseStatus => "Device Response Status",
            GapScanResponse => "Bluetooth GAP Scan Response",
            Generic => "Generic",
        }
    }
}

impl fmt::Display for ApiFrameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.description(), self.byte())
    }
}

/// Two-character AT command name, such as `NI` or `BD`.
///
/// Commands are two ASCII bytes on the wire. Names with non-letter
/// characters exist (`%V`, `4S`), so the only constraint is printable ASCII.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtCmd([u8; 2]);

impl AtCmd {
    /// Parses a two-character command string.
    pub fn new(cmd: &str) -> Result<Self> {
        let bytes = cmd.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(|b| (0x20..0x7F).contains(b)) {
            return Err(PacketError::InvalidFieldValue {
                field: "AT command",
                reason: format!("{cmd:?} is not two printable ASCII characters"),
            });
        }
        Ok(AtCmd([bytes[0], bytes[1]]))
    }

    /// Builds a command from its wire bytes, unchecked.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        AtCmd(bytes)
    }

    /// Wire bytes.
    pub const fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl fmt::Display for AtCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if (0x20..0x7F).contains(&b) { b as char } else { '.' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for AtCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AtCmd({self})")
    }
}
