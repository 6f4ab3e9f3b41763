//! Value enums for status bytes carried in response packets.
//!
//! Response packets keep the raw byte they received so re-serialization is
//! exact; these enums are the interpreted view of that byte.

use std::fmt;

/// Status byte of an AT command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtCommandStatus {
    Ok,
    Error,
    InvalidCommand,
    InvalidParameter,
    TxFailure,
    NoSecureSession,
    EncryptionError,
    CommandSentInsecurely,
    /// A value outside the documented set, kept verbatim.
    Unknown(u8),
}

impl AtCommandStatus {
    /// Decodes a status byte.
    ///
    /// Some protocols set extra high bits on top of the base status, so when
    /// the raw value is not a known status the low nibble is tried before
    /// giving up.
    pub fn from_byte(byte: u8) -> Self {
        Self::lookup(byte)
            .or_else(|| Self::lookup(byte % 16))
            .unwrap_or(Self::Unknown(byte))
    }

    fn lookup(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(AtCommandStatus::Ok),
            0x01 => Some(AtCommandStatus::Error),
            0x02 => Some(AtCommandStatus::InvalidCommand),
            0x03 => Some(AtCommandStatus::InvalidParameter),
            0x04 => Some(AtCommandStatus::TxFailure),
            0x0B => Some(AtCommandStatus::NoSecureSession),
            0x0C => Some(AtCommandStatus::EncryptionError),
            0x0D => Some(AtCommandStatus::CommandSentInsecurely),
            _ => None,
        }
    }

    /// Conventional description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            AtCommandStatus::Ok => "OK",
            AtCommandStatus::Error => "error",
            AtCommandStatus::InvalidCommand => "invalid command",
            AtCommandStatus::InvalidParameter => "invalid parameter",
            AtCommandStatus::TxFailure => "transmission failure",
            AtCommandStatus::NoSecureSession => "no secure session",
            AtCommandStatus::EncryptionError => "encryption error",
            AtCommandStatus::CommandSentInsecurely => "command sent insecurely",
            AtCommandStatus::Unknown(_) => "unknown status",
        }
    }
}

impl fmt::Display for AtCommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtCommandStatus::Unknown(byte) => write!(f, "unknown status ({byte:#04x})"),
            other => f.write_str(other.description()),
        }
    }
}

/// Event reported by a modem status frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemStatusEvent {
    HardwareReset,
    WatchdogReset,
    JoinedNetwork,
    Disassociated,
    SynchronizationLost,
    CoordinatorRealignment,
    CoordinatorStarted,
    NetworkSecurityKeyUpdated,
    NetworkWokeUp,
    NetworkWentToSleep,
    VoltageSupplyExceeded,
    RemoteManagerConnected,
    RemoteManagerDisconnected,
    ConfigChangedWhileJoining,
    AccessFault,
    FatalError,
    BluetoothConnected,
    BluetoothDisconnected,
    StackError,
    ApNotConnected,
    ApNotFound,
    PskNotConfigured,
    SsidNotFound,
    FailedToJoinWithSecurity,
    InvalidChannel,
    FailedToJoinAp,
    /// A value outside the documented set, kept verbatim.
    Unknown(u8),
}

impl ModemStatusEvent {
    /// Decodes a modem status byte.
    pub fn from_byte(byte: u8) -> Self {
        use ModemStatusEvent::*;
        match byte {
            0x00 => HardwareReset,
            0x01 => WatchdogReset,
            0x02 => JoinedNetwork,
            0x03 => Disassociated,
            0x04 => SynchronizationLost,
            0x05 => CoordinatorRealignment,
            0x06 => CoordinatorStarted,
            0x07 => NetworkSecurityKeyUpdated,
            0x0B => NetworkWokeUp,
            0x0C => NetworkWentToSleep,
            0x0D => VoltageSupplyExceeded,
            0x0E => RemoteManagerConnected,
            0x0F => RemoteManagerDisconnected,
            0x11 => ConfigChangedWhileJoining,
            0x12 => AccessFault,
            0x13 => FatalError,
            0x32 => BluetoothConnected,
            0x33 => BluetoothDisconnected,
            0x80 => StackError,
            0x82 => ApNotConnected,
            0x83 => ApNotFound,
            0x84 => PskNotConfigured,
            0x87 => SsidNotFound,
            0x88 => FailedToJoinWithSecurity,
            0x8A => InvalidChannel,
            0x8E => FailedToJoinAp,
            other => Unknown(other),
        }
    }

    /// Wire value.
    pub fn byte(&self) -> u8 {
        use ModemStatusEvent::*;
        match self {
            HardwareReset => 0x00,
            WatchdogReset => 0x01,
            JoinedNetwork => 0x02,
            Disassociated => 0x03,
            SynchronizationLost => 0x04,
            CoordinatorRealignment => 0x05,
            CoordinatorStarted => 0x06,
            NetworkSecurityKeyUpdated => 0x07,
            NetworkWokeUp => 0x0B,
            NetworkWentToSleep => 0x0C,
            VoltageSupplyExceeded => 0x0D,
            RemoteManagerConnected => 0x0E,
            RemoteManagerDisconnected => 0x0F,
            ConfigChangedWhileJoining => 0x11,
            AccessFault => 0x12,
            FatalError => 0x13,
            BluetoothConnected => 0x32,
            BluetoothDisconnected => 0x33,
            StackError => 0x80,
            ApNotConnected => 0x82,
            ApNotFound => 0x83,
            PskNotConfigured => 0x84,
            SsidNotFound => 0x87,
            FailedToJoinWithSecurity => 0x88,
            InvalidChannel => 0x8A,
            FailedToJoinAp => 0x8E,
            Unknown(byte) => *byte,
        }
    }

    /// Conventional description of the event.
    pub fn description(&self) -> &'static str {
        use ModemStatusEvent::*;
        match self {
            HardwareReset => "hardware reset",
            WatchdogReset => "watchdog timer reset",
            JoinedNetwork => "joined network",
            Disassociated => "disassociated",
            SynchronizationLost => "synchronization lost",
            CoordinatorRealignment => "coordinator realignment",
            CoordinatorStarted => "coordinator started",
            NetworkSecurityKeyUpdated => "network security key updated",
            NetworkWokeUp => "network woke up",
            NetworkWentToSleep => "network went to sleep",
            VoltageSupplyExceeded => "voltage supply limit exceeded",
            RemoteManagerConnected => "Remote Manager connected",
            RemoteManagerDisconnected => "Remote Manager disconnected",
            ConfigChangedWhileJoining => "configuration changed while joining",
            AccessFault => "access fault",
            FatalError => "fatal error",
            BluetoothConnected => "Bluetooth connected",
            BluetoothDisconnected => "Bluetooth disconnected",
            StackError => "stack error",
            ApNotConnected => "access point not connected",
            ApNotFound => "access point not found",
            PskNotConfigured => "PSK not configured",
            SsidNotFound => "SSID not found",
            FailedToJoinWithSecurity => "failed to join with security enabled",
            InvalidChannel => "invalid channel",
            FailedToJoinAp => "failed to join access point",
            Unknown(_) => "unknown modem status",
        }
    }
}

impl fmt::Display for ModemStatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModemStatusEvent::Unknown(byte) => write!(f, "unknown modem status ({byte:#04x})"),
            other => f.write_str(other.description()),
        }
    }
}

/// Network protocol of an IP transmit or receive packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    Udp,
    Tcp,
    Tls,
}

impl IpProtocol {
    /// Decodes a protocol byte. Unassigned values are rejected by parsers.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(IpProtocol::Udp),
            1 => Some(IpProtocol::Tcp),
            4 => Some(IpProtocol::Tls),
            _ => None,
        }
    }

    /// Wire value.
    pub fn byte(&self) -> u8 {
        match self {
            IpProtocol::Udp => 0,
            IpProtocol::Tcp => 1,
            IpProtocol::Tls => 4,
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IpProtocol::Udp => "UDP",
            IpProtocol::Tcp => "TCP",
            IpProtocol::Tls => "TLS",
        };
        f.write_str(name)
    }
}

/// Local interface of a user data relay packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayInterface {
    /// The serial port (UART/SPI).
    Serial,
    /// Bluetooth Low Energy API service.
    Bluetooth,
    /// The MicroPython interpreter.
    MicroPython,
    /// A value outside the documented set, kept verbatim.
    Unknown(u8),
}

impl RelayInterface {
    /// Decodes an interface byte.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => RelayInterface::Serial,
            1 => RelayInterface::Bluetooth,
            2 => RelayInterface::MicroPython,
            other => RelayInterface::Unknown(other),
        }
    }

    /// Wire value.
    pub fn byte(&self) -> u8 {
        match self {
            RelayInterface::Serial => 0,
            RelayInterface::Bluetooth => 1,
            RelayInterface::MicroPython => 2,
            RelayInterface::Unknown(byte) => *byte,
        }
    }
}

impl fmt::Display for RelayInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayInterface::Serial => f.write_str("serial"),
            RelayInterface::Bluetooth => f.write_str("Bluetooth"),
            RelayInterface::MicroPython => f.write_str("MicroPython"),
            RelayInterface::Unknown(byte) => write!(f, "unknown interface ({byte:#04x})"),
        }
    }
}
