//! Option bitmasks carried in transmit and receive packets.
//!
//! The same bit can mean different things on different protocols; each flag
//! is listed under its most common reading, and unrecognized bits are kept
//! as-is so a parsed packet re-serializes byte for byte.

use bitflags::bitflags;

bitflags! {
    /// Options byte of transmit request packets.
    ///
    /// Some combinations only make sense on one protocol (route discovery is
    /// DigiMesh, APS encryption is Zigbee); the module ignores bits it does
    /// not support.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TransmitOptions: u8 {
        /// Disable acknowledgement.
        const DISABLE_ACK = 0x01;
        /// Disable route discovery and repair (DigiMesh).
        const DISABLE_ROUTE_DISCOVERY = 0x02;
        /// Queue for an asleep end device (indirect transmission).
        const INDIRECT_TRANSMISSION = 0x04;
        /// Multicast transmission.
        const MULTICAST = 0x08;
        /// Encrypt with the secure session key.
        const SECURE_SESSION_ENCRYPTION = 0x10;
        /// Enable APS encryption, when `EE` is set (Zigbee).
        const ENABLE_APS_ENCRYPTION = 0x20;
        /// Use the extended transmission timeout.
        const USE_EXTENDED_TIMEOUT = 0x40;
    }
}

bitflags! {
    /// Options byte of receive indicator packets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ReceiveOptions: u8 {
        /// The sender requested and received an acknowledgement.
        const PACKET_ACKNOWLEDGED = 0x01;
        /// The packet was an address broadcast.
        const BROADCAST_PACKET = 0x02;
        /// The packet was a PAN broadcast (802.15.4).
        const PAN_BROADCAST = 0x04;
        /// The packet was APS-encrypted (Zigbee).
        const APS_ENCRYPTED = 0x20;
        /// The packet came from an end device.
        const SENT_FROM_END_DEVICE = 0x40;
    }
}

bitflags! {
    /// Options byte of remote AT command request packets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RemoteAtOptions: u8 {
        /// Disable acknowledgement.
        const DISABLE_ACK = 0x01;
        /// Apply changes immediately instead of waiting for `AC`.
        const APPLY_CHANGES = 0x02;
        /// Send securely over an established secure session.
        const SECURE_SESSION_ENCRYPTION = 0x10;
        /// Use the extended transmission timeout.
        const USE_EXTENDED_TIMEOUT = 0x40;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_survive_a_round_trip() {
        let opts = TransmitOptions::from_bits_retain(0x88);
        assert!(opts.contains(TransmitOptions::MULTICAST));
        assert_eq!(opts.bits(), 0x88);
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(TransmitOptions::default().bits(), 0);
        assert_eq!(ReceiveOptions::default().bits(), 0);
        assert_eq!(RemoteAtOptions::default().bits(), 0);
    }

    #[test]
    fn broadcast_flags_are_distinct() {
        let opts = ReceiveOptions::BROADCAST_PACKET | ReceiveOptions::PAN_BROADCAST;
        assert_eq!(opts.bits(), 0x06);
    }
}
