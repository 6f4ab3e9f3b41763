use std::fmt;

use crate::error::Result;
use crate::hexutil;

/// 64-bit extended address of a module.
///
/// This is the factory-assigned MAC and the stable identity of a device.
/// Serialized big-endian on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Addr64([u8; 8]);

impl Addr64 {
    /// Width of the wire form in bytes.
    pub const WIDTH: usize = 8;

    /// Broadcast address (`0x000000000000FFFF`).
    pub const BROADCAST: Addr64 = Addr64([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF]);

    /// The network coordinator (`0x0000000000000000`).
    pub const COORDINATOR: Addr64 = Addr64([0x00; 8]);

    /// Placeholder when the 64-bit address is not known (`0xFFFFFFFFFFFFFFFF`).
    pub const UNKNOWN: Addr64 = Addr64([0xFF; 8]);

    /// Builds an address from its numeric value.
    pub const fn new(value: u64) -> Self {
        Addr64(value.to_be_bytes())
    }

    /// Builds an address from up to eight big-endian bytes.
    ///
    /// Shorter input is left-padded with zeros; longer input is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Addr64(hexutil::pad_left(bytes)?))
    }

    /// Parses a hex string, optionally `0x`-prefixed.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&hexutil::decode(s)?)
    }

    /// Wire bytes, big-endian.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// Numeric value.
    pub const fn as_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    /// True for the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl From<u64> for Addr64 {
    fn from(value: u64) -> Self {
        Addr64::new(value)
    }
}

impl fmt::Display for Addr64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hexutil::encode_upper(&self.0))
    }
}

impl fmt::Debug for Addr64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr64({self})")
    }
}
