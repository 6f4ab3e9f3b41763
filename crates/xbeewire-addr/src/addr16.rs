use std::fmt;

use crate::error::Result;
use crate::hexutil;

/// 16-bit network address of a module.
///
/// Serialized big-endian on the wire. `0xFFFF` broadcasts to every module on
/// the PAN; modules that have not joined (or do not use 16-bit addressing)
/// report `0xFFFE`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Addr16([u8; 2]);

impl Addr16 {
    /// Width of the wire form in bytes.
    pub const WIDTH: usize = 2;

    /// Broadcast address (`0xFFFF`).
    pub const BROADCAST: Addr16 = Addr16([0xFF, 0xFF]);

    /// Reported by modules without a usable 16-bit address (`0xFFFE`).
    pub const UNKNOWN: Addr16 = Addr16([0xFF, 0xFE]);

    /// The PAN coordinator (`0x0000`).
    pub const COORDINATOR: Addr16 = Addr16([0x00, 0x00]);

    /// Builds an address from its numeric value.
    pub const fn new(value: u16) -> Self {
        Addr16(value.to_be_bytes())
    }

    /// Builds an address from up to two big-endian bytes.
    ///
    /// Shorter input is left-padded with zeros; longer input is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Addr16(hexutil::pad_left(bytes)?))
    }

    /// Parses a hex string, optionally `0x`-prefixed.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&hexutil::decode(s)?)
    }

    /// Wire bytes, big-endian.
    pub const fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }

    /// Numeric value.
    pub const fn as_u16(&self) -> u16 {
        u16::from_be_bytes(self.0)
    }

    /// True for the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl From<u16> for Addr16 {
    fn from(value: u16) -> Self {
        Addr16::new(value)
    }
}

impl fmt::Display for Addr16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hexutil::encode_upper(&self.0))
    }
}

impl fmt::Debug for Addr16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr16({self})")
    }
}
