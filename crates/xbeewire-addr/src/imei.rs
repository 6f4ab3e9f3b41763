use std::fmt;

use crate::error::{AddressError, Result};
use crate::hexutil;

/// IMEI of a cellular module.
///
/// Stored as eight bytes with the fifteen decimal digits packed one per
/// nibble and a single zero pad nibble in front, which is how cellular
/// modules report the value over the API.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Imei([u8; 8]);

impl Imei {
    /// Width of the wire form in bytes.
    pub const WIDTH: usize = 8;

    /// Builds an IMEI from up to eight raw bytes.
    ///
    /// Shorter input is left-padded with zeros; longer input is rejected.
    /// The bytes are taken as-is, no digit validation is applied.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Imei(hexutil::pad_left(bytes)?))
    }

    /// Parses a decimal digit string of up to fifteen digits.
    pub fn from_digits(s: &str) -> Result<Self> {
        if s.len() > 15 {
            return Err(AddressError::InvalidImei("more than 15 digits"));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AddressError::InvalidImei("non-digit character"));
        }
        // Decimal digits are valid hex digits, so nibble packing is a hex
        // decode of the zero-padded string.
        let packed = format!("{s:0>16}");
        Self::from_bytes(&hex::decode(packed)?)
    }

    /// Packed wire bytes.
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// The fifteen-digit string form (pad nibble dropped).
    pub fn digits(&self) -> String {
        hexutil::encode_upper(&self.0)[1..].to_string()
    }
}

impl fmt::Display for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits())
    }
}

impl fmt::Debug for Imei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Imei({self})")
    }
}
