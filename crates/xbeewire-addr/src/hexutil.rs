//! String and byte-slice helpers shared by the address types.

use crate::error::{AddressError, Result};

/// Decodes a hex string into bytes.
///
/// Accepts an optional `0x`/`0X` prefix. An odd number of digits is read as
/// if the string were left-padded with a single `0`.
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() % 2 == 1 {
        let mut padded = String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        Ok(hex::decode(padded)?)
    } else {
        Ok(hex::decode(digits)?)
    }
}

/// Encodes bytes as upper-case hex, two digits per byte.
pub fn encode_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Copies `bytes` into a fixed-width array, left-padded with zeros.
pub(crate) fn pad_left<const N: usize>(bytes: &[u8]) -> Result<[u8; N]> {
    if bytes.len() > N {
        return Err(AddressError::TooLong {
            len: bytes.len(),
            max: N,
        });
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}
