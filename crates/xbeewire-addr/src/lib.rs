//! Address types shared across the XBee API protocol layers.
//!
//! Three fixed-width address forms appear in API frames:
//! - [`Addr16`] — 16-bit network address (802.15.4 / Zigbee)
//! - [`Addr64`] — 64-bit extended address (the factory MAC)
//! - [`Imei`] — cellular module IMEI, packed one digit per nibble
//!
//! All of them serialize big-endian and can be built from a byte slice up to
//! their width (shorter input is left-padded with zeros) or from a string
//! form. IP addressing uses `std::net::{Ipv4Addr, Ipv6Addr}` directly; there
//! is no local wrapper for those.

pub mod addr16;
pub mod addr64;
pub mod error;
pub mod hexutil;
pub mod imei;

pub use addr16::Addr16;
pub use addr64::Addr64;
pub use error::{AddressError, Result};
pub use imei::Imei;
