//! XBee API frame protocol in Rust.
//!
//! xbeewire speaks the framed binary protocol of Digi XBee radio modules:
//! delimiter-synchronized frames with checksums and optional control-byte
//! escaping, a typed registry of API packets, and a thread-safe queue for
//! routing received packets to consumers.
//!
//! # Crate Structure
//!
//! - [`addr`] — Addressing primitives (16/64-bit addresses, IMEI)
//! - [`frame`] — Stream-safe frame codec over any `Read`/`Write`
//! - [`packet`] — Frame type registry and typed packet layouts
//! - [`queue`] — Bounded, blocking, filterable packet queue

/// Re-export addressing types.
pub mod addr {
    pub use xbeewire_addr::*;
}

/// Re-export frame codec types.
pub mod frame {
    pub use xbeewire_frame::*;
}

/// Re-export packet types.
pub mod packet {
    pub use xbeewire_packet::*;
}

/// Re-export queue types.
pub mod queue {
    pub use xbeewire_queue::*;
}
