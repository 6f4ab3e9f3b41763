//! Typed XBee API packets on top of the frame codec.
//!
//! A decoded [`Frame`](xbeewire_frame::Frame) is still opaque: one type
//! byte and a payload. This crate gives each registered frame type a
//! struct with named fields, a payload codec and field-level validation,
//! and ties them together in [`ApiPacket`], the tagged union produced by
//! tag dispatch.
//!
//! Design points worth knowing:
//! - Parsing is strict about layout (every fixed field must be present)
//!   but lenient about values the firmware may extend: status bytes are
//!   stored raw, with typed views like
//!   [`AtCommandResponse::command_status`](common::AtCommandResponse::command_status)
//!   interpreting them on demand. A packet decoded from the wire always
//!   re-serializes byte-exact.
//! - Frame type tags nobody registered are decode errors, never silently
//!   wrapped packets.
//! - Option bytes keep unknown bits ([`bitflags`] `from_bits_retain`).

pub mod bluetooth;
pub mod common;
mod cursor;
pub mod devicecloud;
pub mod error;
pub mod generic;
pub mod ip;
pub mod options;
pub mod packet;
pub mod raw;
pub mod relay;
pub mod status;
pub mod tlv;
pub mod types;
pub mod wifi;
pub mod zigbee;

pub use xbeewire_addr::{Addr16, Addr64};

pub use error::{PacketError, Result};
pub use options::{ReceiveOptions, RemoteAtOptions, TransmitOptions};
pub use packet::{ApiPacket, Packet};
pub use status::{AtCommandStatus, IpProtocol, ModemStatusEvent, RelayInterface};
pub use tlv::Tlv;
pub use types::{ApiFrameType, AtCmd};
