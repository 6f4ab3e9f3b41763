//! Blocking, filterable queue for decoded XBee API packets.
//!
//! The transport reader thread pushes every packet it decodes; consumers
//! pop in arrival order, either any packet or the first one matching a
//! predicate, with optional blocking up to a timeout. The queue is bounded:
//! at capacity the oldest packet is dropped so a slow consumer can never
//! stall the radio link.

pub mod error;
pub mod queue;

pub use error::{QueueError, Result};
pub use queue::{PacketQueue, DEFAULT_CAPACITY};
