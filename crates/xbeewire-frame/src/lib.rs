//! XBee API frame codec.
//!
//! Every API exchange with a module travels in the same envelope:
//! - A start delimiter (`0x7E`) for stream synchronization
//! - A 2-byte big-endian length counting the frame data
//! - The frame data: one type byte plus payload
//! - A 1-byte ones'-complement checksum over the frame data
//!
//! In escaped operating mode (`AP=2`) every byte after the delimiter
//! additionally goes through control-byte escaping, so the delimiter stays
//! unique in the stream. Partial input is never an error: the streaming
//! decoder reports "need more bytes" and resumes where it left off.

pub mod checksum;
pub mod codec;
pub mod error;
pub mod escape;
pub mod mode;
pub mod reader;
pub mod writer;

pub use codec::{
    decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_FRAME_SIZE, FRAME_DELIMITER,
};
pub use error::{FrameError, Result};
pub use escape::SpecialByte;
pub use mode::OperatingMode;
pub use reader::FrameReader;
pub use writer::FrameWriter;
