use crate::types::ApiFrameType;

/// Errors that can occur when parsing or building API packets.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// The frame data is shorter than the packet layout requires.
    #[error("{frame_type} frame too short ({actual} payload bytes, need {minimum})")]
    IncompleteFrame {
        frame_type: ApiFrameType,
        /// Payload bytes (after the type byte) the layout needs.
        minimum: usize,
        actual: usize,
    },

    /// The frame type byte is not in the registry.
    #[error("unknown frame type {0:#04x}")]
    UnknownFrameType(u8),

    /// The frame data carries a different type byte than the packet parser.
    #[error("frame type mismatch (expected {expected}, found {found:#04x})")]
    InvalidFrameType { expected: ApiFrameType, found: u8 },

    /// A field holds a value outside its legal range.
    #[error("invalid {field}: {reason}")]
    InvalidFieldValue {
        field: &'static str,
        reason: String,
    },

    /// A TLV element header needs at least three bytes.
    #[error("TLV too short ({len} bytes, minimum 3)")]
    TlvTooShort { len: usize },

    /// A TLV declared more value bytes than the buffer holds.
    #[error("TLV value overruns buffer (declared {declared}, available {available})")]
    TlvOverrun { declared: usize, available: usize },
}

pub type Result<T> = std::result::Result<T, PacketError>;
