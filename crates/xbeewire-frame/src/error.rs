use crate::mode::OperatingMode;

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The checksum byte did not match the frame data.
    #[error("checksum mismatch (received {expected:#04x}, computed {computed:#04x})")]
    ChecksumMismatch {
        /// Checksum byte carried on the wire.
        expected: u8,
        /// Checksum recomputed over the received frame data.
        computed: u8,
    },

    /// The frame data exceeds the configured maximum size.
    #[error("frame too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Frame I/O was attempted in a mode without API framing.
    #[error("{0} does not support API frames")]
    UnsupportedOperatingMode(OperatingMode),

    /// An escaped byte run ended on a lone escape introducer.
    #[error("escape introducer at end of input")]
    TruncatedEscape,

    /// The length field was zero, leaving no room for the type byte.
    #[error("frame length field is zero")]
    EmptyFrame,

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
