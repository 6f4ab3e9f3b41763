//! Queue error type.

/// Errors from queue construction.
///
/// Runtime operations never fail: a full queue evicts its oldest entry and
/// an empty pop returns `None`.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// A queue needs room for at least one packet.
    #[error("invalid queue capacity {0}, must be at least 1")]
    InvalidCapacity(usize),
}

/// Convenience alias for queue results.
pub type Result<T> = std::result::Result<T, QueueError>;
