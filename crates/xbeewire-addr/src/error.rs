/// Errors that can occur when constructing address values.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    /// More bytes were supplied than the address type holds.
    #[error("address too long ({len} bytes, max {max})")]
    TooLong { len: usize, max: usize },

    /// The string form contains a character that is not a hex digit.
    #[error("invalid hex in address string: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The IMEI string form is not a plain decimal digit string.
    #[error("invalid IMEI string: {0}")]
    InvalidImei(&'static str),
}

pub type Result<T> = std::result::Result<T, AddressError>;
