/// Unified error type for all primitives operations.
///
/// Covers errors from identifier parsing, binary decoding, and base32 encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid base32 character '{0}'")]
    InvalidBase32Char(char),

    #[error("invalid bit width: from {from} to {to}")]
    InvalidBitWidth { from: u32, to: u32 },

    #[error("invalid value {value} for {bits}-bit group")]
    InvalidBitGroup { value: u8, bits: u32 },

    #[error("invalid padding in bit conversion")]
    InvalidPadding,

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
