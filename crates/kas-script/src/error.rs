/// Error types for address and script operations.
///
/// Every address decoding failure is an address-format problem: a caller
/// must fix the input, retrying cannot help.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Structurally invalid address string (missing separator, empty payload).
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The prefix is not one of the known networks.
    #[error("unknown address prefix '{0}'")]
    UnknownPrefix(String),

    /// The prefix is valid but belongs to another network.
    #[error("address prefix '{found}' does not match network prefix '{expected}'")]
    WrongNetwork {
        /// The prefix the caller required.
        expected: String,
        /// The prefix found in the address.
        found: String,
    },

    /// The address mixes upper- and lower-case characters.
    #[error("address mixes upper and lower case")]
    MixedCase,

    /// A character outside the base32 alphabet.
    #[error("invalid address character '{0}'")]
    InvalidCharacter(char),

    /// The polymod checksum does not verify.
    #[error("address checksum failed")]
    ChecksumFailed,

    /// The version byte is not a known address version.
    #[error("unsupported address version {0}")]
    UnsupportedVersion(u8),

    /// The payload length does not match the version.
    #[error("invalid payload length for address version {version}: expected {expected}, got {got}")]
    InvalidPayloadLength {
        /// The address version byte.
        version: u8,
        /// The length the version requires.
        expected: usize,
        /// The length actually present.
        got: usize,
    },

    /// The script is not one of the standard locking-script templates.
    #[error("non-standard script: {0}")]
    NonStandardScript(String),

    /// Push data exceeds what a single push can carry.
    #[error("data too big: {0} bytes")]
    DataTooBig(usize),

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Error from primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] kas_primitives::PrimitivesError),
}
