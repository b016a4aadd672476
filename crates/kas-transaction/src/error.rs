/// Error types for transaction construction, validation and signing.
///
/// Validation variants are raised before any external signing round-trip
/// and are never retried internally.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// An address failed to decode, or belongs to another network.
    #[error("address format error: {0}")]
    AddressFormat(#[from] kas_script::ScriptError),
    /// An input descriptor is missing, empty or unsignable.
    #[error("input validation error: {0}")]
    InputValidation(String),
    /// An output descriptor is missing or carries a zero value.
    #[error("output validation error: {0}")]
    OutputValidation(String),
    /// The value has more integer digits than the signer can display.
    #[error("value {value} exceeds the displayable limit (must be below {limit})")]
    DisplayOverflow { value: u64, limit: u64 },
    /// An output is below the dust floor.
    #[error("output value {value} is below the dust floor of {dust_floor}")]
    Dust { value: u64, dust_floor: u64 },
    /// The transaction mass is over the network ceiling.
    #[error("transaction mass {mass} exceeds the maximum of {max_mass}")]
    MassExceeded { mass: u64, max_mass: u64 },
    /// The supplied fee is below the computed minimum.
    #[error("fee {fee} is below the minimum fee of {minimum}")]
    FeeInsufficient { fee: u64, minimum: u64 },
    /// The change output is non-positive or unsignable.
    #[error("change validation error: {0}")]
    ChangeValidation(String),
    /// Signatures do not line up with the transaction's inputs.
    #[error("signature state error: {0}")]
    SignatureState(String),
    /// The transaction structure is invalid (e.g. an input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    /// Encoding the broadcast message failed.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// A sighash type byte outside the defined combinations.
    #[error("invalid sighash type: {0:#04x}")]
    InvalidSigHashType(u8),
    /// An amount string is malformed or does not fit in 64 bits.
    #[error("amount error: {0}")]
    AmountOverflow(String),
    /// A key-derivation path could not be parsed.
    #[error("invalid derivation path: {0}")]
    InvalidDerivationPath(String),
    /// The external signer reported a failure.
    #[error("signer error: {0}")]
    Signer(String),
    /// An underlying primitives error (forwarded from `kas-primitives`).
    #[error("primitives error: {0}")]
    Primitives(#[from] kas_primitives::PrimitivesError),
}
