/// Kaspa signer SDK - Transaction construction, validation and signing.
///
/// Builds an unsigned transaction from a caller-supplied descriptor,
/// validates it against network policy (mass, fee, dust, display limits),
/// produces the signature hashes and external-signer arguments, and
/// attaches the returned signatures for broadcast.

pub mod amount;
pub mod assembler;
pub mod broadcast;
pub mod derivation;
pub mod descriptor;
pub mod input;
pub mod mass;
pub mod output;
pub mod params;
pub mod sighash;
pub mod signer;
pub mod transaction;
pub mod validation;

mod error;
pub use assembler::{sign_transaction, SignatureAssembler};
pub use derivation::DerivationPath;
pub use descriptor::{ChangeDescriptor, InputDescriptor, OutputDescriptor, TransactionDescriptor};
pub use error::TransactionError;
pub use input::{Outpoint, TransactionInput, UtxoEntry};
pub use output::TransactionOutput;
pub use params::NetworkParams;
pub use sighash::{SigHashReusedValues, SigHashType};
pub use signer::{ExternalSigner, SignRequest};
pub use transaction::{Change, Transaction};
pub use validation::{FeeSummary, Validator};
