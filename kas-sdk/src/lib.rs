#![deny(missing_docs)]

//! Kaspa signer SDK - Complete SDK.
//!
//! Re-exports all signer SDK components for convenient single-crate usage:
//! build a transaction from a descriptor, validate it, hand the signer
//! arguments to an external signer and assemble the result.

/// Hashing, identifiers, binary encoding and base32.
pub use kas_primitives as primitives;
/// Addresses and locking scripts.
pub use kas_script as script;
/// Transactions, sighash, mass, validation and signing.
pub use kas_transaction as transaction;

pub use kas_script::{Address, Prefix};
pub use kas_transaction::{
    sign_transaction, ExternalSigner, NetworkParams, SignRequest, SignatureAssembler, Transaction,
    TransactionDescriptor, TransactionError, Validator,
};
