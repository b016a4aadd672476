/// Kaspa signer SDK - Hashing, identifiers, and binary encoding primitives.
///
/// This crate provides the foundational building blocks for the signer SDK:
/// - Domain-separated keyed BLAKE2b hashing and the `HashWriter` accumulator
/// - SHA-256 for the ECDSA signing digest
/// - 32-byte `Hash` identifier type for transaction ids
/// - Little/big-endian binary writer and reader
/// - Base32 charset, polymod checksum, and bit repacking for addresses

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base32;

mod error;
pub use error::PrimitivesError;
