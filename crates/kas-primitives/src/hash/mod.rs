//! Hash function primitives for the signer SDK.
//!
//! Provides SHA-256 and the domain-separated keyed BLAKE2b-256 hashes used
//! throughout the Kaspa protocol. Each protocol hash uses a fixed domain
//! string as the BLAKE2b key, so a signature hash can never collide with a
//! transaction id computed over the same bytes.

use std::ops::{Deref, DerefMut};

use blake2::digest::consts::U32;
use blake2::digest::Mac;
use blake2::Blake2bMac;
use sha2::{Digest, Sha256};

use crate::util::KasWriter;

/// Keyed BLAKE2b with a 32-byte output.
type Blake2bMac256 = Blake2bMac<U32>;

/// Domain string for the ECDSA signing digest prefix.
pub const ECDSA_SIGNING_DOMAIN: &[u8] = b"TransactionSigningHashECDSA";

/// Protocol hash domains.
///
/// The domain string is used verbatim as the BLAKE2b key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashDomain {
    /// Per-input signature hash.
    TransactionSigning,
    /// Transaction id (signature scripts excluded).
    TransactionId,
    /// Full transaction hash (signature scripts included).
    Transaction,
}

impl HashDomain {
    /// Return the BLAKE2b key bytes for this domain.
    ///
    /// # Returns
    /// The ASCII domain string.
    pub fn key(&self) -> &'static [u8] {
        match self {
            HashDomain::TransactionSigning => b"TransactionSigningHash",
            HashDomain::TransactionId => b"TransactionID",
            HashDomain::Transaction => b"TransactionHash",
        }
    }
}

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the keyed BLAKE2b-256 hash of `data` under `domain`.
///
/// # Arguments
/// * `domain` - The protocol domain whose key personalizes the hash.
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte digest.
pub fn domain_hash(domain: HashDomain, data: &[u8]) -> [u8; 32] {
    let mut mac = Blake2bMac256::new_with_salt_and_personal(domain.key(), &[], &[])
        .expect("domain keys are shorter than the BLAKE2b key limit");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// A domain-separated hash writer.
///
/// Accumulates heterogeneous fields into one buffer through the `KasWriter`
/// methods it dereferences to, then finalizes with the keyed BLAKE2b hash of
/// its domain.
///
/// ```
/// use kas_primitives::hash::{HashDomain, HashWriter};
///
/// let mut hasher = HashWriter::new(HashDomain::TransactionSigning);
/// hasher.write_u16_le(0);
/// hasher.write_var_bytes(&[0xac]);
/// let digest = hasher.finalize();
/// assert_eq!(digest.len(), 32);
/// ```
pub struct HashWriter {
    domain: HashDomain,
    writer: KasWriter,
}

impl HashWriter {
    /// Create an empty writer for the given domain.
    ///
    /// # Arguments
    /// * `domain` - The domain used as the key at finalization.
    ///
    /// # Returns
    /// A `HashWriter` with an empty buffer.
    pub fn new(domain: HashDomain) -> Self {
        HashWriter {
            domain,
            writer: KasWriter::with_capacity(256),
        }
    }

    /// The domain this writer finalizes under.
    pub fn domain(&self) -> HashDomain {
        self.domain
    }

    /// Consume the writer and hash the accumulated bytes.
    ///
    /// # Returns
    /// The 32-byte keyed BLAKE2b digest.
    pub fn finalize(self) -> [u8; 32] {
        domain_hash(self.domain, self.writer.as_bytes())
    }
}

impl Deref for HashWriter {
    type Target = KasWriter;

    fn deref(&self) -> &KasWriter {
        &self.writer
    }
}

impl DerefMut for HashWriter {
    fn deref_mut(&mut self) -> &mut KasWriter {
        &mut self.writer
    }
}
