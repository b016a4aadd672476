//! Signature hash computation for transaction signing.
//!
//! Computes the per-input hash a key signs to authorize spending a UTXO.
//! The layout resembles BIP-143: whole-transaction sub-hashes of outpoints,
//! sequences, signature-operation counts and outputs, followed by the data of
//! the input being signed. Every hash is keyed BLAKE2b under the
//! `TransactionSigningHash` domain.

use kas_primitives::hash::{sha256, HashDomain, HashWriter, ECDSA_SIGNING_DOMAIN};
use kas_primitives::util::KasWriter;
use kas_script::ScriptClass;
use tracing::trace;

use crate::transaction::Transaction;
use crate::TransactionError;

const LOG_TARGET: &str = "kas::tx::sighash";

/// The all-zero hash written in place of an omitted sub-hash.
pub const ZERO_HASH: [u8; 32] = [0u8; 32];

// -----------------------------------------------------------------------
// Sighash type
// -----------------------------------------------------------------------

/// Sign all inputs and all outputs (the default).
pub const SIG_HASH_ALL: SigHashType = SigHashType(0x01);

/// Sign all inputs but no outputs, allowing outputs to be modified.
pub const SIG_HASH_NONE: SigHashType = SigHashType(0x02);

/// Sign all inputs and only the output with the same index as the signed input.
pub const SIG_HASH_SINGLE: SigHashType = SigHashType(0x04);

/// Combined with another flag: only sign the current input.
pub const SIG_HASH_ANYONECANPAY: u8 = 0x80;

const SIG_HASH_MASK: u8 = 0x07;

/// A validated sighash type byte.
///
/// Exactly one of ALL, NONE or SINGLE, optionally combined with ANYONECANPAY.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SigHashType(u8);

impl SigHashType {
    /// Validate a raw sighash type byte.
    ///
    /// # Returns
    /// The type, or `InvalidSigHashType` for any other combination.
    pub fn from_u8(value: u8) -> Result<Self, TransactionError> {
        match value & !SIG_HASH_ANYONECANPAY {
            0x01 | 0x02 | 0x04 => Ok(SigHashType(value)),
            _ => Err(TransactionError::InvalidSigHashType(value)),
        }
    }

    /// The same base type with ANYONECANPAY set.
    pub fn with_anyone_can_pay(self) -> Self {
        SigHashType(self.0 | SIG_HASH_ANYONECANPAY)
    }

    /// The raw byte appended to signatures.
    pub fn to_u8(self) -> u8 {
        self.0
    }

    /// Whether the base type is ALL.
    pub fn is_all(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_ALL.0
    }

    /// Whether the base type is NONE.
    pub fn is_none(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_NONE.0
    }

    /// Whether the base type is SINGLE.
    pub fn is_single(self) -> bool {
        self.0 & SIG_HASH_MASK == SIG_HASH_SINGLE.0
    }

    /// Whether ANYONECANPAY is set.
    pub fn is_anyone_can_pay(self) -> bool {
        self.0 & SIG_HASH_ANYONECANPAY != 0
    }
}

impl Default for SigHashType {
    fn default() -> Self {
        SIG_HASH_ALL
    }
}

impl TryFrom<u8> for SigHashType {
    type Error = TransactionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value)
    }
}

// -----------------------------------------------------------------------
// Reused sub-hashes
// -----------------------------------------------------------------------

/// Sub-hashes shared by every input of one transaction.
///
/// The memo borrows the transaction it was created for, so its stored
/// hashes can never be applied to another one.
#[derive(Debug, Clone)]
pub struct SigHashReusedValues<'a> {
    tx: &'a Transaction,
    previous_outputs_hash: Option<[u8; 32]>,
    sequences_hash: Option<[u8; 32]>,
    sig_op_counts_hash: Option<[u8; 32]>,
    outputs_hash: Option<[u8; 32]>,
}

impl<'a> SigHashReusedValues<'a> {
    /// Start an empty memo for `tx`.
    pub fn new(tx: &'a Transaction) -> Self {
        SigHashReusedValues {
            tx,
            previous_outputs_hash: None,
            sequences_hash: None,
            sig_op_counts_hash: None,
            outputs_hash: None,
        }
    }

    /// The transaction the memo describes.
    pub fn transaction(&self) -> &'a Transaction {
        self.tx
    }
}

fn sub_hash(f: impl FnOnce(&mut KasWriter)) -> [u8; 32] {
    let mut hasher = HashWriter::new(HashDomain::TransactionSigning);
    f(&mut *hasher);
    hasher.finalize()
}

/// Hash of every input's outpoint; zero under ANYONECANPAY.
pub fn previous_outputs_hash(
    hash_type: SigHashType,
    reused: &mut SigHashReusedValues<'_>,
) -> [u8; 32] {
    if hash_type.is_anyone_can_pay() {
        return ZERO_HASH;
    }
    let tx = reused.tx;
    *reused.previous_outputs_hash.get_or_insert_with(|| {
        sub_hash(|w| {
            for input in &tx.inputs {
                input.previous_outpoint.write_to(w);
            }
        })
    })
}

/// Hash of every input's sequence; zero under SINGLE, NONE or ANYONECANPAY.
pub fn sequences_hash(
    hash_type: SigHashType,
    reused: &mut SigHashReusedValues<'_>,
) -> [u8; 32] {
    if hash_type.is_single() || hash_type.is_none() || hash_type.is_anyone_can_pay() {
        return ZERO_HASH;
    }
    let tx = reused.tx;
    *reused.sequences_hash.get_or_insert_with(|| {
        sub_hash(|w| {
            for input in &tx.inputs {
                w.write_u64_le(input.sequence);
            }
        })
    })
}

/// Hash of every input's signature-operation count; zero under ANYONECANPAY.
pub fn sig_op_counts_hash(
    hash_type: SigHashType,
    reused: &mut SigHashReusedValues<'_>,
) -> [u8; 32] {
    if hash_type.is_anyone_can_pay() {
        return ZERO_HASH;
    }
    let tx = reused.tx;
    *reused.sig_op_counts_hash.get_or_insert_with(|| {
        sub_hash(|w| {
            for input in &tx.inputs {
                w.write_u8(input.sig_op_count);
            }
        })
    })
}

/// Hash of the outputs committed to by `hash_type`.
///
/// NONE commits to nothing; SINGLE to the output at `input_index` (nothing
/// if there is none); otherwise to all outputs, memoized.
pub fn outputs_hash(
    hash_type: SigHashType,
    input_index: usize,
    reused: &mut SigHashReusedValues<'_>,
) -> [u8; 32] {
    if hash_type.is_none() {
        return ZERO_HASH;
    }
    let tx = reused.tx;
    if hash_type.is_single() {
        return match tx.outputs.get(input_index) {
            Some(output) => sub_hash(|w| output.write_to(w)),
            None => ZERO_HASH,
        };
    }
    *reused.outputs_hash.get_or_insert_with(|| {
        sub_hash(|w| {
            for output in &tx.outputs {
                output.write_to(w);
            }
        })
    })
}

// -----------------------------------------------------------------------
// Signature hash
// -----------------------------------------------------------------------

/// Compute the Schnorr signature hash for a given input.
///
/// # Arguments
/// * `reused`      - Sub-hash memo of the transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `hash_type`   - Which parts of the transaction the signature commits to.
///
/// # Returns
/// The 32-byte digest to sign, or an error if the index has no input or UTXO.
pub fn signature_hash(
    reused: &mut SigHashReusedValues<'_>,
    input_index: usize,
    hash_type: SigHashType,
) -> Result<[u8; 32], TransactionError> {
    let tx = reused.tx;
    let (input, utxo) = match (tx.inputs.get(input_index), tx.utxos.get(input_index)) {
        (Some(input), Some(utxo)) => (input, utxo),
        _ => {
            return Err(TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs, {} utxos)",
                input_index,
                tx.inputs.len(),
                tx.utxos.len()
            )))
        }
    };

    let mut hasher = HashWriter::new(HashDomain::TransactionSigning);
    hasher.write_u16_le(tx.version);
    hasher.write_bytes(&previous_outputs_hash(hash_type, reused));
    hasher.write_bytes(&sequences_hash(hash_type, reused));
    hasher.write_bytes(&sig_op_counts_hash(hash_type, reused));

    input.previous_outpoint.write_to(&mut hasher);
    hasher.write_u16_le(utxo.script_public_key.version);
    hasher.write_var_bytes(utxo.script_public_key.script.to_bytes());
    hasher.write_u64_le(utxo.amount);
    hasher.write_u64_le(input.sequence);
    hasher.write_u8(input.sig_op_count);

    hasher.write_bytes(&outputs_hash(hash_type, input_index, reused));
    hasher.write_u64_le(tx.lock_time);
    hasher.write_bytes(&tx.subnetwork_id);
    hasher.write_u64_le(tx.gas);
    hasher.write_bytes(&ZERO_HASH);
    hasher.write_u8(hash_type.to_u8());

    let digest = hasher.finalize();
    trace!(target: LOG_TARGET, input_index, hash_type = hash_type.to_u8(), sighash = %hex::encode(digest), "computed signature hash");
    Ok(digest)
}

/// Compute the ECDSA signature hash for a given input.
///
/// `SHA-256(SHA-256("TransactionSigningHashECDSA") ‖ schnorr_sighash)`.
pub fn signature_hash_ecdsa(
    reused: &mut SigHashReusedValues<'_>,
    input_index: usize,
    hash_type: SigHashType,
) -> Result<[u8; 32], TransactionError> {
    let schnorr = signature_hash(reused, input_index, hash_type)?;
    let mut preimage = Vec::with_capacity(64);
    preimage.extend_from_slice(&sha256(ECDSA_SIGNING_DOMAIN));
    preimage.extend_from_slice(&schnorr);
    Ok(sha256(&preimage))
}

/// Compute the hash each input's key must sign.
///
/// Inputs spending an ECDSA locking script get the ECDSA digest, all
/// others the Schnorr digest. Sub-hashes are shared across the pass.
pub fn input_signature_hashes(
    tx: &Transaction,
    hash_type: SigHashType,
) -> Result<Vec<[u8; 32]>, TransactionError> {
    let mut reused = SigHashReusedValues::new(tx);
    (0..tx.inputs.len())
        .map(|i| match tx.utxos.get(i).map(|u| u.script_public_key.script.class()) {
            Some(ScriptClass::PubKeyEcdsa) => signature_hash_ecdsa(&mut reused, i, hash_type),
            _ => signature_hash(&mut reused, i, hash_type),
        })
        .collect()
}
