//! Transaction input and the UTXO it spends.
//!
//! Inputs and UTXO entries are paired by position: the entry at index `i`
//! of `Transaction::utxos` describes the output spent by input `i`.

use kas_primitives::chainhash::Hash;
use kas_primitives::util::KasWriter;
use kas_script::{Script, ScriptPublicKey};

use crate::derivation::DerivationPath;

/// Sequence assigned to every input built from a descriptor.
pub const DEFAULT_SEQUENCE: u64 = 0;

/// Signature operations of a single-signature input.
pub const DEFAULT_SIG_OP_COUNT: u8 = 1;

/// Placeholder signature-script length used for unsigned inputs:
/// a 1-byte push, a 64-byte Schnorr signature and the sighash-type byte.
pub const SIGNATURE_SCRIPT_PLACEHOLDER_LEN: u64 = 66;

/// Reference to a previously created output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outpoint {
    /// Id of the transaction that created the output.
    pub transaction_id: Hash,
    /// Index of the output within that transaction.
    pub index: u32,
}

impl Outpoint {
    /// Reference output `index` of transaction `transaction_id`.
    pub fn new(transaction_id: Hash, index: u32) -> Self {
        Outpoint { transaction_id, index }
    }

    /// Write `txid (32, network order) ‖ index (4, LE)`.
    pub fn write_to(&self, writer: &mut KasWriter) {
        writer.write_reversed(self.transaction_id.as_bytes());
        writer.write_u32_le(self.index);
    }
}

/// A single input in a Kaspa transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    /// The output being spent.
    pub previous_outpoint: Outpoint,

    /// Unlocking data. Empty until a signature is attached.
    pub signature_script: Script,

    /// Sequence number (`DEFAULT_SEQUENCE` for descriptor-built inputs).
    pub sequence: u64,

    /// Signature operations this input performs.
    pub sig_op_count: u8,
}

impl TransactionInput {
    /// Create an unsigned input spending `previous_outpoint`.
    pub fn new(previous_outpoint: Outpoint) -> Self {
        TransactionInput {
            previous_outpoint,
            signature_script: Script::new(),
            sequence: DEFAULT_SEQUENCE,
            sig_op_count: DEFAULT_SIG_OP_COUNT,
        }
    }

    /// Whether a signature script has been attached.
    pub fn is_signed(&self) -> bool {
        !self.signature_script.is_empty()
    }

    /// Signature-script length counted for size: the actual script once
    /// signed, otherwise the placeholder.
    pub fn signature_script_len(&self) -> u64 {
        if self.is_signed() {
            self.signature_script.len() as u64
        } else {
            SIGNATURE_SCRIPT_PLACEHOLDER_LEN
        }
    }

    /// Serialized size in bytes: outpoint, length field, script and sequence.
    pub fn serialized_size(&self) -> u64 {
        36 + 8 + self.signature_script_len() + 8
    }
}

/// The output an input spends, as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UtxoEntry {
    /// Value in sompi.
    pub amount: u64,
    /// Locking script of the owner address.
    pub script_public_key: ScriptPublicKey,
    /// Path of the key that signs for this UTXO, if known.
    pub derivation_path: Option<DerivationPath>,
}

impl UtxoEntry {
    /// Describe a UTXO by value, locking script and signing key path.
    pub fn new(
        amount: u64,
        script_public_key: ScriptPublicKey,
        derivation_path: Option<DerivationPath>,
    ) -> Self {
        UtxoEntry { amount, script_public_key, derivation_path }
    }
}
