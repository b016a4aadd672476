//! Arguments for the external signer and the seam it plugs into.
//!
//! The signer never sees the transaction itself. It receives a transfer
//! argument describing the whole transaction and one argument per UTXO,
//! rebuilds the signature hash from them, shows the payment to the user and
//! returns one signature per input.

use kas_primitives::util::KasWriter;

use crate::derivation::{encode_optional, ENCODED_PATH_LEN};
use crate::sighash::{
    input_signature_hashes, previous_outputs_hash, sequences_hash, sig_op_counts_hash,
    SigHashReusedValues, SigHashType, ZERO_HASH,
};
use crate::transaction::{Change, Transaction};
use crate::TransactionError;

/// Encode the transfer argument.
///
/// `previousOutputsHash(32) ‖ sequencesHash(32) ‖ sigOpCountsHash(32) ‖
/// amount(8) ‖ scriptVersion(2) ‖ scriptLen(8) ‖ script ‖ hasChange(1) ‖
/// changeAmount(8) ‖ changePath(21) ‖ lockTime(8) ‖ subnetworkId(20) ‖
/// gas(8) ‖ payloadHash(32) ‖ sighashType(1)`, integers little-endian.
///
/// # Arguments
/// * `tx` - The validated transaction.
/// * `hash_type` - The sighash type the signer will use.
///
/// # Returns
/// The encoded argument, or an error unless the transaction has exactly one
/// payment output.
pub fn transfer_argument(
    tx: &Transaction,
    hash_type: SigHashType,
) -> Result<Vec<u8>, TransactionError> {
    let mut payments = tx.payment_outputs();
    let output = match (payments.next(), payments.next()) {
        (Some(output), None) => output,
        _ => {
            return Err(TransactionError::InvalidTransaction(format!(
                "signer accepts exactly one payment output, found {}",
                tx.payment_outputs().count()
            )))
        }
    };

    let mut reused = SigHashReusedValues::new(tx);
    let mut writer = KasWriter::with_capacity(256);
    writer.write_bytes(&previous_outputs_hash(hash_type, &mut reused));
    writer.write_bytes(&sequences_hash(hash_type, &mut reused));
    writer.write_bytes(&sig_op_counts_hash(hash_type, &mut reused));

    writer.write_u64_le(output.amount);
    writer.write_u16_le(output.script_public_key.version);
    writer.write_var_bytes(output.script_public_key.script.to_bytes());

    match &tx.change {
        Change::Output { amount, derivation_path, .. } => {
            writer.write_u8(1);
            writer.write_u64_le(*amount);
            writer.write_bytes(&encode_optional(derivation_path.as_ref()));
        }
        _ => {
            writer.write_u8(0);
            writer.write_u64_le(0);
            writer.write_zeros(ENCODED_PATH_LEN);
        }
    }

    writer.write_u64_le(tx.lock_time);
    writer.write_bytes(&tx.subnetwork_id);
    writer.write_u64_le(tx.gas);
    writer.write_bytes(&ZERO_HASH);
    writer.write_u8(hash_type.to_u8());
    Ok(writer.into_bytes())
}

/// Encode the argument for the UTXO spent by input `input_index`.
///
/// `derivationPath(21) ‖ outpoint(36) ‖ scriptVersion(2) ‖ scriptLen(8) ‖
/// script ‖ amount(8) ‖ sequence(8) ‖ sigOpCount(1)`.
///
/// # Returns
/// The encoded argument, or an error if the index is out of range or the
/// UTXO has no derivation path below the root.
pub fn utxo_argument(tx: &Transaction, input_index: usize) -> Result<Vec<u8>, TransactionError> {
    let (input, utxo) = match (tx.inputs.get(input_index), tx.utxos.get(input_index)) {
        (Some(input), Some(utxo)) => (input, utxo),
        _ => {
            return Err(TransactionError::InvalidTransaction(format!(
                "input index {} out of range",
                input_index
            )))
        }
    };
    let path = utxo.derivation_path.as_ref().filter(|p| !p.is_root()).ok_or_else(|| {
        TransactionError::InputValidation(format!("input {} has no signing key path", input_index))
    })?;

    let mut writer = KasWriter::with_capacity(128);
    writer.write_bytes(&path.to_bytes());
    input.previous_outpoint.write_to(&mut writer);
    writer.write_u16_le(utxo.script_public_key.version);
    writer.write_var_bytes(utxo.script_public_key.script.to_bytes());
    writer.write_u64_le(utxo.amount);
    writer.write_u64_le(input.sequence);
    writer.write_u8(input.sig_op_count);
    Ok(writer.into_bytes())
}

/// Everything the external signer needs for one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    /// The sighash type to sign with.
    pub hash_type: SigHashType,
    /// See `transfer_argument`.
    pub transfer_argument: Vec<u8>,
    /// See `utxo_argument`, one per input in input order.
    pub utxo_arguments: Vec<Vec<u8>>,
    /// The digests the signer is expected to sign, for cross-checking.
    pub signature_hashes: Vec<[u8; 32]>,
}

impl SignRequest {
    /// Build the request for a validated transaction.
    pub fn new(tx: &Transaction, hash_type: SigHashType) -> Result<Self, TransactionError> {
        Ok(SignRequest {
            hash_type,
            transfer_argument: transfer_argument(tx, hash_type)?,
            utxo_arguments: (0..tx.inputs.len())
                .map(|i| utxo_argument(tx, i))
                .collect::<Result<_, _>>()?,
            signature_hashes: input_signature_hashes(tx, hash_type)?,
        })
    }
}

/// A signer that holds the keys, e.g. a hardware wallet behind a transport.
pub trait ExternalSigner {
    /// Transport or device error.
    type Error: std::fmt::Display;

    /// Sign every input described by `request`.
    ///
    /// # Returns
    /// One raw signature per input, in input order.
    fn sign(&mut self, request: &SignRequest) -> Result<Vec<Vec<u8>>, Self::Error>;
}
