//! Attaches external signatures and drives the full signing flow.

use tracing::debug;

use crate::descriptor::TransactionDescriptor;
use crate::params::NetworkParams;
use crate::sighash::SigHashType;
use crate::signer::{ExternalSigner, SignRequest};
use crate::transaction::Transaction;
use crate::validation::Validator;
use crate::TransactionError;

const LOG_TARGET: &str = "kas::tx::sign";

/// Turns a list of signatures into a broadcast-ready transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureAssembler {
    hash_type: SigHashType,
}

impl SignatureAssembler {
    /// Create an assembler for signatures made with `hash_type`.
    pub fn new(hash_type: SigHashType) -> Self {
        SignatureAssembler { hash_type }
    }

    /// Attach one signature per input.
    ///
    /// # Arguments
    /// * `tx` - The transaction the signatures were produced for.
    /// * `signatures` - Raw signatures in input order.
    ///
    /// # Returns
    /// The signed transaction, or `SignatureState` if the count does not
    /// match the inputs or a signature is empty.
    pub fn assemble(
        &self,
        mut tx: Transaction,
        signatures: &[Vec<u8>],
    ) -> Result<Transaction, TransactionError> {
        if let Some(i) = signatures.iter().position(Vec::is_empty) {
            return Err(TransactionError::SignatureState(format!("signature {} is empty", i)));
        }

        let attached = tx.add_signatures(signatures, self.hash_type)?;
        debug!(
            target: LOG_TARGET,
            attached,
            inputs = tx.inputs.len(),
            id = %tx.id(),
            hash = %tx.hash(),
            "attached signatures"
        );
        Ok(tx)
    }
}

/// Build, validate, sign and assemble a transaction.
///
/// # Arguments
/// * `descriptor` - The transfer to make.
/// * `params` - Network policy.
/// * `hash_type` - The sighash type to sign with.
/// * `signer` - Holds the keys.
///
/// # Returns
/// The signed transaction, ready for `serialize_for_broadcast`.
pub fn sign_transaction<S: ExternalSigner>(
    descriptor: &TransactionDescriptor,
    params: &NetworkParams,
    hash_type: SigHashType,
    signer: &mut S,
) -> Result<Transaction, TransactionError> {
    let tx = Transaction::from_descriptor(descriptor, params)?;
    Validator::new(params.clone()).validate(&tx)?;

    let request = SignRequest::new(&tx, hash_type)?;
    let signatures = signer
        .sign(&request)
        .map_err(|e| TransactionError::Signer(e.to_string()))?;

    SignatureAssembler::new(hash_type).assemble(tx, &signatures)
}
