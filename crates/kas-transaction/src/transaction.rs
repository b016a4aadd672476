//! Core transaction type for the Kaspa network.
//!
//! A `Transaction` is built once per signing request from a
//! `TransactionDescriptor`, validated, hashed for the external signer, and
//! then receives its signatures exactly once per input. It carries the UTXO
//! each input spends, paired by position, and the change decision made at
//! build time.

use kas_primitives::chainhash::Hash;
use kas_primitives::hash::{domain_hash, HashDomain};
use kas_primitives::util::KasWriter;
use kas_script::script::signature_script;
use kas_script::Address;
use tracing::debug;

use crate::amount::checked_sum;
use crate::broadcast::RpcTransaction;
use crate::derivation::DerivationPath;
use crate::descriptor::TransactionDescriptor;
use crate::input::{Outpoint, TransactionInput, UtxoEntry};
use crate::output::TransactionOutput;
use crate::params::NetworkParams;
use crate::sighash::SigHashType;
use crate::TransactionError;

const LOG_TARGET: &str = "kas::tx::build";

/// Transaction version produced by this crate.
pub const TX_VERSION: u16 = 0;

/// Length of a subnetwork id.
pub const SUBNETWORK_ID_SIZE: usize = 20;

/// The native subnetwork, used by every ordinary transfer.
pub const SUBNETWORK_ID_NATIVE: [u8; SUBNETWORK_ID_SIZE] = [0u8; SUBNETWORK_ID_SIZE];

/// Outcome of `Σinputs − Σoutputs − fee` at build time.
///
/// Construction never fails on the leftover; the validator rejects every
/// variant except `None` and `Output`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// Inputs exactly cover outputs plus fee.
    None,
    /// A change output was appended at `index`.
    Output {
        index: usize,
        amount: u64,
        derivation_path: Option<DerivationPath>,
    },
    /// A positive leftover with no change address to send it to.
    Unassigned { amount: u64 },
    /// Outputs plus fee exceed the inputs by `shortfall`.
    Deficit { shortfall: u64 },
}

impl Change {
    /// Index of the change output, if one was appended.
    pub fn output_index(&self) -> Option<usize> {
        match self {
            Change::Output { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// A Kaspa transaction together with the UTXOs its inputs spend.
///
/// # Id layout
///
/// | Field              | Size                               |
/// |--------------------|------------------------------------|
/// | version            | 2 bytes (LE)                       |
/// | input count        | 8 bytes (LE)                       |
/// | inputs             | outpoint, script, sequence         |
/// | output count       | 8 bytes (LE)                       |
/// | outputs            | amount, version, script            |
/// | lock_time          | 8 bytes (LE)                       |
/// | subnetwork id      | 20 bytes                           |
/// | gas                | 8 bytes (LE)                       |
/// | payload            | 8 bytes (LE) length, then payload  |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u16,

    /// Ordered list of inputs.
    pub inputs: Vec<TransactionInput>,

    /// Ordered list of outputs; a change output, if any, is last.
    pub outputs: Vec<TransactionOutput>,

    /// Lock time (DAA score or timestamp); zero for immediate transfers.
    pub lock_time: u64,

    /// Subnetwork id; always native here.
    pub subnetwork_id: [u8; SUBNETWORK_ID_SIZE],

    /// Gas; always zero on the native subnetwork.
    pub gas: u64,

    /// The spent outputs, `utxos[i]` belonging to `inputs[i]`.
    pub utxos: Vec<UtxoEntry>,

    /// Fee requested by the descriptor, in sompi.
    pub fee: u64,

    /// The change decision.
    pub change: Change,
}

impl Transaction {
    /// Create an empty transaction.
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
            subnetwork_id: SUBNETWORK_ID_NATIVE,
            gas: 0,
            utxos: Vec::new(),
            fee: 0,
            change: Change::None,
        }
    }

    // -----------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------

    /// Build an unsigned transaction from a descriptor.
    ///
    /// Decodes every address for the network in `params`, pairs each input
    /// with the UTXO it spends, and appends a change output when the leftover
    /// is positive and a change address is given. A negative leftover is
    /// recorded as `Change::Deficit` for the validator to reject.
    ///
    /// # Arguments
    /// * `descriptor` - Inputs, outputs, fee and optional change address.
    /// * `params` - The network the addresses must belong to.
    ///
    /// # Returns
    /// The transaction, or an error if an id, address or sum is malformed.
    pub fn from_descriptor(
        descriptor: &TransactionDescriptor,
        params: &NetworkParams,
    ) -> Result<Self, TransactionError> {
        let mut tx = Transaction::new();
        tx.fee = descriptor.fee;

        for (i, desc) in descriptor.inputs.iter().enumerate() {
            let txid = Hash::from_hex(&desc.prev_tx_id).map_err(|e| {
                TransactionError::InputValidation(format!(
                    "input {}: invalid previous transaction id: {}",
                    i, e
                ))
            })?;
            let owner = Address::decode_for(&desc.owner_address, params.prefix)?;
            tx.inputs.push(TransactionInput::new(Outpoint::new(txid, desc.prev_index)));
            tx.utxos.push(UtxoEntry::new(
                desc.value,
                kas_script::pay_to_address_script(&owner),
                desc.derivation_path.clone(),
            ));
        }

        for desc in &descriptor.outputs {
            let address = Address::decode_for(&desc.address, params.prefix)?;
            tx.outputs.push(TransactionOutput::pay_to(&address, desc.value));
        }

        let total_in = checked_sum(descriptor.inputs.iter().map(|i| i.value), "input total")?;
        let total_out = checked_sum(
            descriptor.outputs.iter().map(|o| o.value).chain(std::iter::once(descriptor.fee)),
            "output total plus fee",
        )?;

        tx.change = if total_in < total_out {
            Change::Deficit { shortfall: total_out - total_in }
        } else {
            match (total_in - total_out, &descriptor.change) {
                (0, _) => Change::None,
                (amount, Some(change)) => {
                    let address = Address::decode_for(&change.address, params.prefix)?;
                    tx.outputs.push(TransactionOutput::pay_to(&address, amount));
                    Change::Output {
                        index: tx.outputs.len() - 1,
                        amount,
                        derivation_path: change.derivation_path.clone(),
                    }
                }
                (amount, None) => Change::Unassigned { amount },
            }
        };

        debug!(
            target: LOG_TARGET,
            inputs = tx.inputs.len(),
            outputs = tx.outputs.len(),
            fee = tx.fee,
            change = ?tx.change,
            "built transaction"
        );
        Ok(tx)
    }

    // -----------------------------------------------------------------
    // Signatures
    // -----------------------------------------------------------------

    /// Attach signatures to the inputs that do not carry one yet.
    ///
    /// `signatures[i]` belongs to input `i`. Each becomes the signature
    /// script `push(signature ‖ hash_type)`. Inputs that are already signed
    /// keep their script, so repeating a call changes nothing. All scripts
    /// are built before any input is touched: on error the transaction is
    /// left as it was.
    ///
    /// # Arguments
    /// * `signatures` - Raw signatures in input order, one per input.
    /// * `hash_type` - The sighash type the signatures commit to.
    ///
    /// # Returns
    /// The number of inputs newly signed, or `SignatureState` if the count
    /// does not match the inputs or a signature cannot be pushed.
    pub fn add_signatures(
        &mut self,
        signatures: &[Vec<u8>],
        hash_type: SigHashType,
    ) -> Result<usize, TransactionError> {
        if signatures.len() != self.inputs.len() {
            return Err(TransactionError::SignatureState(format!(
                "got {} signatures for {} inputs",
                signatures.len(),
                self.inputs.len()
            )));
        }

        let scripts = self
            .inputs
            .iter()
            .zip(signatures)
            .enumerate()
            .filter(|(_, (input, _))| !input.is_signed())
            .map(|(i, (_, signature))| {
                signature_script(signature, hash_type.to_u8())
                    .map(|script| (i, script))
                    .map_err(|e| TransactionError::SignatureState(format!("input {}: {}", i, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let attached = scripts.len();
        for (i, script) in scripts {
            self.inputs[i].signature_script = script;
        }
        Ok(attached)
    }

    /// Whether every input carries a signature script.
    pub fn is_fully_signed(&self) -> bool {
        self.inputs.iter().all(TransactionInput::is_signed)
    }

    // -----------------------------------------------------------------
    // Identity
    // -----------------------------------------------------------------

    fn write_to(&self, writer: &mut KasWriter, include_signature_scripts: bool) {
        writer.write_u16_le(self.version);
        writer.write_u64_le(self.inputs.len() as u64);
        for input in &self.inputs {
            input.previous_outpoint.write_to(writer);
            if include_signature_scripts {
                writer.write_var_bytes(input.signature_script.to_bytes());
                writer.write_u8(input.sig_op_count);
            } else {
                writer.write_var_bytes(&[]);
            }
            writer.write_u64_le(input.sequence);
        }
        writer.write_u64_le(self.outputs.len() as u64);
        for output in &self.outputs {
            output.write_to(writer);
        }
        writer.write_u64_le(self.lock_time);
        writer.write_bytes(&self.subnetwork_id);
        writer.write_u64_le(self.gas);
        writer.write_var_bytes(&[]);
    }

    /// Compute the transaction id.
    ///
    /// Signature scripts are excluded, so the id is the same before and
    /// after signing.
    pub fn id(&self) -> Hash {
        let mut writer = KasWriter::with_capacity(256);
        self.write_to(&mut writer, false);
        Hash::from_network_bytes(domain_hash(HashDomain::TransactionId, writer.as_bytes()))
    }

    /// Compute the full transaction hash, signature scripts included.
    pub fn hash(&self) -> Hash {
        let mut writer = KasWriter::with_capacity(256);
        self.write_to(&mut writer, true);
        Hash::from_network_bytes(domain_hash(HashDomain::Transaction, writer.as_bytes()))
    }

    // -----------------------------------------------------------------
    // Broadcast
    // -----------------------------------------------------------------

    /// Serialize to the JSON message a node's RPC accepts.
    ///
    /// # Returns
    /// The JSON text, with field order fixed.
    pub fn serialize_for_broadcast(&self) -> Result<String, TransactionError> {
        serde_json::to_string(&RpcTransaction::from(self))
            .map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    // -----------------------------------------------------------------
    // Totals
    // -----------------------------------------------------------------

    /// Sum of the spent UTXO amounts.
    pub fn total_input_amount(&self) -> Result<u64, TransactionError> {
        checked_sum(self.utxos.iter().map(|u| u.amount), "input total")
    }

    /// Sum of all output amounts, change included.
    pub fn total_output_amount(&self) -> Result<u64, TransactionError> {
        checked_sum(self.outputs.iter().map(|o| o.amount), "output total")
    }

    /// The outputs other than change.
    pub fn payment_outputs(&self) -> impl Iterator<Item = &TransactionOutput> {
        let change = self.change.output_index();
        self.outputs
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != change)
            .map(|(_, o)| o)
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}
