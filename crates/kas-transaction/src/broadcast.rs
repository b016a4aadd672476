//! JSON message handed to the transport layer for broadcast.
//!
//! Field names follow the node RPC. The message is a bridge format: only
//! its field order is fixed, nothing here is hashed.

use kas_primitives::chainhash::Hash;
use kas_script::{Script, ScriptPublicKey};
use serde::Serialize;

use crate::transaction::Transaction;

/// Outpoint as the node RPC names it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcOutpoint {
    /// Id of the transaction that created the output, in display hex.
    pub transaction_id: Hash,
    /// Output index within that transaction.
    pub index: u32,
}

/// Input with its signature script, hex encoded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcInput<'a> {
    /// The output being spent.
    pub previous_outpoint: RpcOutpoint,
    /// `push(signature ‖ hash_type)`, empty while unsigned.
    pub signature_script: &'a Script,
    /// Always 0 in this engine.
    pub sequence: u64,
    /// Signature operations the script performs.
    pub sig_op_count: u8,
}

/// Output, locking script first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcOutput<'a> {
    /// Versioned locking script.
    pub script_public_key: &'a ScriptPublicKey,
    /// Amount in sompi.
    pub amount: u64,
}

/// Borrowed view of a transaction in RPC field naming.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction<'a> {
    /// Transaction version.
    pub version: u16,
    /// Inputs in signing order.
    pub inputs: Vec<RpcInput<'a>>,
    /// Payments, then change.
    pub outputs: Vec<RpcOutput<'a>>,
    /// Lock time.
    pub lock_time: u64,
    /// Native subnetwork id, hex encoded.
    pub subnetwork_id: String,
    /// Gas; zero on the native subnetwork.
    pub gas: u64,
    /// Always empty.
    pub payload: String,
}

impl<'a> From<&'a Transaction> for RpcTransaction<'a> {
    fn from(tx: &'a Transaction) -> Self {
        RpcTransaction {
            version: tx.version,
            inputs: tx
                .inputs
                .iter()
                .map(|input| RpcInput {
                    previous_outpoint: RpcOutpoint {
                        transaction_id: input.previous_outpoint.transaction_id,
                        index: input.previous_outpoint.index,
                    },
                    signature_script: &input.signature_script,
                    sequence: input.sequence,
                    sig_op_count: input.sig_op_count,
                })
                .collect(),
            outputs: tx
                .outputs
                .iter()
                .map(|output| RpcOutput {
                    script_public_key: &output.script_public_key,
                    amount: output.amount,
                })
                .collect(),
            lock_time: tx.lock_time,
            subnetwork_id: hex::encode(tx.subnetwork_id),
            gas: tx.gas,
            payload: String::new(),
        }
    }
}
