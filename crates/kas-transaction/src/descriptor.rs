//! Caller-supplied description of a transfer.
//!
//! Descriptors are plain serde data: transaction ids and addresses stay as
//! text and amounts as decimal strings until `Transaction::from_descriptor`
//! decodes them.

use serde::{Deserialize, Serialize};

use crate::amount::decimal_string;
use crate::derivation::DerivationPath;

/// One UTXO to spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    /// Id of the transaction that created the UTXO, in display hex.
    pub prev_tx_id: String,
    /// Output index within that transaction.
    pub prev_index: u32,
    /// Address that owns the UTXO.
    pub owner_address: String,
    /// UTXO value in sompi.
    #[serde(with = "decimal_string")]
    pub value: u64,
    /// Path of the key that signs for the UTXO.
    #[serde(default)]
    pub derivation_path: Option<DerivationPath>,
}

/// One payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    /// Destination address.
    pub address: String,
    /// Amount in sompi.
    #[serde(with = "decimal_string")]
    pub value: u64,
}

/// Where the leftover goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDescriptor {
    /// Change address.
    pub address: String,
    /// Path of the key that controls the change address.
    #[serde(default)]
    pub derivation_path: Option<DerivationPath>,
}

/// A complete transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDescriptor {
    /// UTXOs to spend, in input order.
    pub inputs: Vec<InputDescriptor>,
    /// Payments, in output order.
    pub outputs: Vec<OutputDescriptor>,
    /// Fee in sompi.
    #[serde(with = "decimal_string")]
    pub fee: u64,
    /// Destination for the leftover, if any is expected.
    #[serde(default)]
    pub change: Option<ChangeDescriptor>,
}

impl TransactionDescriptor {
    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::TransactionError> {
        serde_json::from_str(json).map_err(|e| crate::TransactionError::Serialization(e.to_string()))
    }
}
