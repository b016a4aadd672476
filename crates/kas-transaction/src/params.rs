//! Network policy parameters.
//!
//! Every constant the fee, mass and validation rules depend on lives here
//! rather than as a literal at its use site.

use kas_script::Prefix;
use serde::{Deserialize, Serialize};

use crate::TransactionError;

/// Number of base units (sompi) in one coin.
pub const SOMPI_PER_KASPA: u64 = 100_000_000;

/// Maximum coin supply.
pub const MAX_SOMPI: u64 = 29_000_000_000 * SOMPI_PER_KASPA;

/// Policy constants for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Address prefix accepted for inputs, outputs and change.
    pub prefix: Prefix,
    /// Mass charged per serialized byte.
    pub mass_per_tx_byte: u64,
    /// Mass charged per output script byte, including the version field.
    pub mass_per_script_pub_key_byte: u64,
    /// Mass charged per signature operation.
    pub mass_per_sig_op: u64,
    /// Mass ceiling for a standard transaction.
    pub max_mass: u64,
    /// Smallest output value accepted.
    pub dust_floor: u64,
    /// Fee rate in sompi per 1000 mass units.
    pub fee_rate_per_kilogram: u64,
    /// Decimal exponent between sompi and human units.
    pub decimals: u32,
    /// Largest number of integer digits the signer can display.
    pub max_display_integer_digits: u32,
    /// Fee cap, equal to the maximum supply.
    pub max_sompi: u64,
}

impl NetworkParams {
    /// Parameters for mainnet.
    pub fn mainnet() -> Self {
        Self {
            prefix: Prefix::Mainnet,
            mass_per_tx_byte: 1,
            mass_per_script_pub_key_byte: 10,
            mass_per_sig_op: 1000,
            max_mass: 100_000,
            dust_floor: 600,
            fee_rate_per_kilogram: 1000,
            decimals: 8,
            max_display_integer_digits: 8,
            max_sompi: MAX_SOMPI,
        }
    }

    /// Parameters for testnet.
    pub fn testnet() -> Self {
        Self { prefix: Prefix::Testnet, ..Self::mainnet() }
    }

    /// Parameters for simnet.
    pub fn simnet() -> Self {
        Self { prefix: Prefix::Simnet, ..Self::mainnet() }
    }

    /// Parameters for devnet.
    pub fn devnet() -> Self {
        Self { prefix: Prefix::Devnet, ..Self::mainnet() }
    }

    /// Parameters for the network a prefix belongs to.
    pub fn for_prefix(prefix: Prefix) -> Self {
        Self { prefix, ..Self::mainnet() }
    }

    /// Load parameters from JSON; missing fields take their mainnet value.
    ///
    /// # Arguments
    /// * `json` - A JSON object, e.g. `{"prefix":"kaspatest","dust_floor":1000}`.
    ///
    /// # Returns
    /// The parameters, or a `Serialization` error for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(json).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    /// Exclusive upper bound on a displayable value, in sompi.
    ///
    /// `None` when the bound does not fit in 64 bits, i.e. every value is displayable.
    pub fn display_limit(&self) -> Option<u64> {
        10u64.checked_pow(self.decimals + self.max_display_integer_digits)
    }
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
