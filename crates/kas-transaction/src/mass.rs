//! Serialized size, mass and minimum fee.
//!
//! Mass is the weighted cost the network charges fees on:
//! `size·w_byte + Σ(2 + script_len)·w_spk + Σsig_ops·w_sigop`, with the
//! weights taken from `NetworkParams`. Arithmetic saturates rather than wraps.

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::params::NetworkParams;
use crate::transaction::Transaction;

/// Fixed per-transaction bytes: version(2) + input count(8) + output
/// count(8) + lock time(8) + subnetwork/gas/payload-length composite(21) +
/// trailer(8).
pub const TX_OVERHEAD_SIZE: u64 = 2 + 8 + 8 + 8 + 21 + 8;

/// Estimate the serialized size of a transaction.
///
/// Unsigned inputs are counted with a placeholder signature script.
///
/// # Arguments
/// * `inputs` - The transaction inputs.
/// * `outputs` - The transaction outputs.
///
/// # Returns
/// The size in bytes.
pub fn estimated_size(inputs: &[TransactionInput], outputs: &[TransactionOutput]) -> u64 {
    let inputs_size = inputs
        .iter()
        .fold(0u64, |acc, i| acc.saturating_add(i.serialized_size()));
    let outputs_size = outputs
        .iter()
        .fold(0u64, |acc, o| acc.saturating_add(o.serialized_size()));
    TX_OVERHEAD_SIZE.saturating_add(inputs_size).saturating_add(outputs_size)
}

/// Compute the mass of a transaction.
///
/// # Arguments
/// * `inputs` - The transaction inputs.
/// * `outputs` - The transaction outputs.
/// * `params` - Supplies the three mass weights.
///
/// # Returns
/// The mass in grams.
pub fn mass(
    inputs: &[TransactionInput],
    outputs: &[TransactionOutput],
    params: &NetworkParams,
) -> u64 {
    let size = estimated_size(inputs, outputs);
    let script_bytes = outputs
        .iter()
        .fold(0u64, |acc, o| acc.saturating_add(o.script_public_key.serialized_size()));
    let sig_ops = inputs.iter().map(|i| u64::from(i.sig_op_count)).sum::<u64>();

    size.saturating_mul(params.mass_per_tx_byte)
        .saturating_add(script_bytes.saturating_mul(params.mass_per_script_pub_key_byte))
        .saturating_add(sig_ops.saturating_mul(params.mass_per_sig_op))
}

/// Compute the minimum fee for a mass.
///
/// `min(max(⌈mass·rate / 1000⌉, rate), max_sompi)`; zero when the rate is zero.
///
/// # Arguments
/// * `mass` - Transaction mass.
/// * `fee_rate_per_kilogram` - Sompi per 1000 mass units.
/// * `max_sompi` - Cap on any fee.
pub fn minimum_fee(mass: u64, fee_rate_per_kilogram: u64, max_sompi: u64) -> u64 {
    let scaled = u128::from(mass) * u128::from(fee_rate_per_kilogram);
    let fee = scaled.div_ceil(1000).max(u128::from(fee_rate_per_kilogram));
    u64::try_from(fee).unwrap_or(u64::MAX).min(max_sompi)
}

impl Transaction {
    /// Estimated serialized size of this transaction.
    pub fn estimated_size(&self) -> u64 {
        estimated_size(&self.inputs, &self.outputs)
    }

    /// Mass of this transaction under `params`.
    pub fn mass(&self, params: &NetworkParams) -> u64 {
        mass(&self.inputs, &self.outputs, params)
    }

    /// Minimum fee for this transaction under `params`.
    pub fn minimum_fee(&self, params: &NetworkParams) -> u64 {
        minimum_fee(self.mass(params), params.fee_rate_per_kilogram, params.max_sompi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kas_primitives::chainhash::Hash;
    use kas_script::{Script, ScriptPublicKey};

    use crate::input::Outpoint;

    fn p2pk_output(amount: u64) -> TransactionOutput {
        TransactionOutput::new(amount, ScriptPublicKey::new(0, Script::from_bytes(&[0u8; 34])))
    }

    fn unsigned_input() -> TransactionInput {
        TransactionInput::new(Outpoint::new(Hash::default(), 0))
    }

    #[test]
    fn test_estimated_size() {
        assert_eq!(estimated_size(&[], &[]), 55);
        // 55 + 118 + 2 * 52
        assert_eq!(
            estimated_size(&[unsigned_input()], &[p2pk_output(1), p2pk_output(2)]),
            277
        );
    }

    #[test]
    fn test_mass_weights() {
        let params = NetworkParams::default();
        let inputs = [unsigned_input()];
        let outputs = [p2pk_output(1), p2pk_output(2)];
        // 277 + 72 * 10 + 1 * 1000
        assert_eq!(mass(&inputs, &outputs, &params), 1997);

        let size_only = NetworkParams { mass_per_sig_op: 0, mass_per_script_pub_key_byte: 0, ..params };
        assert_eq!(mass(&inputs, &outputs, &size_only), 277);
    }

    #[test]
    fn test_minimum_fee() {
        let max = NetworkParams::default().max_sompi;
        assert_eq!(minimum_fee(1997, 1000, max), 1997);
        assert_eq!(minimum_fee(1500, 1, max), 2);
        assert_eq!(minimum_fee(0, 1000, max), 1000);
        assert_eq!(minimum_fee(1, 1000, max), 1000);
        assert_eq!(minimum_fee(0, 0, max), 0);
        assert_eq!(minimum_fee(5000, 0, max), 0);
        assert_eq!(minimum_fee(u64::MAX, u64::MAX, max), max);
    }
}
