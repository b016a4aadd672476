//! Pre-signing validation.
//!
//! Runs every business, network and display rule against a built
//! transaction and reports the first violation. Nothing is sent to the
//! external signer until this passes.

use tracing::{debug, warn};

use crate::amount::format_amount;
use crate::derivation::DerivationPath;
use crate::params::NetworkParams;
use crate::transaction::{Change, Transaction};
use crate::TransactionError;

const LOG_TARGET: &str = "kas::tx::validate";

/// Fee figures of a transaction that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSummary {
    /// Mass of the unsigned transaction.
    pub mass: u64,
    /// Minimum fee for that mass.
    pub minimum_fee: u64,
    /// Fee the descriptor supplied.
    pub fee: u64,
}

/// Checks transactions against one network's policy.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    params: NetworkParams,
}

impl Validator {
    /// Create a validator enforcing `params`.
    pub fn new(params: NetworkParams) -> Self {
        Validator { params }
    }

    /// The policy being enforced.
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }

    /// Validate a transaction, failing on the first broken rule.
    ///
    /// Order: inputs, outputs (script, value, display digits, dust), mass,
    /// fee, change.
    ///
    /// # Arguments
    /// * `tx` - A transaction built by `Transaction::from_descriptor`.
    ///
    /// # Returns
    /// The mass and fee figures, or the first violation.
    pub fn validate(&self, tx: &Transaction) -> Result<FeeSummary, TransactionError> {
        let result = self.run(tx);
        match &result {
            Ok(summary) => debug!(
                target: LOG_TARGET,
                mass = summary.mass,
                minimum_fee = summary.minimum_fee,
                fee = summary.fee,
                fee_kas = %format_amount(summary.fee, self.params.decimals),
                "transaction passed validation"
            ),
            Err(e) => warn!(target: LOG_TARGET, error = %e, "transaction failed validation"),
        }
        result
    }

    fn run(&self, tx: &Transaction) -> Result<FeeSummary, TransactionError> {
        self.check_inputs(tx)?;
        self.check_outputs(tx)?;

        let mass = tx.mass(&self.params);
        if mass > self.params.max_mass {
            return Err(TransactionError::MassExceeded { mass, max_mass: self.params.max_mass });
        }

        let minimum_fee = tx.minimum_fee(&self.params);
        if tx.fee < minimum_fee {
            return Err(TransactionError::FeeInsufficient { fee: tx.fee, minimum: minimum_fee });
        }

        self.check_change(tx)?;
        Ok(FeeSummary { mass, minimum_fee, fee: tx.fee })
    }

    fn check_inputs(&self, tx: &Transaction) -> Result<(), TransactionError> {
        if tx.inputs.is_empty() {
            return Err(TransactionError::InputValidation("transaction has no inputs".into()));
        }
        if tx.inputs.len() != tx.utxos.len() {
            return Err(TransactionError::InvalidTransaction(format!(
                "{} inputs but {} utxos",
                tx.inputs.len(),
                tx.utxos.len()
            )));
        }
        for (i, (input, utxo)) in tx.inputs.iter().zip(&tx.utxos).enumerate() {
            if utxo.amount == 0 {
                return Err(TransactionError::InputValidation(format!("input {} has zero value", i)));
            }
            if input.previous_outpoint.transaction_id.is_zero() {
                return Err(TransactionError::InputValidation(format!(
                    "input {} has an empty previous transaction id",
                    i
                )));
            }
            if !names_signing_key(utxo.derivation_path.as_ref()) {
                return Err(TransactionError::InputValidation(format!(
                    "input {} has no signing key path",
                    i
                )));
            }
        }
        Ok(())
    }

    fn check_outputs(&self, tx: &Transaction) -> Result<(), TransactionError> {
        let mut count = 0;
        for output in tx.payment_outputs() {
            count += 1;
            output.script_public_key.to_address(self.params.prefix)?;
            if output.amount == 0 {
                return Err(TransactionError::OutputValidation(format!(
                    "output {} has zero value",
                    count - 1
                )));
            }
            self.check_displayable(output.amount)?;
            self.check_dust(output.amount)?;
        }
        if count == 0 {
            return Err(TransactionError::OutputValidation("transaction has no outputs".into()));
        }
        Ok(())
    }

    fn check_change(&self, tx: &Transaction) -> Result<(), TransactionError> {
        match &tx.change {
            Change::None => Ok(()),
            Change::Output { amount, derivation_path, .. } => {
                if *amount == 0 {
                    return Err(TransactionError::ChangeValidation("change amount is zero".into()));
                }
                self.check_displayable(*amount)?;
                self.check_dust(*amount)?;
                if !names_signing_key(derivation_path.as_ref()) {
                    return Err(TransactionError::ChangeValidation(
                        "change output has no signing key path".into(),
                    ));
                }
                Ok(())
            }
            Change::Unassigned { amount } => Err(TransactionError::ChangeValidation(format!(
                "leftover of {} has no change address",
                amount
            ))),
            Change::Deficit { shortfall } => Err(TransactionError::ChangeValidation(format!(
                "outputs plus fee exceed inputs by {}",
                shortfall
            ))),
        }
    }

    fn check_dust(&self, value: u64) -> Result<(), TransactionError> {
        if value < self.params.dust_floor {
            return Err(TransactionError::Dust { value, dust_floor: self.params.dust_floor });
        }
        Ok(())
    }

    fn check_displayable(&self, value: u64) -> Result<(), TransactionError> {
        match self.params.display_limit() {
            Some(limit) if value >= limit => Err(TransactionError::DisplayOverflow { value, limit }),
            _ => Ok(()),
        }
    }
}

/// A path resolves to a key only if it is present and below the root.
fn names_signing_key(path: Option<&DerivationPath>) -> bool {
    path.map_or(false, |p| !p.is_root())
}
