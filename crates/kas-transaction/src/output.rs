//! Transaction output with an amount and a versioned locking script.

use kas_primitives::util::KasWriter;
use kas_script::{Address, ScriptPublicKey};

/// A single output in a Kaspa transaction.
///
/// # Hashing layout
///
/// | Field              | Size               |
/// |--------------------|--------------------|
/// | amount             | 8 bytes (LE)       |
/// | script version     | 2 bytes (LE)       |
/// | script length      | 8 bytes (LE)       |
/// | script             | variable           |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Value in sompi.
    pub amount: u64,

    /// The locking script that guards the value.
    pub script_public_key: ScriptPublicKey,
}

impl TransactionOutput {
    /// Create an output.
    pub fn new(amount: u64, script_public_key: ScriptPublicKey) -> Self {
        TransactionOutput { amount, script_public_key }
    }

    /// Create an output paying `amount` to `address`.
    pub fn pay_to(address: &Address, amount: u64) -> Self {
        Self::new(amount, ScriptPublicKey::from_address(address))
    }

    /// Serialize this output into a `KasWriter` in hashing layout.
    ///
    /// # Arguments
    /// * `writer` - The writer to append serialized bytes to.
    pub fn write_to(&self, writer: &mut KasWriter) {
        writer.write_u64_le(self.amount);
        writer.write_u16_le(self.script_public_key.version);
        writer.write_var_bytes(self.script_public_key.script.to_bytes());
    }

    /// Serialized size in bytes: amount, version, length field and script.
    pub fn serialized_size(&self) -> u64 {
        8 + 2 + 8 + self.script_public_key.script.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kas_script::Script;

    #[test]
    fn test_write_to_layout() {
        let output = TransactionOutput::new(
            0x0102,
            ScriptPublicKey::new(0, Script::from_bytes(&[0xac])),
        );
        let mut writer = KasWriter::new();
        output.write_to(&mut writer);
        assert_eq!(
            hex::encode(writer.as_bytes()),
            "020100000000000000000100000000000000ac"
        );
        assert_eq!(writer.len() as u64, output.serialized_size());
    }
}
