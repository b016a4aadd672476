/// Kaspa signer SDK - Address codec and locking-script construction.
///
/// Provides the checksummed base32 `Address` type with its network prefixes
/// and version variants, the opcode table used by the standard locking
/// scripts, and the `ScriptPublicKey` builder that maps an address to the
/// script the network's interpreter expects (and back).

pub mod address;
pub mod opcodes;
pub mod script;

mod error;
pub use address::{Address, Prefix, Version};
pub use error::ScriptError;
pub use script::{pay_to_address_script, Script, ScriptClass, ScriptPublicKey};
