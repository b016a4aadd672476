/// Script types and the standard locking-script templates.
///
/// `Script` wraps raw script bytes. `ScriptPublicKey` pairs a script with
/// its script version, as carried by transaction outputs and UTXOs. The
/// address-to-script mapping below must match byte for byte what the
/// network's script interpreter expects for each address version.

use std::fmt;

use crate::address::{Address, Prefix, Version};
use crate::opcodes::*;
use crate::ScriptError;

/// The only script version currently defined.
pub const SCRIPT_VERSION: u16 = 0;

/// A script, represented as a byte vector newtype.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Create a new empty script.
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex-encoded string.
    ///
    /// # Arguments
    /// * `hex_str` - A hex string (e.g. "20...ac").
    ///
    /// # Returns
    /// A `Script` wrapping the decoded bytes, or an error if the hex is invalid.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        let bytes = hex::decode(hex_str).map_err(|e| ScriptError::InvalidHex(e.to_string()))?;
        Ok(Script(bytes))
    }

    /// Create a script from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build a script consisting of a single data push.
    ///
    /// Uses a direct push opcode for up to 75 bytes and `OP_PUSHDATA1` up
    /// to 255 bytes; an empty push is `OP_0`.
    ///
    /// # Arguments
    /// * `data` - The bytes to push.
    ///
    /// # Returns
    /// The push script, or `DataTooBig` beyond 255 bytes.
    pub fn push_data(data: &[u8]) -> Result<Self, ScriptError> {
        let mut bytes = Vec::with_capacity(data.len() + 2);
        match data.len() {
            0 => bytes.push(OP_0),
            n if n <= OP_DATA_75 as usize => bytes.push(n as u8),
            n if n <= u8::MAX as usize => {
                bytes.push(OP_PUSHDATA1);
                bytes.push(n as u8);
            }
            n => return Err(ScriptError::DataTooBig(n)),
        }
        bytes.extend_from_slice(data);
        Ok(Script(bytes))
    }

    /// Encode the script as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Return a reference to the underlying bytes.
    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Return the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the script is empty (zero bytes).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Classify the script against the standard templates.
    pub fn class(&self) -> ScriptClass {
        let b = &self.0;
        match b.len() {
            34 if b[0] == OP_DATA_32 && b[33] == OP_CHECKSIG => ScriptClass::PubKey,
            35 if b[0] == OP_DATA_33 && b[34] == OP_CHECKSIG_ECDSA => ScriptClass::PubKeyEcdsa,
            35 if b[0] == OP_BLAKE2B && b[1] == OP_DATA_32 && b[34] == OP_EQUAL => {
                ScriptClass::ScriptHash
            }
            _ => ScriptClass::NonStandard,
        }
    }
}

impl fmt::Display for Script {
    /// Display the script as a lowercase hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Standard locking-script templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptClass {
    /// `OP_DATA_32 <x-only key> OP_CHECKSIG`
    PubKey,
    /// `OP_DATA_33 <compressed key> OP_CHECKSIG_ECDSA`
    PubKeyEcdsa,
    /// `OP_BLAKE2B OP_DATA_32 <script hash> OP_EQUAL`
    ScriptHash,
    /// Anything else.
    NonStandard,
}

/// A versioned locking script.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPublicKey {
    /// Script version; always `SCRIPT_VERSION` for the standard templates.
    pub version: u16,
    /// The locking script bytes.
    #[serde(rename = "scriptPublicKey")]
    pub script: Script,
}

impl ScriptPublicKey {
    /// Pair a script with a script version.
    pub fn new(version: u16, script: Script) -> Self {
        ScriptPublicKey { version, script }
    }

    /// Build the locking script that pays to `address`.
    ///
    /// # Arguments
    /// * `address` - The decoded destination address.
    ///
    /// # Returns
    /// The version-0 script public key for the address's template.
    pub fn from_address(address: &Address) -> Self {
        let payload = address.payload();
        let mut bytes = Vec::with_capacity(payload.len() + 3);
        match address.version {
            Version::PubKey => {
                bytes.push(OP_DATA_32);
                bytes.extend_from_slice(payload);
                bytes.push(OP_CHECKSIG);
            }
            Version::PubKeyEcdsa => {
                bytes.push(OP_DATA_33);
                bytes.extend_from_slice(payload);
                bytes.push(OP_CHECKSIG_ECDSA);
            }
            Version::ScriptHash => {
                bytes.push(OP_BLAKE2B);
                bytes.push(OP_DATA_32);
                bytes.extend_from_slice(payload);
                bytes.push(OP_EQUAL);
            }
        }
        ScriptPublicKey::new(SCRIPT_VERSION, Script(bytes))
    }

    /// Recover the address a standard locking script pays to.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix to give the address.
    ///
    /// # Returns
    /// The address, or `NonStandardScript` for an unknown version or template.
    pub fn to_address(&self, prefix: Prefix) -> Result<Address, ScriptError> {
        if self.version != SCRIPT_VERSION {
            return Err(ScriptError::NonStandardScript(format!(
                "unknown script version {}",
                self.version
            )));
        }
        let b = self.script.to_bytes();
        match self.script.class() {
            ScriptClass::PubKey => Address::new(prefix, Version::PubKey, &b[1..33]),
            ScriptClass::PubKeyEcdsa => Address::new(prefix, Version::PubKeyEcdsa, &b[1..34]),
            ScriptClass::ScriptHash => Address::new(prefix, Version::ScriptHash, &b[2..34]),
            ScriptClass::NonStandard => Err(ScriptError::NonStandardScript(self.script.to_hex())),
        }
    }

    /// Serialized size including the version field.
    pub fn serialized_size(&self) -> u64 {
        2 + self.script.len() as u64
    }
}

/// Build the locking script that pays to `address`.
///
/// Shorthand for `ScriptPublicKey::from_address`.
pub fn pay_to_address_script(address: &Address) -> ScriptPublicKey {
    ScriptPublicKey::from_address(address)
}

/// Build the signature script `<push(signature ‖ sighash_type)>`.
///
/// # Arguments
/// * `signature` - The raw signature bytes (64 for Schnorr).
/// * `sighash_type` - The sighash type byte the signature commits to.
///
/// # Returns
/// The signature script, e.g. `0x41 ‖ sig(64) ‖ type(1)` for Schnorr.
pub fn signature_script(signature: &[u8], sighash_type: u8) -> Result<Script, ScriptError> {
    let mut data = Vec::with_capacity(signature.len() + 1);
    data.extend_from_slice(signature);
    data.push(sighash_type);
    Script::push_data(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHNORR_ADDRESS: &str = "kaspa:qrdga25hhaz9wd5p3rrcaynxrl0jm9kwze4jyhgdcmqu8cezaa3w7xh9a3xd9";
    const ECDSA_ADDRESS: &str = "kaspa:qypa4r42j7l5g4eksxyv0r5jvc0a7tvkectxkgjaphrvrslrythk9mc0huhkd8a";
    const X_ONLY_KEY: &str = "da8eaa97bf4457368188c78e92661fdf2d96ce166b225d0dc6c1c3e322ef62ef";

    #[test]
    fn test_pubkey_template() {
        let addr = Address::decode(SCHNORR_ADDRESS).unwrap();
        let spk = pay_to_address_script(&addr);
        assert_eq!(spk.version, 0);
        assert_eq!(spk.script.to_hex(), format!("20{}ac", X_ONLY_KEY));
        assert_eq!(spk.script.class(), ScriptClass::PubKey);
        assert_eq!(spk.serialized_size(), 36);
    }

    #[test]
    fn test_pubkey_ecdsa_template() {
        let addr = Address::decode(ECDSA_ADDRESS).unwrap();
        let spk = ScriptPublicKey::from_address(&addr);
        assert_eq!(spk.script.to_hex(), format!("2103{}ab", X_ONLY_KEY));
        assert_eq!(spk.script.class(), ScriptClass::PubKeyEcdsa);
    }

    #[test]
    fn test_script_hash_template() {
        let payload = [0x11u8; 32];
        let addr = Address::new(Prefix::Mainnet, Version::ScriptHash, &payload).unwrap();
        let spk = ScriptPublicKey::from_address(&addr);
        assert_eq!(spk.script.to_hex(), format!("aa20{}87", "11".repeat(32)));
        assert_eq!(spk.script.class(), ScriptClass::ScriptHash);
    }

    #[test]
    fn test_to_address_inverts_templates() {
        let script_hash = Address::new(Prefix::Mainnet, Version::ScriptHash, &[7u8; 32]).unwrap();
        for addr in [
            Address::decode(SCHNORR_ADDRESS).unwrap(),
            Address::decode(ECDSA_ADDRESS).unwrap(),
            script_hash,
        ] {
            let spk = ScriptPublicKey::from_address(&addr);
            assert_eq!(spk.to_address(Prefix::Mainnet).unwrap(), addr);
        }
    }

    #[test]
    fn test_to_address_rejects_non_standard() {
        let spk = ScriptPublicKey::new(0, Script::from_hex("76a914").unwrap());
        assert_eq!(spk.script.class(), ScriptClass::NonStandard);
        assert!(matches!(
            spk.to_address(Prefix::Mainnet),
            Err(ScriptError::NonStandardScript(_))
        ));

        let addr = Address::decode(SCHNORR_ADDRESS).unwrap();
        let mut spk = ScriptPublicKey::from_address(&addr);
        spk.version = 1;
        assert!(spk.to_address(Prefix::Mainnet).is_err());
    }

    #[test]
    fn test_push_data_opcodes() {
        assert_eq!(Script::push_data(&[]).unwrap().to_hex(), "00");
        assert_eq!(Script::push_data(&[0xab]).unwrap().to_hex(), "01ab");
        let long = Script::push_data(&[0u8; 76]).unwrap();
        assert_eq!(&long.to_bytes()[..2], &[OP_PUSHDATA1, 76]);
        assert!(matches!(Script::push_data(&[0u8; 256]), Err(ScriptError::DataTooBig(256))));
    }

    #[test]
    fn test_signature_script_layout() {
        let sig = [0x5au8; 64];
        let script = signature_script(&sig, 0x01).unwrap();
        assert_eq!(script.len(), 66);
        assert_eq!(script.to_bytes()[0], OP_DATA_65);
        assert_eq!(&script.to_bytes()[1..65], &sig[..]);
        assert_eq!(script.to_bytes()[65], 0x01);
    }

    #[test]
    fn test_script_hex_and_serde() {
        assert!(Script::from_hex("zz").is_err());
        let addr = Address::decode(SCHNORR_ADDRESS).unwrap();
        let spk = ScriptPublicKey::from_address(&addr);
        let json = serde_json::to_string(&spk).unwrap();
        assert_eq!(
            json,
            format!(r#"{{"version":0,"scriptPublicKey":"20{}ac"}}"#, X_ONLY_KEY)
        );
        let back: ScriptPublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spk);
    }
}
