//! 32-byte identifier type for transaction ids.
//!
//! A `Hash` stores its bytes in internal (reversed) order and displays them
//! in network order, so `Hash::from_hex(s).to_string() == s`. Writers that
//! need the network-order bytes use `to_network_bytes` or write the internal
//! bytes through `KasWriter::write_reversed`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

/// Hex string length of a Hash (64 hex characters).
pub const HASH_STRING_SIZE: usize = HASH_SIZE * 2;

/// A 32-byte identifier used for transaction ids and sub-hashes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Create a Hash from a raw 32-byte array in internal order.
    ///
    /// # Arguments
    /// * `bytes` - The 32 bytes in internal (reversed) order.
    ///
    /// # Returns
    /// A new `Hash`.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a digest or wire field in network order.
    ///
    /// # Arguments
    /// * `bytes` - The 32 bytes as they appear on the wire.
    ///
    /// # Returns
    /// A `Hash` whose display string is the hex of `bytes`.
    pub fn from_network_bytes(mut bytes: [u8; HASH_SIZE]) -> Self {
        bytes.reverse();
        Hash(bytes)
    }

    /// Create a Hash from a byte slice in internal order.
    ///
    /// # Arguments
    /// * `bytes` - A slice that must be exactly 32 bytes.
    ///
    /// # Returns
    /// `Ok(Hash)` if the slice is 32 bytes, or an error otherwise.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Parse a Hash from its 64-character display hex.
    ///
    /// # Arguments
    /// * `hex_str` - Exactly 64 hex characters in network (display) order.
    ///
    /// # Returns
    /// `Ok(Hash)` on success, or an error for a wrong length or bad hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.len() != HASH_STRING_SIZE {
            return Err(PrimitivesError::InvalidHash(format!(
                "hash string must be {} hex characters, got {}",
                HASH_STRING_SIZE,
                hex_str.len()
            )));
        }
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)?;
        Ok(Self::from_network_bytes(bytes))
    }

    /// Access the internal byte array.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Return the bytes in network (display) order.
    pub fn to_network_bytes(&self) -> [u8; HASH_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }

    /// Whether every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }
}

/// Display the hash in network order.
impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_network_bytes()))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

/// Serialize as a hex string in JSON.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Deserialize from a hex string in JSON.
impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "40b022362f1a303518e2b49f86f87a317c87b514ca0f3d08ad2e7cf49d08cc70";

    #[test]
    fn test_hex_display_roundtrip() {
        let hash = Hash::from_hex(TXID).unwrap();
        assert_eq!(hash.to_string(), TXID);
        assert_eq!(hash.as_bytes()[0], 0x70);
        assert_eq!(hash.as_bytes()[31], 0x40);
        assert_eq!(hex::encode(hash.to_network_bytes()), TXID);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Hash::from_hex("").is_err());
        assert!(Hash::from_hex(&TXID[..62]).is_err());
        assert!(Hash::from_hex(&format!("{}00", TXID)).is_err());
        assert!(Hash::from_hex(&TXID.replace('b', "g")).is_err());
    }

    #[test]
    fn test_from_bytes() {
        assert!(Hash::from_bytes(&[0u8; 31]).is_err());
        let hash = Hash::from_bytes(&[0u8; 32]).unwrap();
        assert!(hash.is_zero());
        assert_eq!(hash, Hash::default());
    }

    #[test]
    fn test_serde_roundtrip() {
        #[derive(Serialize, Deserialize)]
        struct TestData {
            hash: Hash,
        }

        let data = TestData { hash: TXID.parse().unwrap() };
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, format!(r#"{{"hash":"{}"}}"#, TXID));
        let back: TestData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hash, data.hash);
    }
}
