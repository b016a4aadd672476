/// Kaspa address handling.
///
/// An address is `<prefix>:<base32(version ‖ payload ‖ checksum)>`. The
/// prefix selects the network, the version byte selects the payload length
/// and the locking-script template, and the trailing eight symbols are a
/// polymod checksum over the prefix and the payload symbols.

use std::fmt;
use std::str::FromStr;

use kas_primitives::base32;
use kas_primitives::PrimitivesError;

use crate::ScriptError;

/// Separator between the prefix and the encoded payload.
pub const SEPARATOR: char = ':';

/// Network prefix of an address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `kaspa`
    Mainnet,
    /// `kaspatest`
    Testnet,
    /// `kaspasim`
    Simnet,
    /// `kaspadev`
    Devnet,
}

impl Prefix {
    /// The human-readable prefix string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Prefix::Mainnet => "kaspa",
            Prefix::Testnet => "kaspatest",
            Prefix::Simnet => "kaspasim",
            Prefix::Devnet => "kaspadev",
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Prefix {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kaspa" => Ok(Prefix::Mainnet),
            "kaspatest" => Ok(Prefix::Testnet),
            "kaspasim" => Ok(Prefix::Simnet),
            "kaspadev" => Ok(Prefix::Devnet),
            other => Err(ScriptError::UnknownPrefix(other.to_string())),
        }
    }
}

impl serde::Serialize for Prefix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Prefix {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Address version.
///
/// The single decision point for everything that depends on the kind of
/// address: payload length here, script template in `crate::script`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// 32-byte x-only Schnorr public key.
    PubKey,
    /// 33-byte compressed ECDSA public key.
    PubKeyEcdsa,
    /// 32-byte BLAKE2b script hash.
    ScriptHash,
}

impl Version {
    /// The version byte carried in the encoded payload.
    pub fn as_u8(&self) -> u8 {
        match self {
            Version::PubKey => 0,
            Version::PubKeyEcdsa => 1,
            Version::ScriptHash => 8,
        }
    }

    /// Payload length this version requires.
    pub fn payload_len(&self) -> usize {
        match self {
            Version::PubKey | Version::ScriptHash => 32,
            Version::PubKeyEcdsa => 33,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = ScriptError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Version::PubKey),
            1 => Ok(Version::PubKeyEcdsa),
            8 => Ok(Version::ScriptHash),
            other => Err(ScriptError::UnsupportedVersion(other)),
        }
    }
}

/// A decoded Kaspa address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    /// The network prefix.
    pub prefix: Prefix,
    /// The address version.
    pub version: Version,
    /// The key or script-hash payload; its length always matches `version`.
    payload: Vec<u8>,
}

impl Address {
    /// Create an address, checking the payload length against the version.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix.
    /// * `version` - The address version.
    /// * `payload` - The key or script-hash bytes.
    ///
    /// # Returns
    /// An `Address`, or `InvalidPayloadLength` if the length does not match.
    pub fn new(prefix: Prefix, version: Version, payload: &[u8]) -> Result<Self, ScriptError> {
        if payload.len() != version.payload_len() {
            return Err(ScriptError::InvalidPayloadLength {
                version: version.as_u8(),
                expected: version.payload_len(),
                got: payload.len(),
            });
        }
        Ok(Address {
            prefix,
            version,
            payload: payload.to_vec(),
        })
    }

    /// Create an address from a public key.
    ///
    /// A Schnorr address takes the 32-byte x-only key, or the x-coordinate of
    /// a 33-byte compressed key. An ECDSA address takes the 33-byte compressed
    /// key as-is.
    ///
    /// # Arguments
    /// * `prefix` - The network prefix.
    /// * `public_key` - A 32-byte x-only or 33-byte compressed key.
    /// * `ecdsa` - Whether to produce an ECDSA (version 1) address.
    ///
    /// # Returns
    /// The address, or an error if the key length does not fit the version.
    pub fn from_public_key(
        prefix: Prefix,
        public_key: &[u8],
        ecdsa: bool,
    ) -> Result<Self, ScriptError> {
        if ecdsa {
            return Self::new(prefix, Version::PubKeyEcdsa, public_key);
        }
        match public_key.len() {
            33 => Self::new(prefix, Version::PubKey, &public_key[1..]),
            _ => Self::new(prefix, Version::PubKey, public_key),
        }
    }

    /// Parse an address string.
    ///
    /// Rejects mixed case, unknown prefixes, characters outside the alphabet,
    /// a failing checksum, non-zero padding bits, unknown versions, and a
    /// payload length inconsistent with the version.
    ///
    /// # Arguments
    /// * `address` - The address string, e.g. `kaspa:qr...`.
    ///
    /// # Returns
    /// The decoded `Address`.
    pub fn decode(address: &str) -> Result<Self, ScriptError> {
        let has_lower = address.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = address.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            return Err(ScriptError::MixedCase);
        }
        let address = address.to_ascii_lowercase();

        let (prefix_str, encoded) = address.split_once(SEPARATOR).ok_or_else(|| {
            ScriptError::InvalidAddress(format!("missing '{}' separator", SEPARATOR))
        })?;
        let prefix: Prefix = prefix_str.parse()?;

        let symbols = base32::decode(encoded).map_err(|e| match e {
            PrimitivesError::InvalidBase32Char(c) => ScriptError::InvalidCharacter(c),
            other => ScriptError::Primitives(other),
        })?;
        if symbols.len() <= base32::CHECKSUM_LENGTH {
            return Err(ScriptError::InvalidAddress(format!(
                "payload of {} symbols is too short",
                symbols.len()
            )));
        }
        if !base32::verify_checksum(prefix.as_str(), &symbols) {
            return Err(ScriptError::ChecksumFailed);
        }

        let data = &symbols[..symbols.len() - base32::CHECKSUM_LENGTH];
        let bytes = base32::convert_bits(data, 5, 8, false)?;
        let (&version_byte, payload) = bytes
            .split_first()
            .ok_or_else(|| ScriptError::InvalidAddress("empty payload".to_string()))?;

        Self::new(prefix, Version::try_from(version_byte)?, payload)
    }

    /// Parse an address string and require a specific network prefix.
    ///
    /// # Arguments
    /// * `address` - The address string.
    /// * `expected` - The prefix the address must carry.
    ///
    /// # Returns
    /// The decoded `Address`, or `WrongNetwork` for another network's address.
    pub fn decode_for(address: &str, expected: Prefix) -> Result<Self, ScriptError> {
        let decoded = Self::decode(address)?;
        if decoded.prefix != expected {
            return Err(ScriptError::WrongNetwork {
                expected: expected.to_string(),
                found: decoded.prefix.to_string(),
            });
        }
        Ok(decoded)
    }

    /// Encode the address as `<prefix>:<base32(version ‖ payload ‖ checksum)>`.
    pub fn encode(&self) -> String {
        let mut data = Vec::with_capacity(1 + self.payload.len());
        data.push(self.version.as_u8());
        data.extend_from_slice(&self.payload);

        let mut symbols = base32::convert_bits(&data, 8, 5, true)
            .expect("8-to-5 bit conversion with padding cannot fail");
        let checksum = base32::checksum(self.prefix.as_str(), &symbols);
        symbols.extend_from_slice(&checksum);

        let encoded = base32::encode(&symbols).expect("symbols are 5-bit values");
        format!("{}{}{}", self.prefix, SEPARATOR, encoded)
    }

    /// The key or script-hash payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::decode(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Address::decode(&s).map_err(serde::de::Error::custom)
    }
}
