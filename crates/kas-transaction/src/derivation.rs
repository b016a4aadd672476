//! BIP-32 key-derivation paths in the signer's fixed-width encoding.

use std::fmt;
use std::str::FromStr;

use kas_primitives::util::{KasReader, KasWriter};

use crate::TransactionError;

/// Most components the signer accepts.
pub const MAX_DEPTH: usize = 5;

/// Encoded size: depth byte plus five big-endian components.
pub const ENCODED_PATH_LEN: usize = 1 + 4 * MAX_DEPTH;

/// Flag bit of a hardened component.
pub const HARDENED: u32 = 0x8000_0000;

/// A parsed derivation path such as `m/44'/111111'/0'/0/3`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    components: Vec<u32>,
}

impl DerivationPath {
    /// Build a path from raw components (hardened bit already applied).
    ///
    /// # Returns
    /// The path, or `InvalidDerivationPath` beyond `MAX_DEPTH` components.
    pub fn new(components: Vec<u32>) -> Result<Self, TransactionError> {
        if components.len() > MAX_DEPTH {
            return Err(TransactionError::InvalidDerivationPath(format!(
                "depth {} exceeds the maximum of {}",
                components.len(),
                MAX_DEPTH
            )));
        }
        Ok(DerivationPath { components })
    }

    /// The raw components.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Whether this is the bare master path `m`.
    ///
    /// A root path encodes exactly like an absent one, so it never names a
    /// signing key.
    pub fn is_root(&self) -> bool {
        self.components.is_empty()
    }

    /// Encode as `depth(1) ‖ component(4, BE) × 5`, zero-filled.
    pub fn to_bytes(&self) -> [u8; ENCODED_PATH_LEN] {
        let mut writer = KasWriter::with_capacity(ENCODED_PATH_LEN);
        writer.write_u8(self.components.len() as u8);
        for c in &self.components {
            writer.write_u32_be(*c);
        }
        writer.write_zeros(4 * (MAX_DEPTH - self.components.len()));

        let mut out = [0u8; ENCODED_PATH_LEN];
        out.copy_from_slice(writer.as_bytes());
        out
    }

    /// Decode the fixed-width signer field produced by `to_bytes`.
    ///
    /// # Returns
    /// The path, or an error for a depth above `MAX_DEPTH` or non-zero
    /// bytes after the last component.
    pub fn from_bytes(bytes: &[u8; ENCODED_PATH_LEN]) -> Result<Self, TransactionError> {
        let mut reader = KasReader::new(bytes);
        let depth = reader.read_u8()? as usize;
        if depth > MAX_DEPTH {
            return Err(TransactionError::InvalidDerivationPath(format!(
                "encoded depth {} exceeds the maximum of {}",
                depth, MAX_DEPTH
            )));
        }
        let components = (0..depth)
            .map(|_| reader.read_u32_be())
            .collect::<Result<Vec<_>, _>>()?;
        if reader.read_bytes(reader.remaining())?.iter().any(|b| *b != 0) {
            return Err(TransactionError::InvalidDerivationPath(
                "non-zero bytes after the last component".into(),
            ));
        }
        DerivationPath::new(components)
    }
}

/// Encode an optional path; an absent path is all zeros.
pub fn encode_optional(path: Option<&DerivationPath>) -> [u8; ENCODED_PATH_LEN] {
    path.map(DerivationPath::to_bytes).unwrap_or([0u8; ENCODED_PATH_LEN])
}

impl FromStr for DerivationPath {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |why: &str| TransactionError::InvalidDerivationPath(format!("{}: {}", s, why));

        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(invalid("must start with 'm'"));
        }

        let mut components = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
                Some(d) => (d, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid("component is not a number"));
            }
            let index: u32 = digits.parse().map_err(|_| invalid("component out of range"))?;
            if index >= HARDENED {
                return Err(invalid("component out of range"));
            }
            components.push(if hardened { index | HARDENED } else { index });
        }
        DerivationPath::new(components)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for c in &self.components {
            if c & HARDENED != 0 {
                write!(f, "/{}'", c & !HARDENED)?;
            } else {
                write!(f, "/{}", c)?;
            }
        }
        Ok(())
    }
}

impl serde::Serialize for DerivationPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for DerivationPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path: DerivationPath = "m/44'/111111'/0'/0/3".parse().unwrap();
        assert_eq!(
            path.components(),
            &[44 | HARDENED, 111111 | HARDENED, HARDENED, 0, 3]
        );
        assert_eq!(path.to_string(), "m/44'/111111'/0'/0/3");

        let h: DerivationPath = "m/44h/1".parse().unwrap();
        assert_eq!(h.to_string(), "m/44'/1");
    }

    #[test]
    fn test_encoding() {
        let path: DerivationPath = "m/44'/111111'/0'/0/3".parse().unwrap();
        assert_eq!(
            hex::encode(path.to_bytes()),
            "058000002c8001b207800000000000000000000003"
        );

        let short: DerivationPath = "m/1".parse().unwrap();
        let bytes = short.to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[1..5], &[0, 0, 0, 1]);
        assert!(bytes[5..].iter().all(|b| *b == 0));

        assert_eq!(encode_optional(None), [0u8; ENCODED_PATH_LEN]);
        assert_eq!(encode_optional(Some(&path)), path.to_bytes());
    }

    #[test]
    fn test_from_bytes() {
        let path: DerivationPath = "m/44'/111111'/0'/0/3".parse().unwrap();
        assert_eq!(DerivationPath::from_bytes(&path.to_bytes()).unwrap(), path);

        let mut bytes = [0u8; ENCODED_PATH_LEN];
        assert!(DerivationPath::from_bytes(&bytes).unwrap().components().is_empty());

        bytes[0] = 6;
        assert!(DerivationPath::from_bytes(&bytes).is_err());

        bytes[0] = 1;
        bytes[20] = 1;
        assert!(DerivationPath::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "44'/0", "m/", "m/x", "m/-1", "m/2147483648", "m/1/2/3/4/5/6"] {
            assert!(
                matches!(bad.parse::<DerivationPath>(), Err(TransactionError::InvalidDerivationPath(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_root_path() {
        let root: DerivationPath = "m".parse().unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_bytes(), encode_optional(None));
        assert!(!"m/0".parse::<DerivationPath>().unwrap().is_root());
    }
}
