//! Base32 encoding with a 40-bit polymod checksum.
//!
//! The address alphabet, the generic accumulator-based bit repacking between
//! 8-bit bytes and 5-bit symbols, and the BCH-style polymod checksum computed
//! over `prefix ‖ 0 ‖ payload ‖ checksum`. A payload followed by its own
//! checksum always yields a polymod of zero.

use crate::PrimitivesError;

/// The 32-character address alphabet.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Number of 5-bit symbols in a checksum.
pub const CHECKSUM_LENGTH: usize = 8;

const GENERATORS: [u64; 5] = [
    0x98f2bc8e61,
    0x79b76d99e2,
    0xf33e5fb3c4,
    0xae2eabe2a8,
    0x1e4f43e470,
];

/// Map 5-bit symbols to alphabet characters.
///
/// # Arguments
/// * `symbols` - Values in `0..32`.
///
/// # Returns
/// The encoded string, or an error if a symbol is out of range.
pub fn encode(symbols: &[u8]) -> Result<String, PrimitivesError> {
    symbols
        .iter()
        .map(|&s| {
            CHARSET
                .get(s as usize)
                .map(|&c| c as char)
                .ok_or(PrimitivesError::InvalidBitGroup { value: s, bits: 5 })
        })
        .collect()
}

/// Map alphabet characters back to 5-bit symbols.
///
/// Only lower-case alphabet characters are accepted.
///
/// # Arguments
/// * `s` - The encoded string.
///
/// # Returns
/// The symbol values, or an error naming the first character outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    s.chars()
        .map(|c| {
            CHARSET
                .iter()
                .position(|&a| a as char == c)
                .map(|p| p as u8)
                .ok_or(PrimitivesError::InvalidBase32Char(c))
        })
        .collect()
}

/// Repack a sequence of `from_bits`-wide groups into `to_bits`-wide groups.
///
/// With `pad` set, a trailing partial group is zero-padded (used when
/// encoding bytes into symbols). Without it the conversion is strict: any
/// leftover bits must be fewer than `from_bits` and all zero, otherwise the
/// input was not produced by a padded encoding and is rejected.
///
/// # Arguments
/// * `data` - Input groups, each below `2^from_bits`.
/// * `from_bits` - Input group width (1..=8).
/// * `to_bits` - Output group width (1..=8).
/// * `pad` - Whether to pad a trailing partial group.
///
/// # Returns
/// The repacked groups, or an error on an oversized group or bad padding.
pub fn convert_bits(
    data: &[u8],
    from_bits: u32,
    to_bits: u32,
    pad: bool,
) -> Result<Vec<u8>, PrimitivesError> {
    if !(1..=8).contains(&from_bits) || !(1..=8).contains(&to_bits) {
        return Err(PrimitivesError::InvalidBitWidth { from: from_bits, to: to_bits });
    }

    let max_value: u32 = (1 << to_bits) - 1;
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut out = Vec::with_capacity(data.len() * from_bits as usize / to_bits as usize + 1);

    for &value in data {
        if u32::from(value) >> from_bits != 0 {
            return Err(PrimitivesError::InvalidBitGroup { value, bits: from_bits });
        }
        acc = ((acc << from_bits) | u32::from(value)) & 0xffff;
        bits += from_bits;
        while bits >= to_bits {
            bits -= to_bits;
            out.push(((acc >> bits) & max_value) as u8);
        }
    }

    if pad {
        if bits > 0 {
            out.push(((acc << (to_bits - bits)) & max_value) as u8);
        }
    } else if bits >= from_bits || (acc << (to_bits - bits)) & max_value != 0 {
        return Err(PrimitivesError::InvalidPadding);
    }

    Ok(out)
}

/// Compute the 40-bit polymod over a sequence of 5-bit values.
///
/// # Arguments
/// * `values` - The 5-bit values.
///
/// # Returns
/// The polymod result; zero for a sequence that ends in its own checksum.
pub fn polymod(values: &[u8]) -> u64 {
    let mut c: u64 = 1;
    for &d in values {
        let c0 = c >> 35;
        c = ((c & 0x07_ffff_ffff) << 5) ^ u64::from(d);
        for (i, generator) in GENERATORS.iter().enumerate() {
            if (c0 >> i) & 1 == 1 {
                c ^= generator;
            }
        }
    }
    c ^ 1
}

/// The 5-bit form of a prefix followed by the zero separator.
fn prefix_values(prefix: &str) -> impl Iterator<Item = u8> + '_ {
    prefix.bytes().map(|b| b & 0x1f).chain(std::iter::once(0))
}

/// Compute the checksum of `payload` under `prefix`.
///
/// # Arguments
/// * `prefix` - The human-readable prefix (e.g. `kaspa`).
/// * `payload` - The 5-bit payload symbols.
///
/// # Returns
/// The eight 5-bit checksum symbols.
pub fn checksum(prefix: &str, payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let values: Vec<u8> = prefix_values(prefix)
        .chain(payload.iter().copied())
        .chain(std::iter::repeat(0).take(CHECKSUM_LENGTH))
        .collect();
    let poly = polymod(&values);

    let mut out = [0u8; CHECKSUM_LENGTH];
    for (i, symbol) in out.iter_mut().enumerate() {
        *symbol = ((poly >> (5 * (CHECKSUM_LENGTH - 1 - i))) & 0x1f) as u8;
    }
    out
}

/// Verify symbols that end in their own checksum.
///
/// # Arguments
/// * `prefix` - The human-readable prefix.
/// * `data` - Payload symbols followed by the eight checksum symbols.
///
/// # Returns
/// `true` if the polymod over `prefix ‖ 0 ‖ data` is zero.
pub fn verify_checksum(prefix: &str, data: &[u8]) -> bool {
    let values: Vec<u8> = prefix_values(prefix).chain(data.iter().copied()).collect();
    polymod(&values) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_symbols() {
        let symbols: Vec<u8> = (0..32).collect();
        let encoded = encode(&symbols).unwrap();
        assert_eq!(encoded, "qpzry9x8gf2tvdw0s3jn54khce6mua7l");
        assert_eq!(decode(&encoded).unwrap(), symbols);
    }

    #[test]
    fn test_decode_rejects_foreign_characters() {
        // 'b', 'i', 'o' and '1' are not in the alphabet; upper case is not accepted.
        for bad in ["qpb", "qpi", "qpo", "qp1", "QP"] {
            assert!(decode(bad).is_err(), "{} should be rejected", bad);
        }
        assert!(encode(&[32]).is_err());
    }

    #[test]
    fn test_convert_bits_padded() {
        // 0xff -> 11111 111(00)
        assert_eq!(convert_bits(&[0xff], 8, 5, true).unwrap(), vec![31, 28]);
        // 33 bytes -> 53 symbols (264 bits, 4 bits of padding).
        assert_eq!(convert_bits(&[0u8; 33], 8, 5, true).unwrap().len(), 53);
    }

    #[test]
    fn test_convert_bits_strict() {
        assert_eq!(convert_bits(&[31, 28], 5, 8, false).unwrap(), vec![0xff]);
        // Non-zero padding bits.
        assert!(matches!(
            convert_bits(&[31, 29], 5, 8, false),
            Err(PrimitivesError::InvalidPadding)
        ));
        // A whole dangling symbol.
        assert!(convert_bits(&[31, 28, 0], 5, 8, false).is_err());
        // Group wider than the declared width.
        assert!(convert_bits(&[32], 5, 8, false).is_err());
        assert!(convert_bits(&[1], 0, 8, false).is_err());
    }

    #[test]
    fn test_convert_bits_roundtrip() {
        let data: Vec<u8> = (0u8..=32).collect();
        let symbols = convert_bits(&data, 8, 5, true).unwrap();
        assert_eq!(convert_bits(&symbols, 5, 8, false).unwrap(), data);
    }

    #[test]
    fn test_checksum_makes_polymod_zero() {
        let payload = convert_bits(&[0u8; 33], 8, 5, true).unwrap();
        let mut data = payload.clone();
        data.extend_from_slice(&checksum("kaspa", &payload));
        assert!(verify_checksum("kaspa", &data));
        assert!(!verify_checksum("kaspatest", &data));

        data[3] ^= 1;
        assert!(!verify_checksum("kaspa", &data));
    }
}
