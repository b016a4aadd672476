use proptest::prelude::*;

use kas_primitives::base32::{checksum, convert_bits, polymod, verify_checksum};
use kas_primitives::chainhash::Hash;
use kas_primitives::hash::{domain_hash, HashDomain, HashWriter};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn convert_bits_roundtrip(data in prop::collection::vec(any::<u8>(), 0..80)) {
        let symbols = convert_bits(&data, 8, 5, true).unwrap();
        prop_assert!(symbols.iter().all(|s| *s < 32));
        let back = convert_bits(&symbols, 5, 8, false).unwrap();
        prop_assert_eq!(back, data);
    }

    #[test]
    fn appended_checksum_zeroes_polymod(data in prop::collection::vec(0u8..32, 0..64)) {
        let mut full: Vec<u8> = "kaspa".bytes().map(|b| b & 0x1f).collect();
        full.push(0);
        full.extend_from_slice(&data);
        full.extend_from_slice(&checksum("kaspa", &data));
        prop_assert_eq!(polymod(&full), 0);
    }

    #[test]
    fn single_symbol_change_breaks_checksum(
        data in prop::collection::vec(0u8..32, 1..64),
        pos in any::<prop::sample::Index>(),
        delta in 1u8..32,
    ) {
        let mut full = data.clone();
        full.extend_from_slice(&checksum("kaspa", &data));
        let i = pos.index(full.len());
        full[i] ^= delta;
        prop_assert!(!verify_checksum("kaspa", &full));
    }

    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(any::<u8>())) {
        let hash = Hash::new(bytes);
        let hash2 = Hash::from_hex(&hash.to_string()).unwrap();
        prop_assert_eq!(hash, hash2);
    }

    #[test]
    fn hash_writer_is_concatenation(
        a in prop::collection::vec(any::<u8>(), 0..64),
        b in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut writer = HashWriter::new(HashDomain::TransactionSigning);
        writer.write_bytes(&a);
        writer.write_bytes(&b);
        let joined = [a.as_slice(), b.as_slice()].concat();
        prop_assert_eq!(writer.finalize(), domain_hash(HashDomain::TransactionSigning, &joined));
    }
}
