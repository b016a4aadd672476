//! Amount parsing, formatting and checked arithmetic.
//!
//! Amounts travel as decimal strings of base units (sompi) and are held as
//! `u64`. Sums never wrap: overflow surfaces as `AmountOverflow`.

use crate::TransactionError;

/// Parse a decimal string of sompi.
///
/// # Arguments
/// * `s` - ASCII digits only; no sign, no decimal point, no whitespace.
///
/// # Returns
/// The value, or `AmountOverflow` for an empty, non-digit or oversized string.
pub fn parse_sompi(s: &str) -> Result<u64, TransactionError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TransactionError::AmountOverflow(format!(
            "'{}' is not a decimal amount",
            s
        )));
    }
    s.parse::<u64>()
        .map_err(|_| TransactionError::AmountOverflow(format!("'{}' does not fit in 64 bits", s)))
}

/// Format sompi in human units with `decimals` fractional digits.
///
/// Trailing fractional zeros are dropped, e.g. `150000000` with 8 decimals
/// formats as `1.5`.
pub fn format_amount(value: u64, decimals: u32) -> String {
    let unit = match 10u64.checked_pow(decimals) {
        Some(unit) => unit,
        None => return value.to_string(),
    };
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:0width$}", frac, width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Sum amounts, failing instead of wrapping.
///
/// # Arguments
/// * `values` - The amounts to add.
/// * `what` - Names the sum in the error message.
pub fn checked_sum<I>(values: I, what: &str) -> Result<u64, TransactionError>
where
    I: IntoIterator<Item = u64>,
{
    values.into_iter().try_fold(0u64, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| TransactionError::AmountOverflow(format!("{} overflows 64 bits", what)))
    })
}

/// Serde adapter for amounts written as decimal strings.
///
/// Plain JSON numbers are accepted on input as well.
pub mod decimal_string {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Write the amount as a decimal string.
    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    /// Read a decimal string or a plain number.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = u64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer amount as a decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
                Ok(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
                super::parse_sompi(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sompi() {
        assert_eq!(parse_sompi("0").unwrap(), 0);
        assert_eq!(parse_sompi("100000000").unwrap(), 100_000_000);
        assert_eq!(parse_sompi("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn test_parse_sompi_rejects() {
        for bad in ["", "-1", "1.5", " 1", "1e8", "18446744073709551616"] {
            assert!(
                matches!(parse_sompi(bad), Err(TransactionError::AmountOverflow(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0, 8), "0");
        assert_eq!(format_amount(150_000_000, 8), "1.5");
        assert_eq!(format_amount(600, 8), "0.000006");
        assert_eq!(format_amount(1_234, 0), "1234");
    }

    #[test]
    fn test_checked_sum() {
        assert_eq!(checked_sum([1, 2, 3], "inputs").unwrap(), 6);
        let err = checked_sum([u64::MAX, 1], "inputs").unwrap_err();
        assert!(err.to_string().contains("inputs"));
    }

    #[test]
    fn test_decimal_string_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "decimal_string")]
            value: u64,
        }

        let w: Wrapper = serde_json::from_str(r#"{"value":"1000"}"#).unwrap();
        assert_eq!(w.value, 1000);
        let w: Wrapper = serde_json::from_str(r#"{"value":42}"#).unwrap();
        assert_eq!(w.value, 42);
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"-5"}"#).is_err());
        assert_eq!(serde_json::to_string(&w).unwrap(), r#"{"value":"42"}"#);
    }
}
