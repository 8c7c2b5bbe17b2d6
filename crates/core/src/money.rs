//! Monetary amounts as exact fixed-point values.
//!
//! Amounts are stored in smallest units (cents), so balance arithmetic and
//! comparison never touch floating point. Two fractional digits is the
//! maximum precision accepted anywhere.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::DomainError;

/// An exact monetary amount in minor units (cents).
///
/// The sign is part of the value; whether a negative amount is acceptable is
/// decided by the caller (balances must be non-negative, transfer amounts
/// strictly positive).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build from minor units (cents).
    pub fn from_minor_units(cents: i64) -> Self {
        Self(cents)
    }

    /// Build from whole currency units. `None` on overflow.
    pub fn from_major_units(units: i64) -> Option<Self> {
        units.checked_mul(100).map(Self)
    }

    pub fn minor_units(&self) -> i64 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    /// Canonical rendering: always two fractional digits (`"70.00"`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parse a decimal literal with at most two fractional digits.
    ///
    /// Accepts `"100"`, `"100.5"`, `"100.50"`, `".5"`, `"5."`, and a leading
    /// `+`/`-`. Rejects anything with more than two fractional digits rather
    /// than rounding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(DomainError::validation(format!(
                "`{trimmed}` is not a valid decimal amount"
            )));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "`{trimmed}` is not a valid decimal amount"
            )));
        }
        if frac.len() > 2 {
            return Err(DomainError::validation(
                "amount must have at most two decimal places",
            ));
        }

        let out_of_range = || DomainError::validation("amount out of range");

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        let frac_bytes = frac.as_bytes();
        let frac_cents = match frac_bytes.len() {
            0 => 0,
            1 => i64::from(frac_bytes[0] - b'0') * 10,
            _ => i64::from(frac_bytes[0] - b'0') * 10 + i64::from(frac_bytes[1] - b'0'),
        };

        let cents = whole_units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(out_of_range)?;

        if negative {
            cents.checked_neg().map(Money).ok_or_else(out_of_range)
        } else {
            Ok(Money(cents))
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    /// Accepts a decimal string (`"100.00"`) or a JSON number (`100`, `100.5`).
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl de::Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount with at most two fractional digits")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
                Money::from_major_units(v)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(Money::from_major_units)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
                // `Display` for f64 is the shortest decimal that round-trips,
                // so any JSON literal within two fractional digits re-parses
                // exactly; extra precision still fails the two-decimal check.
                v.to_string().parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_literals() {
        assert_eq!("100".parse::<Money>().unwrap(), Money::from_minor_units(10_000));
        assert_eq!("100.5".parse::<Money>().unwrap(), Money::from_minor_units(10_050));
        assert_eq!("100.50".parse::<Money>().unwrap(), Money::from_minor_units(10_050));
        assert_eq!("0.07".parse::<Money>().unwrap(), Money::from_minor_units(7));
        assert_eq!(".5".parse::<Money>().unwrap(), Money::from_minor_units(50));
        assert_eq!("5.".parse::<Money>().unwrap(), Money::from_minor_units(500));
        assert_eq!("-2.25".parse::<Money>().unwrap(), Money::from_minor_units(-225));
        assert_eq!("+3".parse::<Money>().unwrap(), Money::from_minor_units(300));
    }

    #[test]
    fn rejects_excess_precision() {
        let err = "10.123".parse::<Money>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("two decimal places"));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", ".", "-", "abc", "1,5", "1.2.3", "1e3", "--1"] {
            assert!(bad.parse::<Money>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_literals() {
        assert!("92233720368547758.08".parse::<Money>().is_err());
    }

    #[test]
    fn displays_two_decimals() {
        assert_eq!(Money::from_minor_units(10_000).to_string(), "100.00");
        assert_eq!(Money::from_minor_units(7_005).to_string(), "70.05");
        assert_eq!(Money::from_minor_units(-50).to_string(), "-0.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for cents in [0, 1, 99, 100, 12_345, -12_345, i64::MAX, i64::MIN + 1] {
            let m = Money::from_minor_units(cents);
            assert_eq!(m.to_string().parse::<Money>().unwrap(), m);
        }
    }

    #[test]
    fn deserializes_from_string_and_number() {
        let from_str: Money = serde_json::from_str(r#""30.00""#).unwrap();
        assert_eq!(from_str, Money::from_minor_units(3_000));

        let from_float: Money = serde_json::from_str("30.45").unwrap();
        assert_eq!(from_float, Money::from_minor_units(3_045));

        let from_int: Money = serde_json::from_str("25").unwrap();
        assert_eq!(from_int, Money::from_minor_units(2_500));
    }

    #[test]
    fn deserialize_rejects_excess_precision() {
        assert!(serde_json::from_str::<Money>("0.125").is_err());
        assert!(serde_json::from_str::<Money>(r#""0.125""#).is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&Money::from_minor_units(7_000)).unwrap();
        assert_eq!(json, r#""70.00""#);
    }

    #[test]
    fn checked_arithmetic_guards_overflow() {
        let max = Money::from_minor_units(i64::MAX);
        assert!(max.checked_add(Money::from_minor_units(1)).is_none());
        assert_eq!(
            Money::from_minor_units(100).checked_sub(Money::from_minor_units(30)),
            Some(Money::from_minor_units(70))
        );
    }
}
