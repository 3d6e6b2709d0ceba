use derive_more::{Add, AddAssign, Display, FromStr, Sub, SubAssign, Sum};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal as WrappedDecimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Visitor};
use std::{cmp::Ordering, fmt};
use thiserror::Error as ThisError;

///
/// CONSTANTS
///

/// Significant digits allowed when no explicit precision is configured.
pub const DEFAULT_PRECISION: u32 = 28;

/// Largest scale the underlying representation can carry.
pub const MAX_SCALE: u32 = 28;

///
/// QuantizeError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum QuantizeError {
    #[error("{decimal_places} decimal places exceed the supported scale")]
    ScaleOutOfRange { decimal_places: u32 },

    #[error("value does not fit at {decimal_places} decimal places")]
    Overflow { decimal_places: u32 },

    #[error("quantized value needs {digits} significant digits but precision is {precision}")]
    PrecisionExceeded { digits: u32, precision: u32 },
}

///
/// Decimal
///

#[derive(
    Add,
    AddAssign,
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    FromStr,
    PartialEq,
    Sum,
    Hash,
    Ord,
    PartialOrd,
    Sub,
    SubAssign,
)]
pub struct Decimal(WrappedDecimal);

impl Decimal {
    pub const ZERO: Self = Self(WrappedDecimal::ZERO);

    #[must_use]
    /// Construct a decimal from mantissa and scale.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(WrappedDecimal::new(num, scale))
    }

    /// Lenient text parse: surrounding whitespace is ignored and scientific
    /// notation is accepted.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        s.parse::<WrappedDecimal>()
            .or_else(|_| WrappedDecimal::from_scientific(s))
            .ok()
            .map(Self)
    }

    /// Conversion from a float; non-finite input has no decimal form.
    #[must_use]
    pub fn from_f64(n: f64) -> Option<Self> {
        if n.is_finite() {
            WrappedDecimal::from_f64(n).map(Self)
        } else {
            None
        }
    }

    /// Conversion from the exact binary value of a float, keeping every
    /// digit the mantissa can hold. `2.675` becomes `2.67499999...`.
    #[must_use]
    pub fn from_f64_exact(n: f64) -> Option<Self> {
        if n.is_finite() {
            WrappedDecimal::from_f64_retain(n).map(Self)
        } else {
            None
        }
    }

    /// Conversion used for equality checks, going through the shortest
    /// round-trip text of the float so `0.1` compares equal to `"0.1"`.
    #[must_use]
    pub fn from_f64_text(n: f64) -> Option<Self> {
        if n.is_finite() {
            Self::parse(&n.to_string())
        } else {
            None
        }
    }

    ///
    /// QUANTIZE
    ///

    /// Round half-to-even to exactly `decimal_places` fractional digits.
    ///
    /// The result always carries the requested scale, padding with zeros when
    /// the input is shorter. When `precision` is `None` the default context
    /// precision applies.
    pub fn quantize(self, decimal_places: u32, precision: Option<u32>) -> Result<Self, QuantizeError> {
        if decimal_places > MAX_SCALE {
            return Err(QuantizeError::ScaleOutOfRange { decimal_places });
        }

        let mut quantized = self
            .0
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
        quantized.rescale(decimal_places);

        if quantized.scale() != decimal_places {
            return Err(QuantizeError::Overflow { decimal_places });
        }

        let quantized = Self(quantized);
        let precision = precision.unwrap_or(DEFAULT_PRECISION);
        let digits = quantized.significant_digits();
        if digits > precision {
            return Err(QuantizeError::PrecisionExceeded { digits, precision });
        }

        Ok(quantized)
    }

    /// Number of digits in the coefficient; zero counts as one digit.
    #[must_use]
    pub fn significant_digits(&self) -> u32 {
        let mantissa = self.0.mantissa().unsigned_abs();
        if mantissa == 0 {
            1
        } else {
            mantissa.ilog10() + 1
        }
    }

    ///
    /// WRAPPED FUNCTIONS
    ///

    /// Returns the number of fractional decimal places.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.0.scale()
    }

    /// Returns the mantissa component.
    #[must_use]
    pub const fn mantissa(&self) -> i128 {
        self.0.mantissa()
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the value has no fractional component, regardless of
    /// trailing zeros in the scale.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.0.fract().is_zero()
    }

    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

impl From<WrappedDecimal> for Decimal {
    fn from(d: WrappedDecimal) -> Self {
        Self(d)
    }
}

impl From<Decimal> for WrappedDecimal {
    fn from(d: Decimal) -> Self {
        d.0
    }
}

macro_rules! impl_decimal_from_int {
    ( $( $type:ty ),* ) => {
        $(
            impl From<$type> for Decimal {
                fn from(n: $type) -> Self {
                    Self(WrappedDecimal::from(n))
                }
            }
        )*
    };
}

impl_decimal_from_int!(u8, u16, u32, u64, i8, i16, i32, i64);

// ----- Cross-type comparisons between Decimal and WrappedDecimal -----

impl PartialEq<WrappedDecimal> for Decimal {
    fn eq(&self, other: &WrappedDecimal) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<WrappedDecimal> for Decimal {
    fn partial_cmp(&self, other: &WrappedDecimal) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

// Serde: decimal text keeps the scale intact across any interchange format.
impl Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl Visitor<'_> for DecimalVisitor {
            type Value = Decimal;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal string or number")
            }

            fn visit_str<E: serde::de::Error>(self, s: &str) -> Result<Decimal, E> {
                Decimal::parse(s).ok_or_else(|| E::custom(format!("invalid decimal: '{s}'")))
            }

            fn visit_i64<E: serde::de::Error>(self, n: i64) -> Result<Decimal, E> {
                Ok(Decimal::from(n))
            }

            fn visit_u64<E: serde::de::Error>(self, n: u64) -> Result<Decimal, E> {
                Ok(Decimal::from(n))
            }

            fn visit_f64<E: serde::de::Error>(self, n: f64) -> Result<Decimal, E> {
                Decimal::from_f64_text(n).ok_or_else(|| E::custom("non-finite decimal"))
            }
        }

        deserializer.deserialize_any(DecimalVisitor)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::parse(s).expect("parse decimal")
    }

    #[test]
    fn quantize_pads_short_values() {
        let q = dec("1.5").quantize(3, None).unwrap();
        assert_eq!(q.scale(), 3);
        assert_eq!(q.to_string(), "1.500");
    }

    #[test]
    fn quantize_rounds_half_to_even() {
        assert_eq!(dec("2.0005").quantize(3, None).unwrap().to_string(), "2.000");
        assert_eq!(dec("2.0015").quantize(3, None).unwrap().to_string(), "2.002");
        assert_eq!(dec("-2.0015").quantize(3, None).unwrap().to_string(), "-2.002");
    }

    #[test]
    fn quantize_respects_precision_override() {
        assert!(dec("123.45").quantize(2, Some(5)).is_ok());

        let err = dec("1234.5").quantize(2, Some(5)).unwrap_err();
        assert_eq!(
            err,
            QuantizeError::PrecisionExceeded {
                digits: 6,
                precision: 5
            }
        );
    }

    #[test]
    fn quantize_rejects_scale_beyond_limit() {
        assert_eq!(
            dec("1").quantize(29, None),
            Err(QuantizeError::ScaleOutOfRange { decimal_places: 29 })
        );
    }

    #[test]
    fn parse_accepts_whitespace_and_scientific() {
        assert_eq!(dec(" 4.20 "), dec("4.2"));
        assert_eq!(dec("1e3"), Decimal::from(1000));
        assert!(Decimal::parse("abc").is_none());
        assert!(Decimal::parse("").is_none());
    }

    #[test]
    fn significant_digits_counts_coefficient() {
        assert_eq!(Decimal::ZERO.significant_digits(), 1);
        assert_eq!(dec("0.000").significant_digits(), 1);
        assert_eq!(dec("-12.340").significant_digits(), 5);
    }

    #[test]
    fn serde_json_uses_decimal_text() {
        let d = dec("42.500");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, "\"42.500\"");

        let back: Decimal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), "42.500");

        let from_number: Decimal = serde_json::from_str("0.25").unwrap();
        assert_eq!(from_number, dec("0.25"));
    }

    proptest! {
        #[test]
        fn quantize_is_idempotent(mantissa in -1_000_000_000i64..1_000_000_000, scale in 0u32..9, dp in 0u32..6) {
            let once = Decimal::new(mantissa, scale).quantize(dp, None).unwrap();
            let twice = once.quantize(dp, None).unwrap();

            prop_assert_eq!(once.scale(), dp);
            prop_assert_eq!(once.to_string(), twice.to_string());
        }
    }
}
