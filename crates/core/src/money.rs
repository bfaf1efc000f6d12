//! Money value object (2-decimal resolution, stored as whole cents).

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

const CENTS_PER_UNIT: u64 = 100;

/// A non-negative amount of money in the smallest currency unit (cents).
///
/// Rounding to the cent is always half-up:
/// - decimal text is converted digit by digit, so `"1.005"` becomes `1.01`
///   and `"2.675"` becomes `2.68`;
/// - an `f64` is rounded by its exact binary value, so `1.005_f64` (stored as
///   `1.00499999...`) becomes `1.00`.
///
/// Arithmetic between `Money` values is exact.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Round a decimal amount to 2 places.
    ///
    /// Negative, NaN and infinite amounts are rejected with
    /// [`StoreError::InvalidPrice`].
    pub fn from_decimal(value: f64) -> StoreResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(StoreError::invalid_price(value));
        }
        Money(CENTS_PER_UNIT).scale(value)
    }

    /// Parse decimal text such as `"45.99"`, `"100"` or `".5"`.
    ///
    /// Digits past the second decimal place only decide rounding. Signs,
    /// exponents and anything other than digits and one `.` are rejected with
    /// [`StoreError::InvalidPrice`].
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let text = raw.trim();
        let invalid = || StoreError::invalid_price(text);
        let too_large = || StoreError::overflow(format!("{text} does not fit in cents"));

        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
            return Err(invalid());
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let digit = |at: usize| fraction.as_bytes().get(at).map_or(0, |b| u64::from(b - b'0'));
        let cents = digit(0) * 10 + digit(1) + u64::from(digit(2) >= 5);

        whole
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(too_large)
    }

    /// Multiply by `factor`, rounding the exact product to the cent (half-up).
    ///
    /// The product is computed in integers from the bits of `factor`, so it
    /// stays exact for every `u64` amount. A negative factor is only accepted
    /// on [`Money::ZERO`].
    pub fn scale(self, factor: f64) -> StoreResult<Money> {
        if !factor.is_finite() || (factor < 0.0 && self.0 != 0) {
            return Err(StoreError::invalid_price(format!("{self} * {factor}")));
        }
        let overflow = || StoreError::overflow(format!("{self} * {factor}"));

        let (mantissa, exponent) = decompose(factor.abs());
        let product = u128::from(self.0) * u128::from(mantissa);

        let cents = if product == 0 {
            0
        } else if exponent >= 0 {
            let shift = exponent.unsigned_abs();
            if shift >= product.leading_zeros() {
                return Err(overflow());
            }
            product << shift
        } else {
            let shift = exponent.unsigned_abs();
            if shift >= u128::BITS {
                0
            } else {
                let kept = product >> shift;
                let dropped = product - (kept << shift);
                kept + u128::from(dropped >= 1u128 << (shift - 1))
            }
        };

        u64::try_from(cents).map(Money).map_err(|_| overflow())
    }

    /// True when the amount has no fractional cents (`100.00`).
    pub fn is_whole_units(self) -> bool {
        self.0 % CENTS_PER_UNIT == 0
    }

    pub fn whole_units(self) -> u64 {
        self.0 / CENTS_PER_UNIT
    }

    pub fn checked_add(self, other: Money) -> StoreResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| StoreError::overflow(format!("{self} + {other}")))
    }

    /// Price of `quantity` units at `self` each.
    pub fn checked_mul(self, quantity: u64) -> StoreResult<Money> {
        self.0
            .checked_mul(quantity)
            .map(Money)
            .ok_or_else(|| StoreError::overflow(format!("{self} * {quantity}")))
    }
}

fn is_digits(text: &str) -> bool {
    text.bytes().all(|b| b.is_ascii_digit())
}

/// Split a finite, non-negative `f64` into `mantissa * 2^exponent`.
fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1 << 52) - 1);
    if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1 << 52), biased - 1075)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.whole_units(), self.0 % CENTS_PER_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(45.99).unwrap().cents(), 4599);
        assert_eq!(Money::from_decimal(55.188).unwrap().cents(), 5519);
        assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 13);
        assert_eq!(Money::from_decimal(10.0).unwrap().cents(), 1000);
    }

    #[test]
    fn from_decimal_rounds_the_binary_value() {
        // 1.005 and 2.675 are both stored just below the half cent.
        assert_eq!(Money::from_decimal(1.005).unwrap().cents(), 100);
        assert_eq!(Money::from_decimal(2.675).unwrap().cents(), 267);
    }

    #[test]
    fn from_decimal_rejects_negative_and_non_finite() {
        for value in [-0.01, -45.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Money::from_decimal(value).unwrap_err();
            assert!(matches!(err, StoreError::InvalidPrice(_)), "{value}");
        }
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(Money::from_decimal(-0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn parse_rounds_half_cents_up() {
        assert_eq!(Money::parse("1.005").unwrap().cents(), 101);
        assert_eq!(Money::parse("2.675").unwrap().cents(), 268);
        assert_eq!(Money::parse("1.00499").unwrap().cents(), 100);
        assert_eq!(Money::parse("0.995").unwrap().cents(), 100);
    }

    #[test]
    fn parse_accepts_partial_decimals() {
        assert_eq!(Money::parse("45.99").unwrap().cents(), 4599);
        assert_eq!(Money::parse("100").unwrap().cents(), 10_000);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("3.").unwrap().cents(), 300);
        assert_eq!(Money::parse(" 12.5 ").unwrap().cents(), 1250);
    }

    #[test]
    fn parse_rejects_text_that_is_not_a_number() {
        for raw in ["ten dollars", "", ".", "-1", "+1", "1e3", "1.2.3", "NaN", "1,50"] {
            assert_eq!(
                Money::parse(raw).unwrap_err(),
                StoreError::InvalidPrice(raw.to_string()),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn parse_reports_amounts_too_large_for_cents() {
        let err = Money::parse("184467440737095517").unwrap_err();
        assert!(matches!(err, StoreError::Overflow(_)));
        assert_eq!(
            Money::parse("184467440737095516.15").unwrap(),
            Money::from_cents(u64::MAX)
        );
    }

    #[test]
    fn scale_is_exact_above_float_precision() {
        let price = Money::from_cents(9_007_199_254_740_993);
        assert_eq!(price.scale(1.0).unwrap(), price);
        assert_eq!(price.scale(2.0).unwrap(), Money::from_cents(18_014_398_509_481_986));
        assert_eq!(price.scale(0.5).unwrap(), Money::from_cents(4_503_599_627_370_497));
    }

    #[test]
    fn scale_rounds_to_cents() {
        assert_eq!(Money::from_cents(4599).scale(1.2).unwrap(), Money::from_cents(5519));
        assert_eq!(Money::from_cents(350).scale(1.2).unwrap(), Money::from_cents(420));
        assert_eq!(Money::from_cents(1).scale(0.5).unwrap(), Money::from_cents(1));
        assert_eq!(Money::from_cents(1).scale(0.25).unwrap(), Money::ZERO);
        assert_eq!(Money::from_cents(4599).scale(0.0).unwrap(), Money::ZERO);
    }

    #[test]
    fn scale_rejects_negative_results_and_overflow() {
        assert!(matches!(
            Money::from_cents(4599).scale(-2.0),
            Err(StoreError::InvalidPrice(_))
        ));
        assert_eq!(Money::ZERO.scale(-2.0).unwrap(), Money::ZERO);
        assert!(matches!(
            Money::from_cents(1).scale(f64::NAN),
            Err(StoreError::InvalidPrice(_))
        ));
        assert!(matches!(
            Money::from_cents(u64::MAX).scale(1.5),
            Err(StoreError::Overflow(_))
        ));
        assert!(matches!(
            Money::from_cents(2).scale(1e300),
            Err(StoreError::Overflow(_))
        ));
    }

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::from_cents(4599).to_string(), "45.99");
        assert_eq!(Money::from_cents(10000).to_string(), "100.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn multiplication_is_exact() {
        let total = Money::from_cents(4599).checked_mul(50).unwrap();
        assert_eq!(total, Money::from_cents(229_950));
        assert_eq!(total.to_string(), "2299.50");
    }

    #[test]
    fn overflow_is_reported() {
        let err = Money::from_cents(u64::MAX).checked_mul(2).unwrap_err();
        assert!(matches!(err, StoreError::Overflow(_)));
        let err = Money::from_cents(u64::MAX)
            .checked_add(Money::from_cents(1))
            .unwrap_err();
        assert!(matches!(err, StoreError::Overflow(_)));
    }

    #[test]
    fn serializes_as_cents() {
        assert_eq!(serde_json::to_string(&Money::from_cents(4599)).unwrap(), "4599");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the rendered amount parses back to the same cents.
        #[test]
        fn display_parses_back(cents in any::<u64>()) {
            let money = Money::from_cents(cents);
            prop_assert_eq!(Money::parse(&money.to_string()).unwrap(), money);
        }

        /// Property: scaling by one never changes an amount.
        #[test]
        fn scale_by_one_is_identity(cents in any::<u64>()) {
            let money = Money::from_cents(cents);
            prop_assert_eq!(money.scale(1.0).unwrap(), money);
        }
    }
}
