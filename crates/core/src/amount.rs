//! Unit amounts supplied as text.
//!
//! Quantity operations take `i64` so that zero and negative requests can be
//! reported instead of being unrepresentable. Text that is not a whole number
//! at all is rejected here, before it reaches a product.

use crate::error::{StoreError, StoreResult};

/// Parse a whole-number amount such as `"200"` or `"-3"`.
///
/// `"2.5"`, `"ten"` and the empty string are [`StoreError::InvalidAmountType`].
/// Sign checks belong to the operation consuming the amount.
pub fn parse_amount(raw: &str) -> StoreResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| StoreError::InvalidAmountType(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_parse_with_sign() {
        assert_eq!(parse_amount("200").unwrap(), 200);
        assert_eq!(parse_amount(" -3 ").unwrap(), -3);
        assert_eq!(parse_amount("0").unwrap(), 0);
    }

    #[test]
    fn fractional_and_textual_amounts_are_invalid_type() {
        for raw in ["2.5", "ten", "", "1e3"] {
            assert_eq!(
                parse_amount(raw).unwrap_err(),
                StoreError::InvalidAmountType(raw.to_string()),
            );
        }
    }
}
