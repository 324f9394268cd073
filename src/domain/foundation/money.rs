//! Currency arithmetic helpers.
//!
//! Every monetary boundary (per-occurrence cost, annual cost, lifetime cost)
//! is rounded to cents with banker's rounding. Rounding happens at each
//! boundary rather than once at the end, so results carry a small,
//! reproducible intermediate rounding error.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Largest amount a persisted cost column holds (NUMERIC(14,2)).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// Rounds an amount to cents, midpoint to even.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Arithmetic mean of two values, unrounded.
pub fn mean(a: Decimal, b: Decimal) -> Decimal {
    a.saturating_add(b) / Decimal::TWO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn round2_uses_bankers_rounding() {
        assert_eq!(round2(d("0.125")), d("0.12"));
        assert_eq!(round2(d("0.135")), d("0.14"));
        assert_eq!(round2(d("99.1")), d("99.10"));
    }

    #[test]
    fn round2_leaves_cents_untouched() {
        assert_eq!(round2(d("1234.56")), d("1234.56"));
    }

    #[test]
    fn max_amount_matches_column_range() {
        assert_eq!(MAX_AMOUNT, d("9999999999.99"));
    }

    #[test]
    fn mean_of_extremes_does_not_overflow() {
        assert_eq!(mean(Decimal::MAX, Decimal::MAX), Decimal::MAX / Decimal::TWO);
    }

    #[test]
    fn mean_is_unrounded() {
        assert_eq!(mean(d("0.982"), d("1.0")), d("0.991"));
        assert_eq!(mean(d("1"), d("2")), d("1.5"));
    }
}
