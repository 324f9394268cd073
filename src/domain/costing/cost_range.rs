//! Low / average / high cost triple.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{mean, round2};

/// A range of currency amounts with `low <= average <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CostRange {
    pub low: Decimal,
    pub average: Decimal,
    pub high: Decimal,
}

impl CostRange {
    /// The all-zero range.
    pub const ZERO: Self = Self {
        low: Decimal::ZERO,
        average: Decimal::ZERO,
        high: Decimal::ZERO,
    };

    /// Builds a range from two bounds; the average is their rounded mean.
    ///
    /// Bounds given in the wrong order are swapped so the ordering
    /// invariant holds even for inconsistent reference data.
    pub fn from_bounds(low: Decimal, high: Decimal) -> Self {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let low = round2(low);
        let high = round2(high);
        Self {
            low,
            average: round2(mean(low, high)),
            high,
        }
    }

    /// A degenerate range where all three values coincide.
    pub fn uniform(value: Decimal) -> Self {
        let value = round2(value);
        Self {
            low: value,
            average: value,
            high: value,
        }
    }

    /// True when `low <= average <= high`.
    pub fn is_ordered(&self) -> bool {
        self.low <= self.average && self.average <= self.high
    }

    /// True when the range collapses to a single value.
    pub fn is_uniform(&self) -> bool {
        self.low == self.high
    }

    /// Component-wise sum. Sums of cent amounts stay exact.
    pub fn add(&self, other: &CostRange) -> CostRange {
        CostRange {
            low: self.low.saturating_add(other.low),
            average: self.average.saturating_add(other.average),
            high: self.high.saturating_add(other.high),
        }
    }
}
