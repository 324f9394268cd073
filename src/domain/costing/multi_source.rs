//! Cost range from several quoted prices.

use rust_decimal::Decimal;

use super::CostRange;
use crate::domain::foundation::round2;

/// Builds a range from vendor quotes.
///
/// Low and high are the extremes. The average excludes values outside
/// `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]`, with quartiles taken at indices
/// `floor(n/4)` and `floor(3n/4)` of the sorted list. An empty list yields
/// the zero range.
pub fn multi_source_range(quotes: &[Decimal]) -> CostRange {
    if quotes.is_empty() {
        tracing::warn!("No cost sources provided");
        return CostRange::ZERO;
    }

    let mut sorted = quotes.to_vec();
    sorted.sort();
    let n = sorted.len();

    let q1 = sorted[n / 4];
    let q3 = sorted[(n * 3) / 4];
    let fence = q3.saturating_sub(q1).saturating_mul(Decimal::new(15, 1));
    let (lower, upper) = (q1.saturating_sub(fence), q3.saturating_add(fence));

    let kept: Vec<Decimal> = sorted
        .iter()
        .copied()
        .filter(|q| *q >= lower && *q <= upper)
        .collect();
    let excluded = n - kept.len();
    if excluded > 0 {
        tracing::debug!(excluded, lower = %lower, upper = %upper, "Excluded outlier cost sources");
    }

    // Q1 and Q3 always lie inside their own fences, so `kept` is non-empty.
    let total = kept.iter().fold(Decimal::ZERO, |acc, q| acc.saturating_add(*q));
    let average = total / Decimal::from(kept.len());

    CostRange {
        low: round2(sorted[0]),
        average: round2(average),
        high: round2(sorted[n - 1]),
    }
}
