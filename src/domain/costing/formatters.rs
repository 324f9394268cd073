//! Display formatting for currency amounts and ranges.

use rust_decimal::{Decimal, RoundingStrategy};

use super::CostRange;
use crate::domain::foundation::round2;

/// Formats a USD amount: `$1,234.50`, `-$12.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round2(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

/// Formats a range as `low - high`, or a single amount when they coincide.
pub fn format_range(range: &CostRange) -> String {
    if range.low == range.high {
        return format_currency(range.low);
    }
    format!("{} - {}", format_currency(range.low), format_currency(range.high))
}

/// Formats a factor with a fixed number of decimals, e.g. `0.9820`.
pub fn format_factor(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", decimals as usize, rounded)
}
