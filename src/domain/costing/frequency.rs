//! Free-text frequency parsing.
//!
//! Turns expressions such as `"3-5x per year"`, `"2 times a week"`,
//! `"quarterly"` or `"one-time"` into occurrences per year. Parsing never
//! fails: unrecognized text yields the 1/1 default with a warning.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{mean, round2};

/// Weeks per year used to convert weekly counts.
pub const WEEKS_PER_YEAR: Decimal = Decimal::from_parts(521429, 0, 0, false, 4);
/// Days per year used to convert daily counts.
pub const DAYS_PER_YEAR: Decimal = Decimal::from_parts(365, 0, 0, false, 0);
/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// `<n>[-<m>][x|times] (per|a|an|/) <unit>`
static NUMERIC_PER_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(\d{1,6})(?:\s*-\s*(\d{1,6}))?\s*(?:x|times?)?\s*(?:/|\bper\b|\ban?\b)\s*(year|yr|month|mo|week|wk|day)s?\b",
    )
    .expect("numeric frequency pattern is valid")
});

/// `every <n> <unit>`
static EVERY_N_UNITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bevery\s+(\d{1,6})\s*(day|week|month|year|yr)s?\b")
        .expect("interval frequency pattern is valid")
});

/// A bare count such as `"4x"` or `"4 times"`, taken as per year.
static BARE_COUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,6})\s*(?:x|times?)?$").expect("bare count pattern is valid")
});

static QUARTERLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"quarterly|every\s+3\s+months").expect("quarterly pattern is valid"));
static BIWEEKLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"bi-?weekly|every\s+other\s+week|every\s+2\s+weeks").expect("biweekly pattern is valid")
});
static TWICE_WEEKLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"twice\s+(?:a\s+|per\s+)?week").expect("twice weekly pattern is valid"));
static TWICE_MONTHLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"twice\s+(?:a\s+|per\s+)?month").expect("twice monthly pattern is valid"));
static SEMI_ANNUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"semi-?annual|twice\s+(?:a|per)\s+year").expect("semi-annual pattern is valid")
});
static DAILY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"daily|every\s+day|each\s+day|once\s+(?:a|per)\s+day").expect("daily pattern is valid")
});
static WEEKLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"weekly|once\s+(?:a|per)\s+week").expect("weekly pattern is valid"));
static MONTHLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"monthly|once\s+(?:a|per)\s+month").expect("monthly pattern is valid"));
static ANNUAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"annual|yearly|once\s+(?:a|per)\s+year").expect("annual pattern is valid")
});

/// Structured result of parsing a frequency expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyDetails {
    pub low_frequency_per_year: Decimal,
    pub high_frequency_per_year: Decimal,
    pub is_one_time: bool,
    /// The text as given by the caller.
    pub original: String,
    /// False when the defaults were used because the text was empty.
    pub valid: bool,
    /// True when the 1/1 fallback was applied.
    pub used_default: bool,
    pub warnings: Vec<String>,
}

impl FrequencyDetails {
    /// A recurring frequency with the given bounds.
    pub fn recurring(low: Decimal, high: Decimal) -> Self {
        Self {
            low_frequency_per_year: low,
            high_frequency_per_year: high,
            is_one_time: false,
            original: String::new(),
            valid: true,
            used_default: false,
            warnings: Vec::new(),
        }
    }

    /// The one-time marker. Both counts are zero.
    pub fn one_time() -> Self {
        Self {
            low_frequency_per_year: Decimal::ZERO,
            high_frequency_per_year: Decimal::ZERO,
            is_one_time: true,
            original: String::new(),
            valid: true,
            used_default: false,
            warnings: Vec::new(),
        }
    }

    fn defaulted(original: &str, valid: bool, warning: String) -> Self {
        Self {
            low_frequency_per_year: Decimal::ONE,
            high_frequency_per_year: Decimal::ONE,
            is_one_time: false,
            original: original.to_string(),
            valid,
            used_default: true,
            warnings: vec![warning],
        }
    }

    /// Midpoint of the low and high counts.
    pub fn mean_per_year(&self) -> Decimal {
        mean(self.low_frequency_per_year, self.high_frequency_per_year)
    }
}

/// True for one-time expressions: "one time", "one-time", "onetime", or
/// "once" when it is not part of "once a ..." / "once per ...".
pub fn is_one_time_frequency(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("one time")
        || lower.contains("one-time")
        || lower.contains("onetime")
        || (lower.contains("once") && !lower.contains("once a") && !lower.contains("once per"))
}

/// Parses a free-text frequency into occurrences per year.
pub fn parse_frequency(text: &str) -> FrequencyDetails {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        tracing::warn!("Empty frequency, using default of once per year");
        return FrequencyDetails::defaulted(
            text,
            false,
            "Frequency is empty; defaulted to 1 time per year".to_string(),
        );
    }

    if is_one_time_frequency(trimmed) {
        tracing::debug!(frequency = %trimmed, "Detected one-time frequency");
        return FrequencyDetails {
            original: text.to_string(),
            ..FrequencyDetails::one_time()
        };
    }

    let lower = trimmed.to_lowercase();
    let Some((low, high)) = match_patterns(&lower) else {
        tracing::warn!(frequency = %trimmed, "No frequency pattern matched, using default");
        return FrequencyDetails::defaulted(
            text,
            true,
            format!("Unrecognized frequency '{}'; defaulted to 1 time per year", trimmed),
        );
    };

    let mut details = FrequencyDetails {
        original: text.to_string(),
        ..FrequencyDetails::recurring(low, high)
    };

    if high < low {
        details.low_frequency_per_year = high;
        details.high_frequency_per_year = low;
        details.warnings.push(format!(
            "Frequency range {}-{} was reversed; using {}-{}",
            low, high, high, low
        ));
    }
    if details.low_frequency_per_year > Decimal::ZERO
        && details.high_frequency_per_year
            > details.low_frequency_per_year * Decimal::from(3)
    {
        details.warnings.push(format!(
            "Wide frequency range: {} to {} times per year",
            details.low_frequency_per_year, details.high_frequency_per_year
        ));
    }
    for warning in &details.warnings {
        tracing::warn!(frequency = %trimmed, "{}", warning);
    }

    tracing::debug!(
        frequency = %trimmed,
        low = %details.low_frequency_per_year,
        high = %details.high_frequency_per_year,
        "Parsed frequency"
    );
    details
}

fn match_patterns(lower: &str) -> Option<(Decimal, Decimal)> {
    if let Some(caps) = NUMERIC_PER_UNIT.captures(lower) {
        let low = parse_count(caps.get(1)?.as_str())?;
        let high = match caps.get(2) {
            Some(m) => parse_count(m.as_str())?,
            None => low,
        };
        let per_year = unit_per_year(caps.get(3)?.as_str())?;
        return Some((round2(low * per_year), round2(high * per_year)));
    }

    let fixed = |n: u32| Some((Decimal::from(n), Decimal::from(n)));

    if QUARTERLY.is_match(lower) {
        return fixed(4);
    }
    if BIWEEKLY.is_match(lower) {
        return fixed(26);
    }
    if TWICE_WEEKLY.is_match(lower) {
        return fixed(104);
    }
    if TWICE_MONTHLY.is_match(lower) {
        return fixed(24);
    }
    if SEMI_ANNUAL.is_match(lower) {
        return fixed(2);
    }
    if DAILY.is_match(lower) {
        return fixed(365);
    }

    if let Some(caps) = EVERY_N_UNITS.captures(lower) {
        let interval = parse_count(caps.get(1)?.as_str())?;
        if interval.is_zero() {
            return None;
        }
        let per_year = unit_per_year(caps.get(2)?.as_str())?;
        let count = round2(per_year / interval);
        return Some((count, count));
    }

    if WEEKLY.is_match(lower) {
        return fixed(52);
    }
    if MONTHLY.is_match(lower) {
        return fixed(12);
    }
    if ANNUAL.is_match(lower) {
        return fixed(1);
    }

    if let Some(caps) = BARE_COUNT.captures(lower) {
        let count = parse_count(caps.get(1)?.as_str())?;
        return Some((count, count));
    }

    None
}

fn parse_count(digits: &str) -> Option<Decimal> {
    digits.parse::<u32>().ok().map(Decimal::from)
}

fn unit_per_year(unit: &str) -> Option<Decimal> {
    match unit {
        "year" | "yr" => Some(Decimal::ONE),
        "month" | "mo" => Some(MONTHS_PER_YEAR),
        "week" | "wk" => Some(WEEKS_PER_YEAR),
        "day" => Some(DAYS_PER_YEAR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn bounds(text: &str) -> (Decimal, Decimal) {
        let parsed = parse_frequency(text);
        (parsed.low_frequency_per_year, parsed.high_frequency_per_year)
    }

    #[test]
    fn parses_yearly_range() {
        assert_eq!(bounds("3-5x per year"), (d("3"), d("5")));
        assert_eq!(bounds("3-5 times a year"), (d("3"), d("5")));
        assert_eq!(bounds("2 - 4x/year"), (d("2"), d("4")));
    }

    #[test]
    fn parses_single_yearly_count() {
        assert_eq!(bounds("4x per year"), (d("4"), d("4")));
        assert_eq!(bounds("1-1x per year 29 years"), (d("1"), d("1")));
    }

    #[test]
    fn parses_monthly_counts() {
        assert_eq!(bounds("2x per month"), (d("24"), d("24")));
        assert_eq!(bounds("1-2 times per month"), (d("12"), d("24")));
    }

    #[test]
    fn parses_weekly_counts_with_fractional_weeks() {
        assert_eq!(bounds("3 times per week"), (d("156.43"), d("156.43")));
        assert_eq!(bounds("1x/week"), (d("52.14"), d("52.14")));
    }

    #[test]
    fn parses_daily_counts() {
        assert_eq!(bounds("2x per day"), (d("730"), d("730")));
        assert_eq!(bounds("daily"), (d("365"), d("365")));
    }

    #[test]
    fn parses_keyword_frequencies() {
        assert_eq!(bounds("Quarterly"), (d("4"), d("4")));
        assert_eq!(bounds("biweekly"), (d("26"), d("26")));
        assert_eq!(bounds("every other week"), (d("26"), d("26")));
        assert_eq!(bounds("twice a week"), (d("104"), d("104")));
        assert_eq!(bounds("twice a month"), (d("24"), d("24")));
        assert_eq!(bounds("weekly"), (d("52"), d("52")));
        assert_eq!(bounds("monthly"), (d("12"), d("12")));
        assert_eq!(bounds("once a year"), (d("1"), d("1")));
    }

    #[test]
    fn semi_annual_is_not_read_as_annual() {
        assert_eq!(bounds("semi-annual"), (d("2"), d("2")));
        assert_eq!(bounds("semiannual"), (d("2"), d("2")));
        assert_eq!(bounds("annually"), (d("1"), d("1")));
    }

    #[test]
    fn parses_every_n_intervals() {
        assert_eq!(bounds("every 3 days"), (d("121.67"), d("121.67")));
        assert_eq!(bounds("every 5 years"), (d("0.2"), d("0.2")));
        assert_eq!(bounds("every 6 months"), (d("2"), d("2")));
    }

    #[test]
    fn every_zero_days_falls_back_to_default() {
        let parsed = parse_frequency("every 0 days");
        assert_eq!(parsed.low_frequency_per_year, Decimal::ONE);
        assert!(parsed.used_default);
    }

    #[test]
    fn parses_bare_count_as_per_year() {
        assert_eq!(bounds("4x"), (d("4"), d("4")));
        assert_eq!(bounds("6 times"), (d("6"), d("6")));
    }

    #[test]
    fn detects_one_time_items() {
        for text in ["one-time", "One time purchase", "onetime", "once"] {
            let parsed = parse_frequency(text);
            assert!(parsed.is_one_time, "{} should be one-time", text);
            assert_eq!(parsed.low_frequency_per_year, Decimal::ZERO);
            assert_eq!(parsed.high_frequency_per_year, Decimal::ZERO);
        }
    }

    #[test]
    fn once_per_period_is_recurring() {
        assert!(!is_one_time_frequency("once a week"));
        assert!(!is_one_time_frequency("once per month"));
        assert_eq!(bounds("once a week"), (d("52"), d("52")));
    }

    #[test]
    fn empty_text_is_invalid_with_default() {
        let parsed = parse_frequency("   ");
        assert!(!parsed.valid);
        assert_eq!(bounds(""), (Decimal::ONE, Decimal::ONE));
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn unrecognized_text_defaults_with_warning() {
        let parsed = parse_frequency("as needed");
        assert!(parsed.valid);
        assert!(parsed.used_default);
        assert_eq!(parsed.low_frequency_per_year, Decimal::ONE);
        assert_eq!(parsed.original, "as needed");
    }

    #[test]
    fn reversed_range_is_swapped() {
        let parsed = parse_frequency("5-3x per year");
        assert_eq!(parsed.low_frequency_per_year, d("3"));
        assert_eq!(parsed.high_frequency_per_year, d("5"));
        assert!(!parsed.warnings.is_empty());
    }

    #[test]
    fn wide_range_warns() {
        let parsed = parse_frequency("1-10x per year");
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.mean_per_year(), d("5.5"));
    }

    #[test]
    fn overlong_count_is_not_truncated() {
        let parsed = parse_frequency("1234567x per year");
        assert!(parsed.used_default);
        assert_eq!(bounds("1234567x per year"), (Decimal::ONE, Decimal::ONE));
        assert_eq!(bounds("999999x per year"), (d("999999"), d("999999")));
    }
}
