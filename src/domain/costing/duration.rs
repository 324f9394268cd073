//! Duration determination for recurring items.
//!
//! Precedence: an explicit duration in the frequency text, then the item's
//! age range, then the evaluee's remaining life expectancy, then the 1..30
//! year default. Every result is clamped to `[1, max_years]`.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::mean;

/// Default low bound when nothing else is known.
pub const DEFAULT_LOW_YEARS: Decimal = Decimal::ONE;
/// Default high bound when nothing else is known.
pub const DEFAULT_HIGH_YEARS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);
/// Default upper clamp.
pub const DEFAULT_MAX_YEARS: Decimal = Decimal::ONE_HUNDRED;

/// `N-M years`, optionally preceded by "for".
static RANGE_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,3})\s*-\s*(\d{1,3})\s*(?:years?|yrs?)\b").expect("duration range pattern is valid")
});

/// `N years`. The optional `every` capture lets interval frequencies be skipped.
static SINGLE_YEARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\bevery\s+)?(\d{1,3})\s*(?:years?|yrs?)\b").expect("duration pattern is valid")
});

/// Where a duration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationSource {
    Frequency,
    AgeRange,
    LifeExpectancy,
    Default,
}

/// Low/high duration in years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationDetails {
    pub low_duration_years: Decimal,
    pub high_duration_years: Decimal,
    pub source: DurationSource,
    pub warnings: Vec<String>,
}

impl DurationDetails {
    /// Midpoint of the low and high durations.
    pub fn mean_years(&self) -> Decimal {
        mean(self.low_duration_years, self.high_duration_years)
    }
}

/// Facts about the evaluee and the item used when the text carries no
/// explicit duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationContext {
    /// Remaining life expectancy in years.
    pub life_expectancy: Option<Decimal>,
    pub start_age: Option<u32>,
    pub end_age: Option<u32>,
    pub max_years: Decimal,
}

impl Default for DurationContext {
    fn default() -> Self {
        Self {
            life_expectancy: None,
            start_age: None,
            end_age: None,
            max_years: DEFAULT_MAX_YEARS,
        }
    }
}

impl DurationContext {
    pub fn with_age_range(mut self, start_age: Option<u32>, end_age: Option<u32>) -> Self {
        self.start_age = start_age;
        self.end_age = end_age;
        self
    }

    pub fn with_life_expectancy(mut self, life_expectancy: Option<Decimal>) -> Self {
        self.life_expectancy = life_expectancy;
        self
    }
}

/// Determines how many years a recurring item lasts.
pub fn determine_duration(frequency_text: &str, ctx: &DurationContext) -> DurationDetails {
    let lower = frequency_text.to_lowercase();
    let mut warnings = Vec::new();

    let (low, high, source) = if let Some((low, high)) = duration_from_text(&lower) {
        (low, high, DurationSource::Frequency)
    } else if let (Some(start), Some(end)) = (ctx.start_age, ctx.end_age) {
        let years = Decimal::from(end) - Decimal::from(start);
        (years, years, DurationSource::AgeRange)
    } else if let Some(life_expectancy) = ctx.life_expectancy.filter(|le| *le > Decimal::ZERO) {
        let half = (life_expectancy / Decimal::TWO).floor().max(Decimal::ONE);
        (half, life_expectancy, DurationSource::LifeExpectancy)
    } else {
        warnings.push(format!(
            "No duration information; defaulted to {}-{} years",
            DEFAULT_LOW_YEARS, DEFAULT_HIGH_YEARS
        ));
        (DEFAULT_LOW_YEARS, DEFAULT_HIGH_YEARS, DurationSource::Default)
    };

    let (low, high) = if high < low {
        warnings.push(format!("Duration range {}-{} was reversed", low, high));
        (high, low)
    } else {
        (low, high)
    };

    let max_years = ctx.max_years.max(Decimal::ONE);
    let clamp = |v: Decimal| v.max(Decimal::ONE).min(max_years);
    let (clamped_low, clamped_high) = (clamp(low), clamp(high));
    if clamped_low != low || clamped_high != high {
        warnings.push(format!(
            "Duration {}-{} years clamped to {}-{}",
            low, high, clamped_low, clamped_high
        ));
    }

    for warning in &warnings {
        tracing::warn!(frequency = %frequency_text, "{}", warning);
    }
    tracing::debug!(
        source = ?source,
        low = %clamped_low,
        high = %clamped_high,
        "Determined duration"
    );

    DurationDetails {
        low_duration_years: clamped_low,
        high_duration_years: clamped_high,
        source,
        warnings,
    }
}

fn duration_from_text(lower: &str) -> Option<(Decimal, Decimal)> {
    if let Some(caps) = RANGE_YEARS.captures(lower) {
        let low = caps.get(1)?.as_str().parse::<u32>().ok()?;
        let high = caps.get(2)?.as_str().parse::<u32>().ok()?;
        return Some((Decimal::from(low), Decimal::from(high)));
    }
    SINGLE_YEARS
        .captures_iter(lower)
        .find(|caps| caps.get(1).is_none())
        .and_then(|caps| caps.get(2)?.as_str().parse::<u32>().ok())
        .map(|years| (Decimal::from(years), Decimal::from(years)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn trailing_years_suffix_wins() {
        let ctx = DurationContext::default().with_age_range(Some(40), Some(50));
        let details = determine_duration("1-1x per year 29 years", &ctx);
        assert_eq!(details.source, DurationSource::Frequency);
        assert_eq!(details.low_duration_years, d("29"));
        assert_eq!(details.high_duration_years, d("29"));
    }

    #[test]
    fn parses_range_and_abbreviated_suffixes() {
        let ctx = DurationContext::default();
        let details = determine_duration("2x per year for 5-10 yrs", &ctx);
        assert_eq!(details.low_duration_years, d("5"));
        assert_eq!(details.high_duration_years, d("10"));

        let details = determine_duration("monthly 3 yrs", &ctx);
        assert_eq!(details.low_duration_years, d("3"));
    }

    #[test]
    fn every_n_years_is_not_a_duration() {
        let ctx = DurationContext::default().with_age_range(Some(50), Some(70));
        let details = determine_duration("every 5 years", &ctx);
        assert_eq!(details.source, DurationSource::AgeRange);
        assert_eq!(details.low_duration_years, d("20"));
    }

    #[test]
    fn age_range_used_without_text_duration() {
        let ctx = DurationContext::default().with_age_range(Some(45), Some(74));
        let details = determine_duration("1x per year", &ctx);
        assert_eq!(details.source, DurationSource::AgeRange);
        assert_eq!(details.low_duration_years, d("29"));
        assert!(details.warnings.is_empty());
    }

    #[test]
    fn zero_length_age_range_clamps_to_one_year() {
        let ctx = DurationContext::default().with_age_range(Some(60), Some(60));
        let details = determine_duration("1x per year", &ctx);
        assert_eq!(details.low_duration_years, Decimal::ONE);
        assert_eq!(details.warnings.len(), 1);
    }

    #[test]
    fn long_durations_clamp_to_max() {
        let ctx = DurationContext::default();
        let details = determine_duration("1x per year 150 years", &ctx);
        assert_eq!(details.high_duration_years, d("100"));
    }

    #[test]
    fn life_expectancy_gives_half_to_full_range() {
        let ctx = DurationContext::default().with_life_expectancy(Some(d("35.5")));
        let details = determine_duration("4x per year", &ctx);
        assert_eq!(details.source, DurationSource::LifeExpectancy);
        assert_eq!(details.low_duration_years, d("17"));
        assert_eq!(details.high_duration_years, d("35.5"));
        assert_eq!(details.mean_years(), d("26.25"));
    }

    #[test]
    fn short_life_expectancy_keeps_one_year_floor() {
        let ctx = DurationContext::default().with_life_expectancy(Some(d("1.5")));
        let details = determine_duration("daily", &ctx);
        assert_eq!(details.low_duration_years, Decimal::ONE);
        assert_eq!(details.high_duration_years, d("1.5"));
    }

    #[test]
    fn falls_back_to_default_range() {
        let details = determine_duration("quarterly", &DurationContext::default());
        assert_eq!(details.source, DurationSource::Default);
        assert_eq!(details.low_duration_years, DEFAULT_LOW_YEARS);
        assert_eq!(details.high_duration_years, DEFAULT_HIGH_YEARS);
        assert_eq!(details.warnings.len(), 1);
    }
}
