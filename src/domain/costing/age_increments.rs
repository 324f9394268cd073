//! Age-banded pricing.
//!
//! One line item may change frequency over the evaluee's life, e.g. weekly
//! therapy from 10 to 18 and monthly afterwards. Each band is priced over
//! its own span of years and the bands are summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    annualize, per_occurrence_range, parse_frequency, CalculatedCosts, CostCalculator, CostInputs,
    CostRange, DurationDetails, DurationSource, FrequencyDetails,
};
use crate::domain::foundation::{round2, ValidationError};

/// Oldest age accepted for a band boundary.
pub const MAX_AGE: u32 = 120;

/// A band of ages `[start_age, end_age)` with its own frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeIncrement {
    pub start_age: u32,
    pub end_age: u32,
    pub frequency: String,
    #[serde(default)]
    pub is_one_time: bool,
}

impl AgeIncrement {
    pub fn new(start_age: u32, end_age: u32, frequency: impl Into<String>) -> Self {
        Self {
            start_age,
            end_age,
            frequency: frequency.into(),
            is_one_time: false,
        }
    }

    /// Years covered by the band; zero for inverted bands.
    pub fn years(&self) -> u32 {
        self.end_age.saturating_sub(self.start_age)
    }
}

/// Checks band boundaries and overlaps.
///
/// Returns warnings for gaps between consecutive bands, which are allowed.
pub fn validate_age_increments(increments: &[AgeIncrement]) -> Result<Vec<String>, ValidationError> {
    let mut sorted: Vec<&AgeIncrement> = increments.iter().collect();
    sorted.sort_by_key(|inc| inc.start_age);

    for inc in &sorted {
        if inc.end_age > MAX_AGE {
            return Err(ValidationError::out_of_range("age_increments.end_age", 0, MAX_AGE, inc.end_age));
        }
        if inc.start_age >= inc.end_age {
            return Err(ValidationError::invalid_format(
                "age_increments",
                format!("band {}-{} must end after it starts", inc.start_age, inc.end_age),
            ));
        }
    }

    let mut warnings = Vec::new();
    for pair in sorted.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if prev.end_age > next.start_age {
            return Err(ValidationError::invalid_format(
                "age_increments",
                format!(
                    "bands {}-{} and {}-{} overlap",
                    prev.start_age, prev.end_age, next.start_age, next.end_age
                ),
            ));
        }
        if prev.end_age < next.start_age {
            warnings.push(format!("Gap between age {} and {}", prev.end_age, next.start_age));
        }
    }
    Ok(warnings)
}

/// Total years covered by the bands, ignoring inverted ones.
pub fn total_increment_years(increments: &[AgeIncrement]) -> u32 {
    increments.iter().map(AgeIncrement::years).sum()
}

impl CostCalculator {
    /// Prices an item split into age bands.
    ///
    /// Each recurring band contributes its annual figures times its span.
    /// One-time bands add the per-occurrence range once. The reported
    /// annual cost is the duration-weighted mean of recurring band annuals.
    /// With no bands this is [`CostCalculator::calculate`].
    pub fn calculate_with_age_increments(
        &self,
        inputs: &CostInputs,
        increments: &[AgeIncrement],
    ) -> CalculatedCosts {
        if increments.is_empty() {
            return self.calculate(inputs);
        }

        let mut warnings = Vec::new();
        let per_occurrence = per_occurrence_range(inputs, &mut warnings);

        let mut lifetime = CostRange::ZERO;
        let mut weighted_annual = Decimal::ZERO;
        let mut recurring_years = Decimal::ZERO;
        let mut total_years = Decimal::ZERO;
        let mut annual_low: Option<Decimal> = None;
        let mut annual_high: Option<Decimal> = None;
        let mut freq_low: Option<Decimal> = None;
        let mut freq_high: Option<Decimal> = None;

        for inc in increments {
            let years = Decimal::from(inc.years());
            if years.is_zero() {
                let warning = format!("Skipped age band {}-{} with no duration", inc.start_age, inc.end_age);
                tracing::warn!("{}", warning);
                warnings.push(warning);
                continue;
            }

            let frequency = parse_frequency(&inc.frequency);
            if !frequency.valid {
                let warning = format!("Skipped age band {}-{} with invalid frequency", inc.start_age, inc.end_age);
                tracing::warn!("{}", warning);
                warnings.push(warning);
                continue;
            }
            warnings.extend(frequency.warnings.iter().cloned());
            total_years += years;

            if inc.is_one_time || frequency.is_one_time {
                lifetime = lifetime.add(&per_occurrence);
                continue;
            }

            let annual = annualize(&per_occurrence, &frequency);
            lifetime = lifetime.add(&CostRange {
                low: round2(annual.low.saturating_mul(years)),
                average: round2(annual.average.saturating_mul(years)),
                high: round2(annual.high.saturating_mul(years)),
            });
            weighted_annual = weighted_annual.saturating_add(annual.average.saturating_mul(years));
            recurring_years += years;

            annual_low = Some(annual_low.map_or(annual.low, |v| v.min(annual.low)));
            annual_high = Some(annual_high.map_or(annual.high, |v| v.max(annual.high)));
            freq_low = Some(freq_low.map_or(frequency.low_frequency_per_year, |v| {
                v.min(frequency.low_frequency_per_year)
            }));
            freq_high = Some(freq_high.map_or(frequency.high_frequency_per_year, |v| {
                v.max(frequency.high_frequency_per_year)
            }));
        }

        let annual = if recurring_years.is_zero() {
            Decimal::ZERO
        } else {
            round2(weighted_annual / recurring_years)
        };
        let annual_range = CostRange {
            low: annual_low.unwrap_or(Decimal::ZERO).min(annual),
            average: annual,
            high: annual_high.unwrap_or(Decimal::ZERO).max(annual),
        };
        let is_one_time = recurring_years.is_zero() && !total_years.is_zero();

        let combined = if is_one_time {
            FrequencyDetails::one_time()
        } else {
            FrequencyDetails::recurring(
                freq_low.unwrap_or(Decimal::ZERO),
                freq_high.unwrap_or(Decimal::ZERO),
            )
        };
        let frequency = FrequencyDetails {
            original: inputs.frequency.clone(),
            ..combined
        };
        let total = total_years.max(Decimal::ONE);
        let duration = DurationDetails {
            low_duration_years: total,
            high_duration_years: total,
            source: DurationSource::AgeRange,
            warnings: Vec::new(),
        };

        tracing::debug!(
            bands = increments.len(),
            annual = %annual,
            lifetime = %lifetime.average,
            "Calculated age-banded item costs"
        );

        CalculatedCosts {
            annual,
            lifetime: lifetime.average,
            low: lifetime.low,
            average: lifetime.average,
            high: lifetime.high,
            is_one_time,
            per_occurrence,
            annual_range,
            frequency,
            duration: Some(duration),
            warnings,
        }
    }
}
