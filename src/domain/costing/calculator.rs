//! Cost range calculator.
//!
//! Combines a base rate, geographic factors, optional fee schedule bands, a
//! parsed frequency and a duration into per-occurrence, annual and lifetime
//! figures. Every monetary boundary is rounded to cents with banker's
//! rounding, so intermediate rounding is part of the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    determine_duration, multi_source_range, parse_frequency, CostRange, DurationContext,
    DurationDetails, FeeSchedule, FrequencyDetails, GeoFactors,
};
use crate::domain::foundation::round2;

/// Everything needed to price one line item.
#[derive(Debug, Clone, PartialEq)]
pub struct CostInputs {
    pub base_rate: Decimal,
    pub geo_factors: GeoFactors,
    pub fee_schedule: Option<FeeSchedule>,
    /// Quoted prices. When present they replace the base rate and bands.
    pub cost_sources: Vec<Decimal>,
    pub frequency: String,
    pub duration: DurationContext,
    /// Forces one-time pricing regardless of the frequency text.
    pub is_one_time: bool,
}

impl CostInputs {
    pub fn new(base_rate: Decimal, frequency: impl Into<String>) -> Self {
        Self {
            base_rate,
            geo_factors: GeoFactors::NEUTRAL,
            fee_schedule: None,
            cost_sources: Vec::new(),
            frequency: frequency.into(),
            duration: DurationContext::default(),
            is_one_time: false,
        }
    }

    pub fn with_geo_factors(mut self, geo_factors: GeoFactors) -> Self {
        self.geo_factors = geo_factors;
        self
    }

    pub fn with_fee_schedule(mut self, fee_schedule: Option<FeeSchedule>) -> Self {
        self.fee_schedule = fee_schedule;
        self
    }

    pub fn with_cost_sources(mut self, cost_sources: Vec<Decimal>) -> Self {
        self.cost_sources = cost_sources;
        self
    }

    pub fn with_duration(mut self, duration: DurationContext) -> Self {
        self.duration = duration;
        self
    }

    pub fn one_time(mut self, is_one_time: bool) -> Self {
        self.is_one_time = is_one_time;
        self
    }
}

/// Derived costs for a line item.
///
/// `low`, `average` and `high` describe the lifetime range; `annual` and
/// `lifetime` are the average figures. One-time items have `annual == 0`
/// and a lifetime equal to the per-occurrence average.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedCosts {
    pub annual: Decimal,
    pub lifetime: Decimal,
    pub low: Decimal,
    pub average: Decimal,
    pub high: Decimal,
    pub is_one_time: bool,
    pub per_occurrence: CostRange,
    pub annual_range: CostRange,
    pub frequency: FrequencyDetails,
    pub duration: Option<DurationDetails>,
    pub warnings: Vec<String>,
}

impl CalculatedCosts {
    /// Lifetime range as a [`CostRange`].
    pub fn lifetime_range(&self) -> CostRange {
        CostRange {
            low: self.low,
            average: self.average,
            high: self.high,
        }
    }
}

/// Per-occurrence cost range.
///
/// Fee schedule bands take precedence. Without bands the base rate is
/// scaled by the mean geographic factor and the range collapses to a point.
pub fn adjusted_cost_range(
    base_rate: Decimal,
    geo_factors: &GeoFactors,
    fee_schedule: Option<&FeeSchedule>,
) -> CostRange {
    if let Some(range) = fee_schedule.and_then(|schedule| schedule.adjusted_range(geo_factors)) {
        return range;
    }
    CostRange::uniform(base_rate.saturating_mul(geo_factors.average()))
}

/// Per-occurrence range for the inputs: quoted prices first, then the
/// geo-adjusted fee bands or base rate. Negative base rates count as zero.
pub(crate) fn per_occurrence_range(inputs: &CostInputs, warnings: &mut Vec<String>) -> CostRange {
    if !inputs.cost_sources.is_empty() {
        return multi_source_range(&inputs.cost_sources);
    }

    let base_rate = if inputs.base_rate < Decimal::ZERO {
        warnings.push(format!("Negative base rate {} treated as 0", inputs.base_rate));
        Decimal::ZERO
    } else {
        inputs.base_rate
    };

    let range = adjusted_cost_range(base_rate, &inputs.geo_factors, inputs.fee_schedule.as_ref());
    if range.low.is_zero() && range.high.is_zero() {
        warnings.push("Per-occurrence cost is zero".to_string());
    }
    range
}

/// Annual range for a recurring item: low by low frequency, high by high
/// frequency, average by the mean frequency. Products saturate at
/// `Decimal::MAX`.
pub fn annualize(per_occurrence: &CostRange, frequency: &FrequencyDetails) -> CostRange {
    CostRange {
        low: round2(per_occurrence.low.saturating_mul(frequency.low_frequency_per_year)),
        average: round2(per_occurrence.average.saturating_mul(frequency.mean_per_year())),
        high: round2(per_occurrence.high.saturating_mul(frequency.high_frequency_per_year)),
    }
}

/// Lifetime range for a recurring item, paired the same way as [`annualize`].
pub fn project_lifetime(annual: &CostRange, duration: &DurationDetails) -> CostRange {
    CostRange {
        low: round2(annual.low.saturating_mul(duration.low_duration_years)),
        average: round2(annual.average.saturating_mul(duration.mean_years())),
        high: round2(annual.high.saturating_mul(duration.high_duration_years)),
    }
}

/// Prices line items.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator;

impl CostCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes all derived costs. Pure: identical inputs give identical
    /// outputs.
    pub fn calculate(&self, inputs: &CostInputs) -> CalculatedCosts {
        let mut warnings = Vec::new();

        let frequency = parse_frequency(&inputs.frequency);
        warnings.extend(frequency.warnings.iter().cloned());

        let per_occurrence = per_occurrence_range(inputs, &mut warnings);

        let is_one_time = inputs.is_one_time || frequency.is_one_time;
        if is_one_time {
            tracing::debug!(
                average = %per_occurrence.average,
                "Calculated one-time item costs"
            );
            return CalculatedCosts {
                annual: Decimal::ZERO,
                lifetime: per_occurrence.average,
                low: per_occurrence.low,
                average: per_occurrence.average,
                high: per_occurrence.high,
                is_one_time: true,
                per_occurrence,
                annual_range: CostRange::ZERO,
                frequency,
                duration: None,
                warnings,
            };
        }

        let duration = determine_duration(&inputs.frequency, &inputs.duration);
        warnings.extend(duration.warnings.iter().cloned());

        let annual_range = annualize(&per_occurrence, &frequency);
        let lifetime_range = project_lifetime(&annual_range, &duration);

        tracing::debug!(
            annual = %annual_range.average,
            lifetime = %lifetime_range.average,
            low = %lifetime_range.low,
            high = %lifetime_range.high,
            "Calculated recurring item costs"
        );

        CalculatedCosts {
            annual: annual_range.average,
            lifetime: lifetime_range.average,
            low: lifetime_range.low,
            average: lifetime_range.average,
            high: lifetime_range.high,
            is_one_time: false,
            per_occurrence,
            annual_range,
            frequency,
            duration: Some(duration),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::costing::PercentileBands;
    use proptest::prelude::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn bands(p50: &str, p75: &str) -> PercentileBands {
        PercentileBands::new(Some(d(p50)), Some(d(p75)), None)
    }

    #[test]
    fn geo_adjusted_base_rate_example() {
        let inputs = CostInputs::new(d("100"), "1x per year 1 year")
            .with_geo_factors(GeoFactors::manual(d("0.982"), d("1.0")).unwrap());

        let costs = CostCalculator::new().calculate(&inputs);

        assert_eq!(inputs.geo_factors.average(), d("0.991"));
        assert_eq!(costs.per_occurrence.average, d("99.10"));
        assert_eq!(costs.annual, d("99.10"));
        assert_eq!(costs.lifetime, d("99.10"));
        assert!(!costs.is_one_time);
    }

    #[test]
    fn missing_geo_factors_leave_base_rate_unchanged() {
        let inputs = CostInputs::new(d("250"), "1x per year 1 year");
        let costs = CostCalculator::new().calculate(&inputs);
        assert_eq!(costs.per_occurrence, CostRange::uniform(d("250")));
        assert_eq!(costs.annual, d("250"));
    }

    #[test]
    fn recurring_range_uses_frequency_and_duration_bounds() {
        let schedule = FeeSchedule::new("99213", bands("100", "200"), PercentileBands::default());
        let inputs = CostInputs::new(Decimal::ZERO, "2-4x per year 10-20 years")
            .with_fee_schedule(Some(schedule));

        let costs = CostCalculator::new().calculate(&inputs);

        assert_eq!(costs.per_occurrence.low, d("100"));
        assert_eq!(costs.per_occurrence.average, d("150"));
        assert_eq!(costs.annual_range.low, d("200"));
        assert_eq!(costs.annual_range.average, d("450"));
        assert_eq!(costs.annual_range.high, d("800"));
        assert_eq!(costs.low, d("2000"));
        assert_eq!(costs.average, d("6750"));
        assert_eq!(costs.high, d("16000"));
        assert_eq!(costs.annual, d("450"));
        assert_eq!(costs.lifetime, d("6750"));
    }

    #[test]
    fn one_time_item_has_zero_annual_and_averaged_lifetime() {
        let schedule = FeeSchedule::new("27447", PercentileBands::default(), bands("1000", "1500"));
        let inputs = CostInputs::new(Decimal::ZERO, "one-time").with_fee_schedule(Some(schedule));

        let costs = CostCalculator::new().calculate(&inputs);

        assert!(costs.is_one_time);
        assert_eq!(costs.annual, Decimal::ZERO);
        assert_eq!(costs.lifetime, d("1250"));
        assert_eq!(costs.low, d("1000"));
        assert_eq!(costs.high, d("1500"));
        assert!(costs.duration.is_none());
    }

    #[test]
    fn one_time_flag_overrides_recurring_text() {
        let inputs = CostInputs::new(d("80"), "2x per year").one_time(true);
        let costs = CostCalculator::new().calculate(&inputs);
        assert!(costs.is_one_time);
        assert_eq!(costs.annual, Decimal::ZERO);
        assert_eq!(costs.lifetime, d("80"));
    }

    #[test]
    fn unparseable_frequency_uses_default_and_reports_warning() {
        let inputs = CostInputs::new(d("50"), "as tolerated").with_duration(
            DurationContext::default().with_age_range(Some(40), Some(42)),
        );
        let costs = CostCalculator::new().calculate(&inputs);
        assert!(costs.frequency.used_default);
        assert_eq!(costs.annual, d("50"));
        assert_eq!(costs.lifetime, d("100"));
        assert!(!costs.warnings.is_empty());
    }

    #[test]
    fn quoted_prices_replace_base_rate() {
        let inputs = CostInputs::new(d("999"), "1x per year 2 years")
            .with_cost_sources(vec![d("100"), d("120"), d("110")])
            .with_geo_factors(GeoFactors::manual(d("2"), d("2")).unwrap());
        let costs = CostCalculator::new().calculate(&inputs);
        assert_eq!(costs.per_occurrence.low, d("100"));
        assert_eq!(costs.per_occurrence.average, d("110"));
        assert_eq!(costs.per_occurrence.high, d("120"));
        assert_eq!(costs.lifetime, d("220"));
    }

    #[test]
    fn negative_base_rate_is_treated_as_zero() {
        let costs = CostCalculator::new().calculate(&CostInputs::new(d("-5"), "1x per year"));
        assert_eq!(costs.annual, Decimal::ZERO);
        assert!(costs.lifetime_range().is_ordered());
    }

    #[test]
    fn extreme_inputs_saturate_instead_of_overflowing() {
        let huge = d("10000000000000000000000");
        let costs = CostCalculator::new().calculate(&CostInputs::new(huge, "999999x per day 100 years"));

        assert_eq!(costs.per_occurrence.average, huge);
        assert_eq!(costs.annual, Decimal::MAX);
        assert_eq!(costs.high, Decimal::MAX);
        assert!(costs.lifetime_range().is_ordered());
    }

    fn frequency_text() -> impl Strategy<Value = String> {
        prop_oneof![
            (1u32..20, 0u32..20).prop_map(|(a, b)| format!("{}-{}x per year", a, a + b)),
            (1u32..7).prop_map(|n| format!("{}x per week", n)),
            (1u32..4).prop_map(|n| format!("{} times per month", n)),
            (1u32..50, 1u32..60).prop_map(|(n, y)| format!("{}x per year {} years", n, y)),
            Just("one-time".to_string()),
            Just("quarterly".to_string()),
            Just("daily".to_string()),
            Just("whenever".to_string()),
        ]
    }

    fn cents(max: i64) -> impl Strategy<Value = Decimal> {
        (0i64..max).prop_map(|c| Decimal::new(c, 2))
    }

    fn factor() -> impl Strategy<Value = Decimal> {
        (1i64..500).prop_map(|f| Decimal::new(f, 2))
    }

    prop_compose! {
        fn cost_inputs()(
            base in cents(5_000_000),
            mfr in factor(),
            pfr in factor(),
            mfu in proptest::option::of((cents(100_000), cents(100_000))),
            pfr_bands in proptest::option::of((cents(100_000), cents(100_000))),
            text in frequency_text(),
            start in 0u32..80,
            span in 0u32..40,
            life_expectancy in proptest::option::of(1i64..80),
        ) -> CostInputs {
            let to_bands = |pair: Option<(Decimal, Decimal)>| match pair {
                Some((a, b)) => PercentileBands::new(Some(a), Some(b), None),
                None => PercentileBands::default(),
            };
            let schedule = FeeSchedule::new("00000", to_bands(mfu), to_bands(pfr_bands));
            CostInputs::new(base, text)
                .with_geo_factors(GeoFactors::manual(mfr, pfr).unwrap())
                .with_fee_schedule(Some(schedule))
                .with_duration(
                    DurationContext::default()
                        .with_age_range(Some(start), if span % 3 == 0 { None } else { Some(start + span) })
                        .with_life_expectancy(life_expectancy.map(Decimal::from)),
                )
        }
    }

    proptest! {
        #[test]
        fn cost_ranges_are_ordered(inputs in cost_inputs()) {
            let costs = CostCalculator::new().calculate(&inputs);
            prop_assert!(costs.per_occurrence.is_ordered());
            prop_assert!(costs.annual_range.is_ordered());
            prop_assert!(costs.lifetime_range().is_ordered());
        }

        #[test]
        fn calculation_is_idempotent(inputs in cost_inputs()) {
            let calculator = CostCalculator::new();
            prop_assert_eq!(calculator.calculate(&inputs), calculator.calculate(&inputs));
        }

        #[test]
        fn one_time_items_have_zero_annual(inputs in cost_inputs()) {
            let costs = CostCalculator::new().calculate(&inputs.one_time(true));
            prop_assert_eq!(costs.annual, Decimal::ZERO);
            prop_assert_eq!(costs.lifetime, costs.per_occurrence.average);
        }

        #[test]
        fn monetary_values_have_at_most_two_decimals(inputs in cost_inputs()) {
            let costs = CostCalculator::new().calculate(&inputs);
            for value in [costs.annual, costs.lifetime, costs.low, costs.high, costs.average] {
                prop_assert!(value.scale() <= 2);
            }
        }
    }
}
