//! Costing domain - pure calculation pipeline for care plan line items.
//!
//! Parse a frequency, determine a duration, apply geographic factors to the
//! base rate or fee schedule bands, then project annual and lifetime costs.

mod age_increments;
mod calculator;
mod cost_range;
mod duration;
mod fee_schedule;
mod formatters;
mod frequency;
mod geo_factors;
mod multi_source;

pub use age_increments::{total_increment_years, validate_age_increments, AgeIncrement, MAX_AGE};
pub use calculator::{
    adjusted_cost_range, annualize, project_lifetime, CalculatedCosts, CostCalculator, CostInputs,
};
pub(crate) use calculator::per_occurrence_range;
pub use cost_range::CostRange;
pub use duration::{
    determine_duration, DurationContext, DurationDetails, DurationSource, DEFAULT_HIGH_YEARS,
    DEFAULT_LOW_YEARS, DEFAULT_MAX_YEARS,
};
pub use fee_schedule::{FeeSchedule, PercentileBands};
pub use formatters::{format_currency, format_factor, format_range};
pub use frequency::{is_one_time_frequency, parse_frequency, FrequencyDetails};
pub use geo_factors::{normalize_zip, GeoFactorLookup, GeoFactors, MAX_MANUAL_FACTOR};
pub use multi_source::multi_source_range;
