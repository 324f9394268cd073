//! Request/response DTOs for ad-hoc cost calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::costing::{CalculateItemCostsCommand, PricedItem};
use crate::domain::costing::{
    format_currency, format_factor, format_range, AgeIncrement, CostRange, DurationSource,
    GeoFactors,
};

/// POST /api/calculations body.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateCostsRequest {
    #[serde(default)]
    pub base_rate: Decimal,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub cpt_code: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub mfr_factor: Option<Decimal>,
    #[serde(default)]
    pub pfr_factor: Option<Decimal>,
    #[serde(default)]
    pub cost_sources: Vec<Decimal>,
    #[serde(default)]
    pub start_age: Option<u32>,
    #[serde(default)]
    pub end_age: Option<u32>,
    #[serde(default)]
    pub life_expectancy: Option<Decimal>,
    #[serde(default)]
    pub is_one_time: bool,
    #[serde(default)]
    pub age_increments: Vec<AgeIncrement>,
}

impl From<CalculateCostsRequest> for CalculateItemCostsCommand {
    fn from(req: CalculateCostsRequest) -> Self {
        Self {
            base_rate: req.base_rate,
            frequency: req.frequency,
            cpt_code: req.cpt_code,
            zip_code: req.zip_code,
            mfr_factor: req.mfr_factor,
            pfr_factor: req.pfr_factor,
            cost_sources: req.cost_sources,
            start_age: req.start_age,
            end_age: req.end_age,
            life_expectancy: req.life_expectancy,
            is_one_time: req.is_one_time,
            age_increments: req.age_increments,
        }
    }
}

/// Parsed frequency.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyResponse {
    pub low_per_year: Decimal,
    pub high_per_year: Decimal,
    pub is_one_time: bool,
    pub valid: bool,
    pub used_default: bool,
}

/// Determined duration.
#[derive(Debug, Clone, Serialize)]
pub struct DurationResponse {
    pub low_years: Decimal,
    pub high_years: Decimal,
    pub source: DurationSource,
}

/// Applied geographic factors.
#[derive(Debug, Clone, Serialize)]
pub struct GeoFactorsResponse {
    pub mfr_factor: Decimal,
    pub pfr_factor: Decimal,
    /// `None` when no lookup was made (manual override or no ZIP).
    pub found: Option<bool>,
    pub display: String,
}

/// Display strings for the headline figures.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedCosts {
    pub per_occurrence: String,
    pub annual: String,
    pub lifetime: String,
    pub lifetime_range: String,
}

/// Calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct CalculateCostsResponse {
    pub annual: Decimal,
    pub lifetime: Decimal,
    pub low: Decimal,
    pub average: Decimal,
    pub high: Decimal,
    pub is_one_time: bool,
    pub per_occurrence: CostRange,
    pub annual_range: CostRange,
    pub frequency: FrequencyResponse,
    pub duration: Option<DurationResponse>,
    pub geo_factors: GeoFactorsResponse,
    pub fee_schedule_code: Option<String>,
    pub formatted: FormattedCosts,
    pub warnings: Vec<String>,
}

fn factors_display(factors: &GeoFactors) -> String {
    format!(
        "MFR {} / PFR {}",
        format_factor(factors.mfr_factor, 4),
        format_factor(factors.pfr_factor, 4)
    )
}

impl From<PricedItem> for CalculateCostsResponse {
    fn from(priced: PricedItem) -> Self {
        let costs = priced.costs;
        let lifetime_range = costs.lifetime_range();
        Self {
            annual: costs.annual,
            lifetime: costs.lifetime,
            low: costs.low,
            average: costs.average,
            high: costs.high,
            is_one_time: costs.is_one_time,
            per_occurrence: costs.per_occurrence,
            annual_range: costs.annual_range,
            frequency: FrequencyResponse {
                low_per_year: costs.frequency.low_frequency_per_year,
                high_per_year: costs.frequency.high_frequency_per_year,
                is_one_time: costs.frequency.is_one_time,
                valid: costs.frequency.valid,
                used_default: costs.frequency.used_default,
            },
            duration: costs.duration.map(|d| DurationResponse {
                low_years: d.low_duration_years,
                high_years: d.high_duration_years,
                source: d.source,
            }),
            geo_factors: GeoFactorsResponse {
                mfr_factor: priced.geo_factors.mfr_factor,
                pfr_factor: priced.geo_factors.pfr_factor,
                found: priced.geo_lookup.map(|l| l.found),
                display: factors_display(&priced.geo_factors),
            },
            fee_schedule_code: priced.fee_schedule.map(|s| s.code),
            formatted: FormattedCosts {
                per_occurrence: format_range(&costs.per_occurrence),
                annual: format_currency(costs.annual),
                lifetime: format_currency(costs.lifetime),
                lifetime_range: format_range(&lifetime_range),
            },
            warnings: costs.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_optional_fields() {
        let json = r#"{"base_rate": "100", "frequency": "2x per month"}"#;
        let req: CalculateCostsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.base_rate, Decimal::ONE_HUNDRED);
        assert!(req.zip_code.is_none());
        assert!(req.age_increments.is_empty());
        assert!(!req.is_one_time);
    }

    #[test]
    fn request_accepts_age_increments() {
        let json = r#"{
            "base_rate": "80",
            "frequency": "weekly",
            "age_increments": [
                {"start_age": 10, "end_age": 18, "frequency": "weekly"},
                {"start_age": 18, "end_age": 30, "frequency": "monthly", "is_one_time": false}
            ]
        }"#;
        let req: CalculateCostsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.age_increments.len(), 2);
        assert_eq!(req.age_increments[1].frequency, "monthly");
    }

    #[test]
    fn factors_display_uses_four_decimals() {
        let factors = GeoFactors::manual("0.982".parse().unwrap(), Decimal::ONE).unwrap();
        assert_eq!(factors_display(&factors), "MFR 0.9820 / PFR 1.0000");
    }
}
