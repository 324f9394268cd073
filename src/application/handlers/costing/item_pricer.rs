//! ItemPricer - resolves reference data for a line item and prices it.
//!
//! Shared by the ad-hoc calculation handler and the entry command handlers.

use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::care_plan::CarePlanError;
use crate::domain::foundation::MAX_AMOUNT;
use crate::domain::costing::{
    validate_age_increments, AgeIncrement, CalculatedCosts, CostCalculator, CostInputs,
    DurationContext, FeeSchedule, GeoFactorLookup, GeoFactors, DEFAULT_HIGH_YEARS,
    DEFAULT_MAX_YEARS,
};
use crate::ports::{FeeScheduleReader, GeoFactorReader};

/// Duration defaults applied when a request carries no age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingDefaults {
    pub life_expectancy_years: Decimal,
    pub max_duration_years: Decimal,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            life_expectancy_years: DEFAULT_HIGH_YEARS,
            max_duration_years: DEFAULT_MAX_YEARS,
        }
    }
}

/// Everything needed to price one line item.
#[derive(Debug, Clone, Default)]
pub struct PricingRequest {
    pub base_rate: Decimal,
    pub frequency: String,
    pub cpt_code: Option<String>,
    pub zip_code: Option<String>,
    /// User-entered factors; skip the ZIP lookup when present.
    pub manual_factors: Option<GeoFactors>,
    pub cost_sources: Vec<Decimal>,
    pub start_age: Option<u32>,
    pub end_age: Option<u32>,
    pub life_expectancy: Option<Decimal>,
    pub is_one_time: bool,
    pub age_increments: Vec<AgeIncrement>,
}

/// A priced item with the reference data that went into it.
#[derive(Debug, Clone)]
pub struct PricedItem {
    pub costs: CalculatedCosts,
    /// Factors actually applied.
    pub geo_factors: GeoFactors,
    /// ZIP lookup outcome, when one was made and succeeded.
    pub geo_lookup: Option<GeoFactorLookup>,
    pub fee_schedule: Option<FeeSchedule>,
}

/// Prices line items against reference data.
#[derive(Clone)]
pub struct ItemPricer {
    geo_reader: Arc<dyn GeoFactorReader>,
    fee_reader: Arc<dyn FeeScheduleReader>,
    calculator: CostCalculator,
    defaults: PricingDefaults,
}

impl ItemPricer {
    pub fn new(geo_reader: Arc<dyn GeoFactorReader>, fee_reader: Arc<dyn FeeScheduleReader>) -> Self {
        Self {
            geo_reader,
            fee_reader,
            calculator: CostCalculator::new(),
            defaults: PricingDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: PricingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &PricingDefaults {
        &self.defaults
    }

    /// Looks up factors and fee bands, then computes costs.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for invalid age bands, or when there is nothing
    ///   to price (no positive base rate, no fee bands, no quoted prices)
    /// - `ValidationFailed` when an amount in or out falls outside
    ///   `0..=MAX_AMOUNT`
    /// - `Infrastructure` when the fee schedule store fails
    pub async fn price(&self, request: &PricingRequest) -> Result<PricedItem, CarePlanError> {
        check_input_amounts(request)?;
        let mut warnings = Vec::new();

        let (geo_factors, geo_lookup) = self.resolve_geo_factors(request, &mut warnings).await;
        let fee_schedule = self.resolve_fee_schedule(request, &mut warnings).await?;

        let has_bands = fee_schedule.as_ref().map_or(false, FeeSchedule::has_bands);
        if request.base_rate <= Decimal::ZERO && !has_bands && request.cost_sources.is_empty() {
            return Err(CarePlanError::validation(
                "base_rate",
                "must be positive when no fee schedule bands are available",
            ));
        }

        if !request.age_increments.is_empty() {
            warnings.extend(validate_age_increments(&request.age_increments)?);
        }

        let inputs = CostInputs::new(request.base_rate, request.frequency.clone())
            .with_geo_factors(geo_factors)
            .with_fee_schedule(fee_schedule.clone())
            .with_cost_sources(request.cost_sources.clone())
            .with_duration(self.duration_context(request))
            .one_time(request.is_one_time);

        let mut costs = self
            .calculator
            .calculate_with_age_increments(&inputs, &request.age_increments);
        check_derived_amounts(&costs)?;

        for warning in &warnings {
            tracing::warn!(frequency = %request.frequency, "{}", warning);
        }
        warnings.append(&mut costs.warnings);
        costs.warnings = warnings;

        Ok(PricedItem {
            costs,
            geo_factors,
            geo_lookup,
            fee_schedule,
        })
    }

    fn duration_context(&self, request: &PricingRequest) -> DurationContext {
        DurationContext {
            life_expectancy: request
                .life_expectancy
                .or(Some(self.defaults.life_expectancy_years)),
            start_age: request.start_age,
            end_age: request.end_age,
            max_years: self.defaults.max_duration_years,
        }
    }

    async fn resolve_geo_factors(
        &self,
        request: &PricingRequest,
        warnings: &mut Vec<String>,
    ) -> (GeoFactors, Option<GeoFactorLookup>) {
        if let Some(factors) = request.manual_factors {
            return (factors, None);
        }

        let Some(zip) = request
            .zip_code
            .as_deref()
            .map(str::trim)
            .filter(|z| !z.is_empty())
        else {
            return (GeoFactors::NEUTRAL, None);
        };

        match self.geo_reader.find_by_zip(zip).await {
            Ok(lookup) => {
                if !lookup.found {
                    warnings.push(format!(
                        "No geographic factors for ZIP {}; using 1.0",
                        lookup.zip
                    ));
                }
                (lookup.factors, Some(lookup))
            }
            Err(e) => {
                tracing::error!(zip = %zip, error = %e, "Geographic factor lookup failed");
                warnings.push(format!(
                    "Geographic factors for ZIP {} unavailable; using 1.0",
                    zip
                ));
                (GeoFactors::NEUTRAL, None)
            }
        }
    }

    async fn resolve_fee_schedule(
        &self,
        request: &PricingRequest,
        warnings: &mut Vec<String>,
    ) -> Result<Option<FeeSchedule>, CarePlanError> {
        let Some(code) = request
            .cpt_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        else {
            return Ok(None);
        };

        let schedule = self.fee_reader.find_by_code(code).await.map_err(|e| {
            tracing::error!(cpt_code = %code, error = %e, "Fee schedule lookup failed");
            CarePlanError::from(e)
        })?;

        match &schedule {
            None => warnings.push(format!("CPT code {} not in fee schedule; using base rate", code)),
            Some(s) if !s.has_bands() => warnings.push(format!(
                "CPT code {} has no 50th/75th percentile bands; using base rate",
                code
            )),
            Some(_) => {}
        }
        Ok(schedule)
    }
}

fn check_input_amounts(request: &PricingRequest) -> Result<(), CarePlanError> {
    if request.base_rate > MAX_AMOUNT {
        return Err(CarePlanError::validation(
            "base_rate",
            format!("must not exceed {}", MAX_AMOUNT),
        ));
    }
    if let Some(quote) = request
        .cost_sources
        .iter()
        .find(|q| q.is_sign_negative() || **q > MAX_AMOUNT)
    {
        return Err(CarePlanError::validation(
            "cost_sources",
            format!("quote {} must be between 0 and {}", quote, MAX_AMOUNT),
        ));
    }
    Ok(())
}

fn check_derived_amounts(costs: &CalculatedCosts) -> Result<(), CarePlanError> {
    let largest = costs
        .high
        .max(costs.annual_range.high)
        .max(costs.per_occurrence.high);
    if largest > MAX_AMOUNT {
        return Err(CarePlanError::validation(
            "lifetime_cost",
            format!("derived cost exceeds {}", MAX_AMOUNT),
        ));
    }
    Ok(())
}
