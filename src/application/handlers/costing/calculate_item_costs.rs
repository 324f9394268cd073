//! CalculateItemCostsHandler - Ad-hoc pricing of a line item.

use rust_decimal::Decimal;

use super::{ItemPricer, PricedItem, PricingRequest};
use crate::domain::care_plan::CarePlanError;
use crate::domain::costing::{AgeIncrement, GeoFactors};

/// Command to price a line item without saving it.
#[derive(Debug, Clone, Default)]
pub struct CalculateItemCostsCommand {
    pub base_rate: Decimal,
    pub frequency: String,
    pub cpt_code: Option<String>,
    pub zip_code: Option<String>,
    /// Manual override of the medical factor; 1.0 when only the other is set.
    pub mfr_factor: Option<Decimal>,
    pub pfr_factor: Option<Decimal>,
    pub cost_sources: Vec<Decimal>,
    pub start_age: Option<u32>,
    pub end_age: Option<u32>,
    pub life_expectancy: Option<Decimal>,
    pub is_one_time: bool,
    pub age_increments: Vec<AgeIncrement>,
}

/// Handler for ad-hoc cost calculations.
pub struct CalculateItemCostsHandler {
    pricer: ItemPricer,
}

impl CalculateItemCostsHandler {
    pub fn new(pricer: ItemPricer) -> Self {
        Self { pricer }
    }

    pub async fn handle(&self, cmd: CalculateItemCostsCommand) -> Result<PricedItem, CarePlanError> {
        let manual_factors = manual_factors(cmd.mfr_factor, cmd.pfr_factor)?;

        let request = PricingRequest {
            base_rate: cmd.base_rate,
            frequency: cmd.frequency,
            cpt_code: cmd.cpt_code,
            zip_code: cmd.zip_code,
            manual_factors,
            cost_sources: cmd.cost_sources,
            start_age: cmd.start_age,
            end_age: cmd.end_age,
            life_expectancy: cmd.life_expectancy,
            is_one_time: cmd.is_one_time,
            age_increments: cmd.age_increments,
        };

        self.pricer.price(&request).await
    }
}

/// Validated override factors; `None` when neither is given.
pub(crate) fn manual_factors(
    mfr_factor: Option<Decimal>,
    pfr_factor: Option<Decimal>,
) -> Result<Option<GeoFactors>, CarePlanError> {
    if mfr_factor.is_none() && pfr_factor.is_none() {
        return Ok(None);
    }
    let factors = GeoFactors::manual(
        mfr_factor.unwrap_or(Decimal::ONE),
        pfr_factor.unwrap_or(Decimal::ONE),
    )?;
    Ok(Some(factors))
}
