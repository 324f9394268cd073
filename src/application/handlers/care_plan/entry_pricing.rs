//! Prices an entry's inputs.

use rust_decimal::Decimal;

use crate::application::handlers::costing::{manual_factors, ItemPricer, PricingRequest};
use crate::domain::care_plan::{CarePlanError, EntryCosts, EntryDetails};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode};

/// Costs for `details` plus every warning raised while validating and
/// pricing them. `life_expectancy` is the plan's remaining years, if known.
pub(crate) async fn price_entry(
    pricer: &ItemPricer,
    details: &EntryDetails,
    life_expectancy: Option<Decimal>,
    mfr_factor: Option<Decimal>,
    pfr_factor: Option<Decimal>,
) -> Result<(EntryCosts, Vec<String>), CarePlanError> {
    let mut warnings = details.validate()?;

    let request = PricingRequest {
        base_rate: details.base_rate,
        frequency: details.frequency.clone(),
        cpt_code: details.cpt_code.clone(),
        zip_code: details.zip_code.clone(),
        manual_factors: manual_factors(mfr_factor, pfr_factor)?,
        cost_sources: Vec::new(),
        start_age: Some(details.start_age),
        end_age: Some(details.end_age),
        life_expectancy,
        is_one_time: details.is_one_time,
        age_increments: details.pricing_increments().to_vec(),
    };

    let priced = pricer.price(&request).await?;
    warnings.extend(priced.costs.warnings.iter().cloned());
    Ok((EntryCosts::from_calculation(&priced.costs, &priced.geo_factors), warnings))
}

/// Maps a repository error, turning `EntryNotFound` into
/// [`CarePlanError::NotFound`].
pub(crate) fn entry_error(id: EntryId, err: DomainError) -> CarePlanError {
    if err.code == ErrorCode::EntryNotFound {
        CarePlanError::not_found(id)
    } else {
        CarePlanError::from(err)
    }
}
