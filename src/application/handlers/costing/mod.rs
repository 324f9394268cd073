//! Costing handlers: ad-hoc calculations and reference lookups.

mod calculate_item_costs;
mod item_pricer;
mod lookup_reference;

pub use calculate_item_costs::{CalculateItemCostsCommand, CalculateItemCostsHandler};
pub(crate) use calculate_item_costs::manual_factors;
pub use item_pricer::{ItemPricer, PricedItem, PricingDefaults, PricingRequest};
pub use lookup_reference::{
    GetFeeScheduleHandler, GetFeeScheduleQuery, GetGeoFactorsHandler, GetGeoFactorsQuery,
};
