//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod care_plan;
pub mod costing;

pub use care_plan::{
    CreateEntryCommand, CreateEntryHandler, CreateEntryResult, DeleteEntryCommand,
    DeleteEntryHandler, GetEntryHandler, GetEntryQuery, GetPlanTotalsHandler, GetPlanTotalsQuery,
    ListPlanEntriesHandler, ListPlanEntriesQuery, UpdateEntryCommand, UpdateEntryHandler,
    UpdateEntryResult,
    // Life care plans
    CreatePlanCommand, CreatePlanHandler, CreatePlanResult, DeletePlanCommand, DeletePlanHandler,
    GetPlanHandler, GetPlanQuery, ListPlansHandler, PlanView, UpdatePlanCommand,
    UpdatePlanHandler, UpdatePlanResult,
};
pub use costing::{
    CalculateItemCostsCommand, CalculateItemCostsHandler, GetFeeScheduleHandler,
    GetFeeScheduleQuery, GetGeoFactorsHandler, GetGeoFactorsQuery, ItemPricer, PricedItem,
    PricingDefaults, PricingRequest,
};
