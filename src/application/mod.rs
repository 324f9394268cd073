//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (create, update, delete) are separate from query
//! handlers (get, list, totals, reference lookups).

pub mod handlers;

pub use handlers::{
    // Costing
    CalculateItemCostsCommand, CalculateItemCostsHandler, GetFeeScheduleHandler,
    GetFeeScheduleQuery, GetGeoFactorsHandler, GetGeoFactorsQuery, ItemPricer, PricedItem,
    PricingDefaults, PricingRequest,
    // Care plan entries
    CreateEntryCommand, CreateEntryHandler, CreateEntryResult, DeleteEntryCommand,
    DeleteEntryHandler, GetEntryHandler, GetEntryQuery, GetPlanTotalsHandler, GetPlanTotalsQuery,
    ListPlanEntriesHandler, ListPlanEntriesQuery, UpdateEntryCommand, UpdateEntryHandler,
    UpdateEntryResult,
    // Life care plans
    CreatePlanCommand, CreatePlanHandler, CreatePlanResult, DeletePlanCommand, DeletePlanHandler,
    GetPlanHandler, GetPlanQuery, ListPlansHandler, PlanView, UpdatePlanCommand,
    UpdatePlanHandler, UpdatePlanResult,
};
