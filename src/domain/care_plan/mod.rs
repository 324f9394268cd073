//! Care plan domain module.
//!
//! Life care plans and their evaluee, the plan's line items with their
//! validation, and plan-level totals.

mod category;
mod entry;
mod errors;
mod plan;
mod totals;

pub use category::CareCategory;
pub use entry::{CarePlanEntry, EntryCosts, EntryDetails, EntryDraft, MAX_ITEM_LENGTH};
pub use errors::CarePlanError;
pub use plan::{age_on, AgeProfile, EntryDefaults, EvalueeProfile, LifeCarePlan, MAX_NAME_LENGTH};
pub use totals::{CategoryTotals, PlanTotals};
