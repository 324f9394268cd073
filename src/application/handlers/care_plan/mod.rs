//! Life care plan and entry command and query handlers.

mod create_entry;
mod create_plan;
mod delete_entry;
mod delete_plan;
mod entry_pricing;
mod get_entry;
mod get_plan;
mod get_plan_totals;
mod list_plan_entries;
mod list_plans;
mod plan_access;
mod update_entry;
mod update_plan;

pub use create_entry::{CreateEntryCommand, CreateEntryHandler, CreateEntryResult};
pub use create_plan::{CreatePlanCommand, CreatePlanHandler, CreatePlanResult};
pub use delete_entry::{DeleteEntryCommand, DeleteEntryHandler};
pub use delete_plan::{DeletePlanCommand, DeletePlanHandler};
pub use get_entry::{GetEntryHandler, GetEntryQuery};
pub use get_plan::{GetPlanHandler, GetPlanQuery};
pub use get_plan_totals::{GetPlanTotalsHandler, GetPlanTotalsQuery};
pub use list_plan_entries::{ListPlanEntriesHandler, ListPlanEntriesQuery};
pub use list_plans::ListPlansHandler;
pub use plan_access::PlanView;
pub use update_entry::{UpdateEntryCommand, UpdateEntryHandler, UpdateEntryResult};
pub use update_plan::{UpdatePlanCommand, UpdatePlanHandler, UpdatePlanResult};
