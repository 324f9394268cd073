//! HTTP adapter for life care plan and entry endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CategoryTotalsResponse, EntryCommandResponse, EntryListResponse, EntryRequest, EntryResponse,
    PlanCommandResponse, PlanListResponse, PlanRequest, PlanResponse, PlanTotalsResponse,
};
pub use handlers::CarePlanAppState;
pub use routes::care_plan_router;
