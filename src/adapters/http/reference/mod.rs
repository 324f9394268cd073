//! HTTP adapter for reference data lookups.

mod dto;
mod handlers;
mod routes;

pub use dto::{FeeScheduleResponse, GeoFactorsResponse, PercentileBandsResponse};
pub use handlers::ReferenceAppState;
pub use routes::reference_router;
