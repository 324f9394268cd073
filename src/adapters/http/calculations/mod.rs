//! HTTP adapter for ad-hoc cost calculations.

mod dto;
mod handlers;
mod routes;

pub use dto::{CalculateCostsRequest, CalculateCostsResponse};
pub use handlers::CalculationAppState;
pub use routes::calculation_router;
