//! Route configuration for reference data endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_fee_schedule, get_geo_factors, ReferenceAppState};

/// Routes:
/// - `GET /api/reference/geo-factors/:zip`
/// - `GET /api/reference/fee-schedules/:code`
pub fn reference_router() -> Router<ReferenceAppState> {
    Router::new()
        .route("/api/reference/geo-factors/:zip", get(get_geo_factors))
        .route("/api/reference/fee-schedules/:code", get(get_fee_schedule))
}
