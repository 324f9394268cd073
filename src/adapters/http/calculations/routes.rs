//! Route configuration for calculation endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{calculate_costs, CalculationAppState};

/// Routes:
/// - `POST /api/calculations` - Compute costs for ad-hoc inputs
pub fn calculation_router() -> Router<CalculationAppState> {
    Router::new().route("/api/calculations", post(calculate_costs))
}
