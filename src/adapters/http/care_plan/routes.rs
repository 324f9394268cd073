//! Route configuration for life care plan and entry endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{
    create_entry, create_plan, delete_entry, delete_plan, get_entry, get_plan, get_plan_totals,
    list_entries, list_plans, update_entry, update_plan, CarePlanAppState,
};

/// Creates the care plan router.
///
/// Routes:
/// - `POST /api/plans` - Create a plan
/// - `GET /api/plans` - List plans
/// - `GET /api/plans/:plan_id` - Get a plan with derived ages
/// - `PUT /api/plans/:plan_id` - Update the evaluee profile
/// - `DELETE /api/plans/:plan_id` - Delete a plan and its entries
/// - `POST /api/plans/:plan_id/entries` - Create an entry
/// - `GET /api/plans/:plan_id/entries` - List entries
/// - `GET /api/plans/:plan_id/totals` - Plan totals
/// - `GET /api/entries/:id` - Get an entry
/// - `PUT /api/entries/:id` - Update an entry
/// - `DELETE /api/entries/:id` - Delete an entry
pub fn care_plan_router() -> Router<CarePlanAppState> {
    Router::new()
        .route("/api/plans", get(list_plans).post(create_plan))
        .route(
            "/api/plans/:plan_id",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .route(
            "/api/plans/:plan_id/entries",
            get(list_entries).post(create_entry),
        )
        .route("/api/plans/:plan_id/totals", get(get_plan_totals))
        .route(
            "/api/entries/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
}
