//! HTTP handlers for ad-hoc cost calculations.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{CalculateCostsRequest, CalculateCostsResponse};
use crate::adapters::http::error::handle_care_plan_error;
use crate::application::handlers::costing::{CalculateItemCostsHandler, ItemPricer};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CalculationAppState {
    calculate_handler: Arc<CalculateItemCostsHandler>,
}

impl CalculationAppState {
    pub fn new(pricer: ItemPricer) -> Self {
        Self {
            calculate_handler: Arc::new(CalculateItemCostsHandler::new(pricer)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/calculations - Price a line item without saving it
pub async fn calculate_costs(
    State(state): State<CalculationAppState>,
    Json(req): Json<CalculateCostsRequest>,
) -> Response {
    match state.calculate_handler.handle(req.into()).await {
        Ok(priced) => {
            let response: CalculateCostsResponse = priced.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}
