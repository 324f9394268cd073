//! HTTP handlers for reference data lookups.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{FeeScheduleResponse, GeoFactorsResponse};
use crate::adapters::http::error::{handle_care_plan_error, ErrorResponse};
use crate::application::handlers::costing::{
    GetFeeScheduleHandler, GetFeeScheduleQuery, GetGeoFactorsHandler, GetGeoFactorsQuery,
};
use crate::ports::{FeeScheduleReader, GeoFactorReader};

#[derive(Clone)]
pub struct ReferenceAppState {
    geo_handler: Arc<GetGeoFactorsHandler>,
    fee_handler: Arc<GetFeeScheduleHandler>,
}

impl ReferenceAppState {
    pub fn new(geo_reader: Arc<dyn GeoFactorReader>, fee_reader: Arc<dyn FeeScheduleReader>) -> Self {
        Self {
            geo_handler: Arc::new(GetGeoFactorsHandler::new(geo_reader)),
            fee_handler: Arc::new(GetFeeScheduleHandler::new(fee_reader)),
        }
    }
}

/// GET /api/reference/geo-factors/:zip - Factors for a ZIP code
///
/// A miss is still 200 with `found: false`.
pub async fn get_geo_factors(
    State(state): State<ReferenceAppState>,
    Path(zip): Path<String>,
) -> Response {
    match state.geo_handler.handle(GetGeoFactorsQuery { zip }).await {
        Ok(lookup) => {
            let response: GeoFactorsResponse = lookup.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/reference/fee-schedules/:code - Fee bands for a CPT code
pub async fn get_fee_schedule(
    State(state): State<ReferenceAppState>,
    Path(code): Path<String>,
) -> Response {
    match state
        .fee_handler
        .handle(GetFeeScheduleQuery { code: code.clone() })
        .await
    {
        Ok(Some(schedule)) => {
            let response: FeeScheduleResponse = schedule.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("CPT code", &code)),
        )
            .into_response(),
        Err(e) => handle_care_plan_error(e),
    }
}
