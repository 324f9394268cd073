//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own dto/handlers/routes module. [`api_router`]
//! mounts them all on one router.

pub mod calculations;
pub mod care_plan;
pub mod error;
pub mod health;
pub mod reference;

use std::sync::Arc;

use axum::Router;

use crate::application::handlers::costing::ItemPricer;
use crate::ports::{
    CarePlanEntryRepository, FeeScheduleReader, GeoFactorReader, LifeCarePlanRepository,
};

pub use calculations::{calculation_router, CalculationAppState};
pub use care_plan::{care_plan_router, CarePlanAppState};
pub use error::{handle_care_plan_error, ErrorResponse};
pub use health::health_router;
pub use reference::{reference_router, ReferenceAppState};

/// Ports shared by every endpoint.
#[derive(Clone)]
pub struct ApiState {
    pub plan_repository: Arc<dyn LifeCarePlanRepository>,
    pub entry_repository: Arc<dyn CarePlanEntryRepository>,
    pub geo_reader: Arc<dyn GeoFactorReader>,
    pub fee_reader: Arc<dyn FeeScheduleReader>,
    pub pricer: ItemPricer,
}

impl ApiState {
    pub fn new(
        plan_repository: Arc<dyn LifeCarePlanRepository>,
        entry_repository: Arc<dyn CarePlanEntryRepository>,
        geo_reader: Arc<dyn GeoFactorReader>,
        fee_reader: Arc<dyn FeeScheduleReader>,
        pricer: ItemPricer,
    ) -> Self {
        Self {
            plan_repository,
            entry_repository,
            geo_reader,
            fee_reader,
            pricer,
        }
    }
}

/// Builds the full API router. Middleware layers are added by the caller.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        .merge(health_router())
        .merge(calculation_router().with_state(CalculationAppState::new(state.pricer.clone())))
        .merge(reference_router().with_state(ReferenceAppState::new(
            state.geo_reader.clone(),
            state.fee_reader.clone(),
        )))
        .merge(care_plan_router().with_state(CarePlanAppState::new(
            state.plan_repository.clone(),
            state.entry_repository.clone(),
            state.pricer,
        )))
}
