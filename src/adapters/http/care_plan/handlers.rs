//! HTTP handlers for life care plan and entry endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{
    EntryCommandResponse, EntryListResponse, EntryRequest, EntryResponse, PlanCommandResponse,
    PlanListResponse, PlanRequest, PlanResponse, PlanTotalsResponse,
};
use crate::adapters::http::error::{handle_care_plan_error, invalid_id};
use crate::application::handlers::care_plan::{
    CreateEntryCommand, CreateEntryHandler, CreatePlanCommand, CreatePlanHandler,
    DeleteEntryCommand, DeleteEntryHandler, DeletePlanCommand, DeletePlanHandler,
    GetEntryHandler, GetEntryQuery, GetPlanHandler, GetPlanQuery, GetPlanTotalsHandler,
    GetPlanTotalsQuery, ListPlanEntriesHandler, ListPlanEntriesQuery, ListPlansHandler,
    UpdateEntryCommand, UpdateEntryHandler, UpdatePlanCommand, UpdatePlanHandler,
};
use crate::application::handlers::costing::ItemPricer;
use crate::domain::foundation::{EntryId, PlanId};
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CarePlanAppState {
    pub plans: Arc<dyn LifeCarePlanRepository>,
    pub repository: Arc<dyn CarePlanEntryRepository>,
    pub pricer: ItemPricer,
}

impl CarePlanAppState {
    pub fn new(
        plans: Arc<dyn LifeCarePlanRepository>,
        repository: Arc<dyn CarePlanEntryRepository>,
        pricer: ItemPricer,
    ) -> Self {
        Self {
            plans,
            repository,
            pricer,
        }
    }

    pub fn create_plan_handler(&self) -> CreatePlanHandler {
        CreatePlanHandler::new(self.plans.clone())
    }

    pub fn update_plan_handler(&self) -> UpdatePlanHandler {
        UpdatePlanHandler::new(self.plans.clone())
    }

    pub fn get_plan_handler(&self) -> GetPlanHandler {
        GetPlanHandler::new(self.plans.clone())
    }

    pub fn list_plans_handler(&self) -> ListPlansHandler {
        ListPlansHandler::new(self.plans.clone())
    }

    pub fn delete_plan_handler(&self) -> DeletePlanHandler {
        DeletePlanHandler::new(self.plans.clone(), self.repository.clone())
    }

    pub fn create_handler(&self) -> CreateEntryHandler {
        CreateEntryHandler::new(self.plans.clone(), self.repository.clone(), self.pricer.clone())
    }

    pub fn update_handler(&self) -> UpdateEntryHandler {
        UpdateEntryHandler::new(self.plans.clone(), self.repository.clone(), self.pricer.clone())
    }

    pub fn get_handler(&self) -> GetEntryHandler {
        GetEntryHandler::new(self.repository.clone())
    }

    pub fn list_handler(&self) -> ListPlanEntriesHandler {
        ListPlanEntriesHandler::new(self.plans.clone(), self.repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteEntryHandler {
        DeleteEntryHandler::new(self.repository.clone())
    }

    pub fn totals_handler(&self) -> GetPlanTotalsHandler {
        GetPlanTotalsHandler::new(self.plans.clone(), self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/plans - Create a plan
pub async fn create_plan(
    State(state): State<CarePlanAppState>,
    Json(req): Json<PlanRequest>,
) -> Response {
    let cmd = CreatePlanCommand {
        evaluee: req.into(),
    };

    match state.create_plan_handler().handle(cmd).await {
        Ok(result) => {
            let response = PlanCommandResponse {
                plan: PlanResponse::from(&result.view),
                warnings: result.warnings,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/plans - List plans
pub async fn list_plans(State(state): State<CarePlanAppState>) -> Response {
    match state.list_plans_handler().handle().await {
        Ok(views) => {
            let response: PlanListResponse = views.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/plans/:plan_id - Get a plan with derived ages
pub async fn get_plan(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    match state.get_plan_handler().handle(GetPlanQuery { plan_id }).await {
        Ok(view) => (StatusCode::OK, Json(PlanResponse::from(&view))).into_response(),
        Err(e) => handle_care_plan_error(e),
    }
}

/// PUT /api/plans/:plan_id - Replace the evaluee profile
pub async fn update_plan(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
    Json(req): Json<PlanRequest>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    let cmd = UpdatePlanCommand {
        plan_id,
        evaluee: req.into(),
    };

    match state.update_plan_handler().handle(cmd).await {
        Ok(result) => {
            let response = PlanCommandResponse {
                plan: PlanResponse::from(&result.view),
                warnings: result.warnings,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// DELETE /api/plans/:plan_id - Delete a plan and its entries
pub async fn delete_plan(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    match state.delete_plan_handler().handle(DeletePlanCommand { plan_id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_care_plan_error(e),
    }
}

/// POST /api/plans/:plan_id/entries - Create an entry
pub async fn create_entry(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
    Json(req): Json<EntryRequest>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    let (draft, mfr_factor, pfr_factor) = req.into_parts();
    let cmd = CreateEntryCommand {
        plan_id,
        draft,
        mfr_factor,
        pfr_factor,
    };

    match state.create_handler().handle(cmd).await {
        Ok(result) => {
            let response = EntryCommandResponse {
                entry: EntryResponse::from(&result.entry),
                warnings: result.warnings,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/plans/:plan_id/entries - List a plan's entries
pub async fn list_entries(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    match state.list_handler().handle(ListPlanEntriesQuery { plan_id }).await {
        Ok(entries) => {
            let response: EntryListResponse = entries.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/plans/:plan_id/totals - Plan cost totals
pub async fn get_plan_totals(
    State(state): State<CarePlanAppState>,
    Path(plan_id): Path<String>,
) -> Response {
    let Ok(plan_id) = plan_id.parse::<PlanId>() else {
        return invalid_id("plan");
    };

    match state.totals_handler().handle(GetPlanTotalsQuery { plan_id }).await {
        Ok(totals) => {
            let response: PlanTotalsResponse = totals.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// GET /api/entries/:id - Get an entry
pub async fn get_entry(
    State(state): State<CarePlanAppState>,
    Path(entry_id): Path<String>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<EntryId>() else {
        return invalid_id("entry");
    };

    match state.get_handler().handle(GetEntryQuery { entry_id }).await {
        Ok(entry) => (StatusCode::OK, Json(EntryResponse::from(&entry))).into_response(),
        Err(e) => handle_care_plan_error(e),
    }
}

/// PUT /api/entries/:id - Replace an entry's inputs
pub async fn update_entry(
    State(state): State<CarePlanAppState>,
    Path(entry_id): Path<String>,
    Json(req): Json<EntryRequest>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<EntryId>() else {
        return invalid_id("entry");
    };

    let (draft, mfr_factor, pfr_factor) = req.into_parts();
    let cmd = UpdateEntryCommand {
        entry_id,
        draft,
        mfr_factor,
        pfr_factor,
    };

    match state.update_handler().handle(cmd).await {
        Ok(result) => {
            let response = EntryCommandResponse {
                entry: EntryResponse::from(&result.entry),
                warnings: result.warnings,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_care_plan_error(e),
    }
}

/// DELETE /api/entries/:id - Delete an entry
pub async fn delete_entry(
    State(state): State<CarePlanAppState>,
    Path(entry_id): Path<String>,
) -> Response {
    let Ok(entry_id) = entry_id.parse::<EntryId>() else {
        return invalid_id("entry");
    };

    match state.delete_handler().handle(DeleteEntryCommand { entry_id }).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_care_plan_error(e),
    }
}
