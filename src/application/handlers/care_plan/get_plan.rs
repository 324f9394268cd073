//! GetPlanHandler - Query handler for a single plan with derived ages.

use std::sync::Arc;

use super::plan_access::{load_plan, today, PlanView};
use crate::domain::care_plan::CarePlanError;
use crate::domain::foundation::PlanId;
use crate::ports::LifeCarePlanRepository;

/// Query for one plan.
#[derive(Debug, Clone)]
pub struct GetPlanQuery {
    pub plan_id: PlanId,
}

/// Handler for plan lookups.
pub struct GetPlanHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
}

impl GetPlanHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, query: GetPlanQuery) -> Result<PlanView, CarePlanError> {
        let plan = load_plan(self.plans.as_ref(), query.plan_id).await?;
        Ok(PlanView::as_of(plan, today()))
    }
}
