//! CreatePlanHandler - Command handler for opening a life care plan.

use std::sync::Arc;

use super::plan_access::{today, PlanView};
use crate::domain::care_plan::{CarePlanError, EvalueeProfile, LifeCarePlan};
use crate::domain::foundation::PlanId;
use crate::ports::LifeCarePlanRepository;

/// Command to create a plan for an evaluee.
#[derive(Debug, Clone)]
pub struct CreatePlanCommand {
    pub evaluee: EvalueeProfile,
}

/// Result of successful plan creation.
#[derive(Debug, Clone)]
pub struct CreatePlanResult {
    pub view: PlanView,
    pub warnings: Vec<String>,
}

/// Handler for creating plans.
pub struct CreatePlanHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
}

impl CreatePlanHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, cmd: CreatePlanCommand) -> Result<CreatePlanResult, CarePlanError> {
        let today = today();

        // 1. Validate and create aggregate
        let (plan, warnings) = LifeCarePlan::new(PlanId::new(), cmd.evaluee, today)?;

        // 2. Persist
        self.plans.save(&plan).await?;

        tracing::info!(plan_id = %plan.id(), "Created life care plan");

        Ok(CreatePlanResult {
            view: PlanView::as_of(plan, today),
            warnings,
        })
    }
}
