//! UpdatePlanHandler - Command handler for revising the evaluee profile.
//!
//! Stored entries keep their ages and costs. Only entries created or
//! updated afterwards pick up new defaults.

use std::sync::Arc;

use super::plan_access::{load_plan, plan_error, today, PlanView};
use crate::domain::care_plan::{CarePlanError, EvalueeProfile};
use crate::domain::foundation::PlanId;
use crate::ports::LifeCarePlanRepository;

/// Command to replace a plan's evaluee profile.
#[derive(Debug, Clone)]
pub struct UpdatePlanCommand {
    pub plan_id: PlanId,
    pub evaluee: EvalueeProfile,
}

/// Result of successful plan update.
#[derive(Debug, Clone)]
pub struct UpdatePlanResult {
    pub view: PlanView,
    pub warnings: Vec<String>,
}

/// Handler for updating plans.
pub struct UpdatePlanHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
}

impl UpdatePlanHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self, cmd: UpdatePlanCommand) -> Result<UpdatePlanResult, CarePlanError> {
        let today = today();

        // 1. Load plan
        let mut plan = load_plan(self.plans.as_ref(), cmd.plan_id).await?;

        // 2. Validate and apply
        let warnings = plan.revise(cmd.evaluee, today)?;

        // 3. Persist
        self.plans
            .update(&plan)
            .await
            .map_err(|e| plan_error(cmd.plan_id, e))?;

        tracing::info!(plan_id = %plan.id(), "Updated life care plan");

        Ok(UpdatePlanResult {
            view: PlanView::as_of(plan, today),
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLifeCarePlanRepository;
    use crate::application::handlers::care_plan::plan_access::fixtures::{evaluee_aged, seed_plan};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn revises_profile_and_ages() {
        let repo = Arc::new(InMemoryLifeCarePlanRepository::new());
        let plan_id = seed_plan(repo.as_ref(), 30, None).await;

        let result = UpdatePlanHandler::new(repo.clone())
            .handle(UpdatePlanCommand {
                plan_id,
                evaluee: evaluee_aged(31, Some(Decimal::from(40))),
            })
            .await
            .unwrap();

        assert_eq!(result.view.ages.age_today, 31);
        let stored = repo.find_by_id(&plan_id).await.unwrap().unwrap();
        assert_eq!(stored.evaluee().life_expectancy, Some(Decimal::from(40)));
    }

    #[tokio::test]
    async fn missing_plan_is_not_found() {
        let id = PlanId::new();
        let err = UpdatePlanHandler::new(Arc::new(InMemoryLifeCarePlanRepository::new()))
            .handle(UpdatePlanCommand {
                plan_id: id,
                evaluee: evaluee_aged(30, None),
            })
            .await
            .unwrap_err();
        assert_eq!(err, CarePlanError::PlanNotFound(id));
    }
}
