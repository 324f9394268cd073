//! DeletePlanHandler - Command handler for removing a plan and its entries.

use std::sync::Arc;

use super::plan_access::{ensure_plan, plan_error};
use crate::domain::care_plan::CarePlanError;
use crate::domain::foundation::PlanId;
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

/// Command to delete a plan.
#[derive(Debug, Clone)]
pub struct DeletePlanCommand {
    pub plan_id: PlanId,
}

/// Handler for deleting plans. Entries of the plan go with it.
pub struct DeletePlanHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
    entries: Arc<dyn CarePlanEntryRepository>,
}

impl DeletePlanHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>, entries: Arc<dyn CarePlanEntryRepository>) -> Self {
        Self { plans, entries }
    }

    pub async fn handle(&self, cmd: DeletePlanCommand) -> Result<(), CarePlanError> {
        ensure_plan(self.plans.as_ref(), cmd.plan_id).await?;

        let removed = self.entries.delete_by_plan(&cmd.plan_id).await?;
        self.plans
            .delete(&cmd.plan_id)
            .await
            .map_err(|e| plan_error(cmd.plan_id, e))?;

        tracing::info!(plan_id = %cmd.plan_id, entries = removed, "Deleted life care plan");
        Ok(())
    }
}
