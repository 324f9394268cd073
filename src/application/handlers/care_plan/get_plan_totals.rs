//! GetPlanTotalsHandler - Query handler for plan-level cost totals.

use std::sync::Arc;

use super::plan_access::ensure_plan;
use crate::domain::care_plan::{CarePlanError, PlanTotals};
use crate::domain::foundation::PlanId;
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

/// Query for the totals of a plan.
#[derive(Debug, Clone)]
pub struct GetPlanTotalsQuery {
    pub plan_id: PlanId,
}

/// Handler for plan totals. A plan with no entries has zero totals.
pub struct GetPlanTotalsHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
    repository: Arc<dyn CarePlanEntryRepository>,
}

impl GetPlanTotalsHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>, repository: Arc<dyn CarePlanEntryRepository>) -> Self {
        Self { plans, repository }
    }

    pub async fn handle(&self, query: GetPlanTotalsQuery) -> Result<PlanTotals, CarePlanError> {
        ensure_plan(self.plans.as_ref(), query.plan_id).await?;
        let entries = self.repository.list_by_plan(&query.plan_id).await?;
        let totals = PlanTotals::from_entries(query.plan_id, &entries);

        tracing::debug!(
            plan_id = %query.plan_id,
            entries = totals.entry_count,
            annual = %totals.annual,
            lifetime = %totals.lifetime.average,
            "Computed plan totals"
        );

        Ok(totals)
    }
}
