//! ListPlanEntriesHandler - Query handler for the entries of a plan.

use std::sync::Arc;

use super::plan_access::ensure_plan;
use crate::domain::care_plan::{CarePlanEntry, CarePlanError};
use crate::domain::foundation::PlanId;
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

/// Query for all entries of a plan.
#[derive(Debug, Clone)]
pub struct ListPlanEntriesQuery {
    pub plan_id: PlanId,
}

/// Handler for listing plan entries, oldest first.
pub struct ListPlanEntriesHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
    repository: Arc<dyn CarePlanEntryRepository>,
}

impl ListPlanEntriesHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>, repository: Arc<dyn CarePlanEntryRepository>) -> Self {
        Self { plans, repository }
    }

    pub async fn handle(&self, query: ListPlanEntriesQuery) -> Result<Vec<CarePlanEntry>, CarePlanError> {
        ensure_plan(self.plans.as_ref(), query.plan_id).await?;
        Ok(self.repository.list_by_plan(&query.plan_id).await?)
    }
}
