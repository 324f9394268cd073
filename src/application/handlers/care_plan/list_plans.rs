//! ListPlansHandler - Query handler for every plan.

use std::sync::Arc;

use super::plan_access::{today, PlanView};
use crate::domain::care_plan::CarePlanError;
use crate::ports::LifeCarePlanRepository;

/// Handler for listing plans, most recently updated first.
pub struct ListPlansHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
}

impl ListPlansHandler {
    pub fn new(plans: Arc<dyn LifeCarePlanRepository>) -> Self {
        Self { plans }
    }

    pub async fn handle(&self) -> Result<Vec<PlanView>, CarePlanError> {
        let today = today();
        let plans = self.plans.list().await?;
        Ok(plans.into_iter().map(|plan| PlanView::as_of(plan, today)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLifeCarePlanRepository;
    use crate::application::handlers::care_plan::plan_access::fixtures::seed_plan;

    #[tokio::test]
    async fn lists_every_plan() {
        let repo = Arc::new(InMemoryLifeCarePlanRepository::new());
        seed_plan(repo.as_ref(), 30, None).await;
        seed_plan(repo.as_ref(), 60, None).await;

        let views = ListPlansHandler::new(repo).handle().await.unwrap();

        let mut ages: Vec<u32> = views.iter().map(|v| v.ages.age_today).collect();
        ages.sort();
        assert_eq!(ages, vec![30, 60]);
    }
}
