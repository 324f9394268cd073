//! In-memory implementation of LifeCarePlanRepository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::care_plan::LifeCarePlan;
use crate::domain::foundation::{DomainError, ErrorCode, PlanId};
use crate::ports::LifeCarePlanRepository;

/// In-memory storage for life care plans.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLifeCarePlanRepository {
    plans: Arc<RwLock<HashMap<PlanId, LifeCarePlan>>>,
}

impl InMemoryLifeCarePlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans.
    pub async fn len(&self) -> usize {
        self.plans.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.plans.read().await.is_empty()
    }
}

fn plan_not_found(id: &PlanId) -> DomainError {
    DomainError::new(
        ErrorCode::PlanNotFound,
        format!("Life care plan not found: {}", id),
    )
}

#[async_trait]
impl LifeCarePlanRepository for InMemoryLifeCarePlanRepository {
    async fn save(&self, plan: &LifeCarePlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        if plans.contains_key(plan.id()) {
            return Err(DomainError::database(format!(
                "Life care plan already exists: {}",
                plan.id()
            )));
        }
        plans.insert(*plan.id(), plan.clone());
        Ok(())
    }

    async fn update(&self, plan: &LifeCarePlan) -> Result<(), DomainError> {
        let mut plans = self.plans.write().await;
        match plans.get_mut(plan.id()) {
            Some(existing) => {
                *existing = plan.clone();
                Ok(())
            }
            None => Err(plan_not_found(plan.id())),
        }
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<LifeCarePlan>, DomainError> {
        Ok(self.plans.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &PlanId) -> Result<bool, DomainError> {
        Ok(self.plans.read().await.contains_key(id))
    }

    async fn list(&self) -> Result<Vec<LifeCarePlan>, DomainError> {
        let mut plans: Vec<LifeCarePlan> = self.plans.read().await.values().cloned().collect();
        plans.sort_by(|a, b| {
            b.updated_at()
                .cmp(a.updated_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(plans)
    }

    async fn delete(&self, id: &PlanId) -> Result<(), DomainError> {
        match self.plans.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(plan_not_found(id)),
        }
    }
}
