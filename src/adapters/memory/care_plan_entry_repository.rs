//! In-memory implementation of CarePlanEntryRepository.
//!
//! Used in development without a database and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::care_plan::CarePlanEntry;
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, PlanId};
use crate::ports::CarePlanEntryRepository;

/// In-memory storage for care plan entries.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCarePlanEntryRepository {
    entries: Arc<RwLock<HashMap<EntryId, CarePlanEntry>>>,
}

impl InMemoryCarePlanEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CarePlanEntryRepository for InMemoryCarePlanEntryRepository {
    async fn save(&self, entry: &CarePlanEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(entry.id()) {
            return Err(DomainError::database(format!(
                "Care plan entry already exists: {}",
                entry.id()
            )));
        }
        entries.insert(*entry.id(), entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &CarePlanEntry) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        match entries.get_mut(entry.id()) {
            Some(existing) => {
                *existing = entry.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::EntryNotFound,
                format!("Care plan entry not found: {}", entry.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<CarePlanEntry>, DomainError> {
        Ok(self.entries.read().await.get(id).cloned())
    }

    async fn list_by_plan(&self, plan_id: &PlanId) -> Result<Vec<CarePlanEntry>, DomainError> {
        let entries = self.entries.read().await;
        let mut found: Vec<CarePlanEntry> = entries
            .values()
            .filter(|e| e.plan_id() == plan_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.created_at()
                .cmp(b.created_at())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(found)
    }

    async fn delete_by_plan(&self, plan_id: &PlanId) -> Result<u64, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| e.plan_id() != plan_id);
        Ok((before - entries.len()) as u64)
    }

    async fn delete(&self, id: &EntryId) -> Result<(), DomainError> {
        match self.entries.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::EntryNotFound,
                format!("Care plan entry not found: {}", id),
            )),
        }
    }
}
