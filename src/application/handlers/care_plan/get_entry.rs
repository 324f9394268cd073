//! GetEntryHandler - Query handler for a single entry.

use std::sync::Arc;

use crate::domain::care_plan::{CarePlanEntry, CarePlanError};
use crate::domain::foundation::EntryId;
use crate::ports::CarePlanEntryRepository;

/// Query for one entry.
#[derive(Debug, Clone)]
pub struct GetEntryQuery {
    pub entry_id: EntryId,
}

/// Handler for entry lookups.
pub struct GetEntryHandler {
    repository: Arc<dyn CarePlanEntryRepository>,
}

impl GetEntryHandler {
    pub fn new(repository: Arc<dyn CarePlanEntryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetEntryQuery) -> Result<CarePlanEntry, CarePlanError> {
        self.repository
            .find_by_id(&query.entry_id)
            .await?
            .ok_or_else(|| CarePlanError::not_found(query.entry_id))
    }
}
