//! DeleteEntryHandler - Command handler for removing a line item.

use std::sync::Arc;

use super::entry_pricing::entry_error;
use crate::domain::care_plan::CarePlanError;
use crate::domain::foundation::EntryId;
use crate::ports::CarePlanEntryRepository;

/// Command to delete an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryCommand {
    pub entry_id: EntryId,
}

/// Handler for deleting entries.
pub struct DeleteEntryHandler {
    repository: Arc<dyn CarePlanEntryRepository>,
}

impl DeleteEntryHandler {
    pub fn new(repository: Arc<dyn CarePlanEntryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteEntryCommand) -> Result<(), CarePlanError> {
        self.repository
            .delete(&cmd.entry_id)
            .await
            .map_err(|e| entry_error(cmd.entry_id, e))?;

        tracing::info!(entry_id = %cmd.entry_id, "Deleted care plan entry");
        Ok(())
    }
}
