//! UpdateEntryHandler - Command handler for revising a line item.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::entry_pricing::{entry_error, price_entry};
use super::plan_access::{load_plan, today};
use crate::application::handlers::costing::ItemPricer;
use crate::domain::care_plan::{CarePlanEntry, CarePlanError, EntryDraft};
use crate::domain::foundation::EntryId;
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

/// Command to replace an entry's inputs. Costs are recomputed, and
/// omitted ages and ZIP code default from the plan as on creation.
#[derive(Debug, Clone)]
pub struct UpdateEntryCommand {
    pub entry_id: EntryId,
    pub draft: EntryDraft,
    pub mfr_factor: Option<Decimal>,
    pub pfr_factor: Option<Decimal>,
}

/// Result of successful entry update.
#[derive(Debug, Clone)]
pub struct UpdateEntryResult {
    pub entry: CarePlanEntry,
    pub warnings: Vec<String>,
}

/// Handler for updating entries.
pub struct UpdateEntryHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
    repository: Arc<dyn CarePlanEntryRepository>,
    pricer: ItemPricer,
}

impl UpdateEntryHandler {
    pub fn new(
        plans: Arc<dyn LifeCarePlanRepository>,
        repository: Arc<dyn CarePlanEntryRepository>,
        pricer: ItemPricer,
    ) -> Self {
        Self {
            plans,
            repository,
            pricer,
        }
    }

    pub async fn handle(&self, cmd: UpdateEntryCommand) -> Result<UpdateEntryResult, CarePlanError> {
        // 1. Load entry
        let mut entry = self
            .repository
            .find_by_id(&cmd.entry_id)
            .await?
            .ok_or_else(|| CarePlanError::not_found(cmd.entry_id))?;

        // 2. Fill defaults from the owning plan
        let plan = load_plan(self.plans.as_ref(), *entry.plan_id()).await?;
        let defaults = plan.entry_defaults(today(), self.pricer.defaults().life_expectancy_years);
        let details = cmd.draft.resolve(&defaults);

        // 3. Validate and reprice
        let (costs, warnings) = price_entry(
            &self.pricer,
            &details,
            defaults.life_expectancy,
            cmd.mfr_factor,
            cmd.pfr_factor,
        )
        .await?;
        entry.revise(details, costs)?;

        // 4. Persist
        self.repository
            .update(&entry)
            .await
            .map_err(|e| entry_error(cmd.entry_id, e))?;

        tracing::info!(
            entry_id = %entry.id(),
            lifetime = %entry.costs().lifetime_cost,
            "Updated care plan entry"
        );

        Ok(UpdateEntryResult { entry, warnings })
    }
}
