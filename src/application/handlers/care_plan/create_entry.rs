//! CreateEntryHandler - Command handler for adding a line item to a plan.

use rust_decimal::Decimal;
use std::sync::Arc;

use super::entry_pricing::price_entry;
use super::plan_access::{load_plan, today};
use crate::application::handlers::costing::ItemPricer;
use crate::domain::care_plan::{CarePlanEntry, CarePlanError, EntryDraft};
use crate::domain::foundation::{EntryId, PlanId};
use crate::ports::{CarePlanEntryRepository, LifeCarePlanRepository};

/// Command to create a care plan entry. Ages and ZIP code left out of the
/// draft default from the plan.
#[derive(Debug, Clone)]
pub struct CreateEntryCommand {
    pub plan_id: PlanId,
    pub draft: EntryDraft,
    pub mfr_factor: Option<Decimal>,
    pub pfr_factor: Option<Decimal>,
}

/// Result of successful entry creation.
#[derive(Debug, Clone)]
pub struct CreateEntryResult {
    pub entry: CarePlanEntry,
    pub warnings: Vec<String>,
}

/// Handler for creating entries.
pub struct CreateEntryHandler {
    plans: Arc<dyn LifeCarePlanRepository>,
    repository: Arc<dyn CarePlanEntryRepository>,
    pricer: ItemPricer,
}

impl CreateEntryHandler {
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

    pub async fn handle(&self, cmd: CreateEntryCommand) -> Result<CreateEntryResult, CarePlanError> {
        // 1. Load plan and fill defaults
        let plan = load_plan(self.plans.as_ref(), cmd.plan_id).await?;
        let defaults = plan.entry_defaults(today(), self.pricer.defaults().life_expectancy_years);
        let details = cmd.draft.resolve(&defaults);

        // 2. Validate and price
        let (costs, warnings) = price_entry(
            &self.pricer,
            &details,
            defaults.life_expectancy,
            cmd.mfr_factor,
            cmd.pfr_factor,
        )
        .await?;

        // 3. Create aggregate
        let entry = CarePlanEntry::new(EntryId::new(), cmd.plan_id, details, costs)?;

        // 4. Persist
        self.repository.save(&entry).await?;

        tracing::info!(
            entry_id = %entry.id(),
            plan_id = %entry.plan_id(),
            category = %entry.category(),
            lifetime = %entry.costs().lifetime_cost,
            "Created care plan entry"
        );

        Ok(CreateEntryResult { entry, warnings })
    }
}
