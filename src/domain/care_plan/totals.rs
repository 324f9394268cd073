//! Plan-level cost totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CareCategory, CarePlanEntry};
use crate::domain::costing::CostRange;
use crate::domain::foundation::PlanId;

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub category: CareCategory,
    pub entry_count: usize,
    /// Sum of annual costs of recurring entries.
    pub annual: Decimal,
    /// Sum of lifetime costs of one-time entries.
    pub one_time: Decimal,
    /// Lifetime low/average/high across all entries.
    pub lifetime: CostRange,
}

impl CategoryTotals {
    fn empty(category: CareCategory) -> Self {
        Self {
            category,
            entry_count: 0,
            annual: Decimal::ZERO,
            one_time: Decimal::ZERO,
            lifetime: CostRange::ZERO,
        }
    }

    fn add(&mut self, entry: &CarePlanEntry) {
        let costs = entry.costs();
        self.entry_count += 1;
        if entry.is_one_time() {
            self.one_time += costs.lifetime_cost;
        } else {
            self.annual += costs.annual_cost;
        }
        self.lifetime = self.lifetime.add(&costs.lifetime_range());
    }
}

/// Totals across every entry of a plan.
///
/// One-time amounts count toward the lifetime total but never toward the
/// annual total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTotals {
    pub plan_id: PlanId,
    pub entry_count: usize,
    pub annual: Decimal,
    pub one_time: Decimal,
    pub lifetime: CostRange,
    /// Non-empty categories in report order.
    pub categories: Vec<CategoryTotals>,
}

impl PlanTotals {
    pub fn from_entries(plan_id: PlanId, entries: &[CarePlanEntry]) -> Self {
        let mut by_category: BTreeMap<CareCategory, CategoryTotals> = BTreeMap::new();
        for entry in entries {
            by_category
                .entry(entry.category())
                .or_insert_with(|| CategoryTotals::empty(entry.category()))
                .add(entry);
        }

        let categories: Vec<CategoryTotals> = by_category.into_values().collect();
        let annual = categories.iter().map(|c| c.annual).sum();
        let one_time = categories.iter().map(|c| c.one_time).sum();
        let lifetime = categories
            .iter()
            .fold(CostRange::ZERO, |acc, c| acc.add(&c.lifetime));

        Self {
            plan_id,
            entry_count: entries.len(),
            annual,
            one_time,
            lifetime,
            categories,
        }
    }
}
