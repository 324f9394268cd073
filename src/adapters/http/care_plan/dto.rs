//! Request/response DTOs for life care plan and entry endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::care_plan::PlanView;
use crate::domain::care_plan::{
    CareCategory, CarePlanEntry, CategoryTotals, EntryDraft, EvalueeProfile, PlanTotals,
};
use crate::domain::costing::{format_currency, format_range, AgeIncrement, CostRange};

/// Body of POST /api/plans and PUT /api/plans/:plan_id.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub date_of_injury: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    /// Remaining life expectancy in years.
    #[serde(default)]
    pub life_expectancy: Option<Decimal>,
}

impl From<PlanRequest> for EvalueeProfile {
    fn from(req: PlanRequest) -> Self {
        Self {
            first_name: req.first_name.trim().to_string(),
            last_name: req.last_name.trim().to_string(),
            date_of_birth: req.date_of_birth,
            date_of_injury: req.date_of_injury,
            gender: non_blank(req.gender),
            street_address: non_blank(req.street_address),
            city: non_blank(req.city),
            state: non_blank(req.state),
            zip_code: non_blank(req.zip_code),
            life_expectancy: req.life_expectancy,
        }
    }
}

/// A plan with its evaluee and derived ages.
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_injury: Option<NaiveDate>,
    pub gender: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub life_expectancy: Option<Decimal>,
    pub age_today: u32,
    pub age_at_injury: Option<u32>,
    pub projected_age_at_death: Option<Decimal>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PlanView> for PlanResponse {
    fn from(view: &PlanView) -> Self {
        let evaluee = view.plan.evaluee();
        Self {
            id: view.plan.id().to_string(),
            first_name: evaluee.first_name.clone(),
            last_name: evaluee.last_name.clone(),
            full_name: evaluee.full_name(),
            date_of_birth: evaluee.date_of_birth,
            date_of_injury: evaluee.date_of_injury,
            gender: evaluee.gender.clone(),
            street_address: evaluee.street_address.clone(),
            city: evaluee.city.clone(),
            state: evaluee.state.clone(),
            zip_code: evaluee.zip_code.clone(),
            life_expectancy: evaluee.life_expectancy,
            age_today: view.ages.age_today,
            age_at_injury: view.ages.age_at_injury,
            projected_age_at_death: view.ages.projected_age_at_death,
            created_at: view.plan.created_at().to_rfc3339(),
            updated_at: view.plan.updated_at().to_rfc3339(),
        }
    }
}

/// Create/update response: the plan plus validation warnings.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCommandResponse {
    pub plan: PlanResponse,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanListResponse {
    pub plans: Vec<PlanResponse>,
    pub total: usize,
}

impl From<Vec<PlanView>> for PlanListResponse {
    fn from(views: Vec<PlanView>) -> Self {
        let plans: Vec<PlanResponse> = views.iter().map(PlanResponse::from).collect();
        Self {
            total: plans.len(),
            plans,
        }
    }
}

/// Body of POST /api/plans/:plan_id/entries and PUT /api/entries/:id.
///
/// Omitted ages default to the evaluee's age today through the projected
/// age at death; an omitted ZIP code defaults to the evaluee's.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRequest {
    pub category: CareCategory,
    pub item: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub cpt_code: Option<String>,
    #[serde(default)]
    pub cpt_description: Option<String>,
    #[serde(default)]
    pub start_age: Option<u32>,
    #[serde(default)]
    pub end_age: Option<u32>,
    #[serde(default)]
    pub is_one_time: bool,
    #[serde(default)]
    pub base_rate: Decimal,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub use_age_increments: bool,
    #[serde(default)]
    pub age_increments: Vec<AgeIncrement>,
    /// Manual geographic factor overrides.
    #[serde(default)]
    pub mfr_factor: Option<Decimal>,
    #[serde(default)]
    pub pfr_factor: Option<Decimal>,
}

impl EntryRequest {
    /// Splits into entry inputs and the optional factor overrides.
    pub fn into_parts(self) -> (EntryDraft, Option<Decimal>, Option<Decimal>) {
        let draft = EntryDraft {
            category: self.category,
            item: self.item,
            frequency: self.frequency,
            cpt_code: non_blank(self.cpt_code),
            cpt_description: non_blank(self.cpt_description),
            start_age: self.start_age,
            end_age: self.end_age,
            is_one_time: self.is_one_time,
            base_rate: self.base_rate,
            zip_code: non_blank(self.zip_code),
            use_age_increments: self.use_age_increments,
            age_increments: self.age_increments,
        };
        (draft, self.mfr_factor, self.pfr_factor)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// One entry with its stored costs.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub id: String,
    pub plan_id: String,
    pub category: CareCategory,
    pub category_label: String,
    pub item: String,
    pub frequency: String,
    pub cpt_code: Option<String>,
    pub cpt_description: Option<String>,
    pub start_age: u32,
    pub end_age: u32,
    pub is_one_time: bool,
    pub base_rate: Decimal,
    pub zip_code: Option<String>,
    pub use_age_increments: bool,
    pub age_increments: Vec<AgeIncrement>,
    pub min_cost: Decimal,
    pub avg_cost: Decimal,
    pub max_cost: Decimal,
    pub annual_cost: Decimal,
    pub lifetime_cost: Decimal,
    pub lifetime_low: Decimal,
    pub lifetime_high: Decimal,
    pub min_frequency: Decimal,
    pub max_frequency: Decimal,
    pub min_duration: Decimal,
    pub max_duration: Decimal,
    pub mfr_adjusted: Decimal,
    pub pfr_adjusted: Decimal,
    pub lifetime_display: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&CarePlanEntry> for EntryResponse {
    fn from(entry: &CarePlanEntry) -> Self {
        let details = entry.details();
        let costs = entry.costs();
        Self {
            id: entry.id().to_string(),
            plan_id: entry.plan_id().to_string(),
            category: details.category,
            category_label: details.category.label().to_string(),
            item: details.item.clone(),
            frequency: details.frequency.clone(),
            cpt_code: details.cpt_code.clone(),
            cpt_description: details.cpt_description.clone(),
            start_age: details.start_age,
            end_age: details.end_age,
            is_one_time: costs.is_one_time,
            base_rate: details.base_rate,
            zip_code: details.zip_code.clone(),
            use_age_increments: details.use_age_increments,
            age_increments: details.age_increments.clone(),
            min_cost: costs.per_occurrence.low,
            avg_cost: costs.per_occurrence.average,
            max_cost: costs.per_occurrence.high,
            annual_cost: costs.annual_cost,
            lifetime_cost: costs.lifetime_cost,
            lifetime_low: costs.lifetime_low,
            lifetime_high: costs.lifetime_high,
            min_frequency: costs.min_frequency,
            max_frequency: costs.max_frequency,
            min_duration: costs.min_duration,
            max_duration: costs.max_duration,
            mfr_adjusted: costs.mfr_adjusted,
            pfr_adjusted: costs.pfr_adjusted,
            lifetime_display: format_range(&costs.lifetime_range()),
            created_at: entry.created_at().to_rfc3339(),
            updated_at: entry.updated_at().to_rfc3339(),
        }
    }
}

/// Create/update response: the entry plus pricing warnings.
#[derive(Debug, Clone, Serialize)]
pub struct EntryCommandResponse {
    pub entry: EntryResponse,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub total: usize,
}

impl From<Vec<CarePlanEntry>> for EntryListResponse {
    fn from(entries: Vec<CarePlanEntry>) -> Self {
        let entries: Vec<EntryResponse> = entries.iter().map(EntryResponse::from).collect();
        Self {
            total: entries.len(),
            entries,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotalsResponse {
    pub category: CareCategory,
    pub label: String,
    pub entry_count: usize,
    pub annual: Decimal,
    pub one_time: Decimal,
    pub lifetime: CostRange,
    pub lifetime_display: String,
}

impl From<CategoryTotals> for CategoryTotalsResponse {
    fn from(totals: CategoryTotals) -> Self {
        Self {
            label: totals.category.label().to_string(),
            lifetime_display: format_range(&totals.lifetime),
            category: totals.category,
            entry_count: totals.entry_count,
            annual: totals.annual,
            one_time: totals.one_time,
            lifetime: totals.lifetime,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanTotalsResponse {
    pub plan_id: String,
    pub entry_count: usize,
    pub annual: Decimal,
    pub one_time: Decimal,
    pub lifetime: CostRange,
    pub annual_display: String,
    pub lifetime_display: String,
    pub categories: Vec<CategoryTotalsResponse>,
}

impl From<PlanTotals> for PlanTotalsResponse {
    fn from(totals: PlanTotals) -> Self {
        Self {
            plan_id: totals.plan_id.to_string(),
            entry_count: totals.entry_count,
            annual: totals.annual,
            one_time: totals.one_time,
            lifetime: totals.lifetime,
            annual_display: format_currency(totals.annual),
            lifetime_display: format_range(&totals.lifetime),
            categories: totals.categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_request_deserializes_with_defaults() {
        let json = r#"{
            "category": "therapyFollowUp",
            "item": "Physical therapy",
            "frequency": "2x per month",
            "start_age": 45,
            "end_age": 55,
            "base_rate": "120",
            "cpt_code": "  "
        }"#;
        let req: EntryRequest = serde_json::from_str(json).unwrap();
        let (draft, mfr, pfr) = req.into_parts();

        assert_eq!(draft.category, CareCategory::TherapyFollowUp);
        assert_eq!(draft.cpt_code, None);
        assert_eq!(draft.start_age, Some(45));
        assert!(!draft.use_age_increments);
        assert!(mfr.is_none() && pfr.is_none());
    }

    #[test]
    fn entry_request_ages_are_optional() {
        let json = r#"{"category": "medication", "item": "Baclofen", "base_rate": "25"}"#;
        let (draft, _, _) = serde_json::from_str::<EntryRequest>(json).unwrap().into_parts();
        assert_eq!((draft.start_age, draft.end_age), (None, None));
    }

    #[test]
    fn plan_request_parses_dates_and_trims_blanks() {
        let json = r#"{
            "first_name": " Jordan ",
            "last_name": "Reyes",
            "date_of_birth": "1980-06-15",
            "date_of_injury": "2015-03-01",
            "zip_code": "",
            "life_expectancy": "35.5"
        }"#;
        let evaluee: EvalueeProfile = serde_json::from_str::<PlanRequest>(json).unwrap().into();

        assert_eq!(evaluee.first_name, "Jordan");
        assert_eq!(evaluee.date_of_birth, NaiveDate::from_ymd_opt(1980, 6, 15).unwrap());
        assert_eq!(evaluee.zip_code, None);
        assert_eq!(evaluee.life_expectancy, Some(Decimal::new(355, 1)));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let json = r#"{"category": "spa", "item": "x", "start_age": 1, "end_age": 2}"#;
        assert!(serde_json::from_str::<EntryRequest>(json).is_err());
    }
}
