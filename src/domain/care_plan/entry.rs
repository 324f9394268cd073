//! Care plan entry aggregate.
//!
//! An entry is one line item of a life care plan: the user-supplied inputs
//! (what, how often, for which ages, at what rate) plus the costs derived
//! from them. Costs are never edited directly; they are recomputed whenever
//! the inputs change.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CareCategory, EntryDefaults};
use crate::domain::costing::{validate_age_increments, AgeIncrement, CalculatedCosts, CostRange, GeoFactors, MAX_AGE};
use crate::domain::foundation::{EntryId, PlanId, Timestamp, ValidationError, MAX_AMOUNT};

/// Maximum length for an item description.
pub const MAX_ITEM_LENGTH: usize = 500;

static CPT_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").expect("CPT pattern is valid"));
pub(super) static ZIP_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("ZIP pattern is valid"));

/// User-supplied inputs of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDetails {
    pub category: CareCategory,
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
}

impl EntryDetails {
    /// Checks the inputs. Returns non-fatal warnings on success.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `item` is blank
    /// - `OutOfRange` for ages outside `0..=120`, `end_age < start_age`, or a
    ///   base rate outside `0..=MAX_AMOUNT`
    /// - `InvalidFormat` for inconsistent age bands
    pub fn validate(&self) -> Result<Vec<String>, ValidationError> {
        let item = self.item.trim();
        if item.is_empty() {
            return Err(ValidationError::empty_field("item"));
        }
        if item.len() > MAX_ITEM_LENGTH {
            return Err(ValidationError::out_of_range("item", 1, MAX_ITEM_LENGTH, item.len()));
        }
        if self.end_age > MAX_AGE {
            return Err(ValidationError::out_of_range("end_age", 0, MAX_AGE, self.end_age));
        }
        if self.start_age > self.end_age {
            return Err(ValidationError::out_of_range(
                "start_age",
                0,
                self.end_age,
                self.start_age,
            ));
        }
        if self.base_rate < Decimal::ZERO || self.base_rate > MAX_AMOUNT {
            return Err(ValidationError::out_of_range("base_rate", 0, MAX_AMOUNT, self.base_rate));
        }
        if self.base_rate.is_zero() && self.cpt_code.is_none() {
            return Err(ValidationError::invalid_format(
                "base_rate",
                "must be positive when no CPT code is given",
            ));
        }

        let mut warnings = Vec::new();
        if self.use_age_increments {
            if self.age_increments.is_empty() {
                return Err(ValidationError::empty_field("age_increments"));
            }
            warnings.extend(validate_age_increments(&self.age_increments)?);
        }
        if let Some(code) = &self.cpt_code {
            if !CPT_CODE.is_match(code) {
                warnings.push(format!("CPT code '{}' is not a 5-digit code", code));
            }
        }
        if let Some(zip) = &self.zip_code {
            if !ZIP_CODE.is_match(zip) {
                warnings.push(format!("ZIP code '{}' is not in 12345 or 12345-6789 form", zip));
            }
        }
        Ok(warnings)
    }

    /// The age bands to price, if age-banded pricing is on.
    pub fn pricing_increments(&self) -> &[AgeIncrement] {
        if self.use_age_increments {
            &self.age_increments
        } else {
            &[]
        }
    }
}

/// Entry inputs as requested. Ages and ZIP code left out are filled from
/// the plan by [`EntryDraft::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub category: CareCategory,
    pub item: String,
    pub frequency: String,
    pub cpt_code: Option<String>,
    pub cpt_description: Option<String>,
    pub start_age: Option<u32>,
    pub end_age: Option<u32>,
    pub is_one_time: bool,
    pub base_rate: Decimal,
    pub zip_code: Option<String>,
    pub use_age_increments: bool,
    pub age_increments: Vec<AgeIncrement>,
}

impl EntryDraft {
    /// Fills missing ages and ZIP code. A defaulted end age never precedes
    /// the start age.
    pub fn resolve(self, defaults: &EntryDefaults) -> EntryDetails {
        let start_age = self.start_age.unwrap_or(defaults.start_age);
        let end_age = self
            .end_age
            .unwrap_or_else(|| defaults.end_age.max(start_age));
        EntryDetails {
            category: self.category,
            item: self.item,
            frequency: self.frequency,
            cpt_code: self.cpt_code,
            cpt_description: self.cpt_description,
            start_age,
            end_age,
            is_one_time: self.is_one_time,
            base_rate: self.base_rate,
            zip_code: self.zip_code.or_else(|| defaults.zip_code.clone()),
            use_age_increments: self.use_age_increments,
            age_increments: self.age_increments,
        }
    }
}

impl From<EntryDetails> for EntryDraft {
    fn from(details: EntryDetails) -> Self {
        Self {
            category: details.category,
            item: details.item,
            frequency: details.frequency,
            cpt_code: details.cpt_code,
            cpt_description: details.cpt_description,
            start_age: Some(details.start_age),
            end_age: Some(details.end_age),
            is_one_time: details.is_one_time,
            base_rate: details.base_rate,
            zip_code: details.zip_code,
            use_age_increments: details.use_age_increments,
            age_increments: details.age_increments,
        }
    }
}

/// Costs derived from an entry's inputs, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCosts {
    /// Per-occurrence range (min/avg/max cost).
    pub per_occurrence: CostRange,
    pub annual_cost: Decimal,
    pub lifetime_cost: Decimal,
    pub lifetime_low: Decimal,
    pub lifetime_high: Decimal,
    pub min_frequency: Decimal,
    pub max_frequency: Decimal,
    pub min_duration: Decimal,
    pub max_duration: Decimal,
    /// Geographic factors that were applied.
    pub mfr_adjusted: Decimal,
    pub pfr_adjusted: Decimal,
    pub is_one_time: bool,
}

impl EntryCosts {
    pub fn from_calculation(costs: &CalculatedCosts, factors: &GeoFactors) -> Self {
        let (min_duration, max_duration) = match &costs.duration {
            Some(d) => (d.low_duration_years, d.high_duration_years),
            None => (Decimal::ZERO, Decimal::ZERO),
        };
        Self {
            per_occurrence: costs.per_occurrence,
            annual_cost: costs.annual,
            lifetime_cost: costs.lifetime,
            lifetime_low: costs.low,
            lifetime_high: costs.high,
            min_frequency: costs.frequency.low_frequency_per_year,
            max_frequency: costs.frequency.high_frequency_per_year,
            min_duration,
            max_duration,
            mfr_adjusted: factors.mfr_factor,
            pfr_adjusted: factors.pfr_factor,
            is_one_time: costs.is_one_time,
        }
    }

    /// Lifetime low/average/high.
    pub fn lifetime_range(&self) -> CostRange {
        CostRange {
            low: self.lifetime_low,
            average: self.lifetime_cost,
            high: self.lifetime_high,
        }
    }
}

/// Care plan entry aggregate.
///
/// # Invariants
///
/// - `details` passed [`EntryDetails::validate`]
/// - `costs` were computed from `details`
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarePlanEntry {
    id: EntryId,
    plan_id: PlanId,
    details: EntryDetails,
    costs: EntryCosts,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl CarePlanEntry {
    /// Creates a new entry.
    ///
    /// # Errors
    ///
    /// Any error from [`EntryDetails::validate`].
    pub fn new(
        id: EntryId,
        plan_id: PlanId,
        details: EntryDetails,
        costs: EntryCosts,
    ) -> Result<Self, ValidationError> {
        details.validate()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            plan_id,
            details,
            costs,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an entry from persistence (no validation).
    pub fn reconstitute(
        id: EntryId,
        plan_id: PlanId,
        details: EntryDetails,
        costs: EntryCosts,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            plan_id,
            details,
            costs,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    pub fn details(&self) -> &EntryDetails {
        &self.details
    }

    pub fn costs(&self) -> &EntryCosts {
        &self.costs
    }

    pub fn category(&self) -> CareCategory {
        self.details.category
    }

    pub fn is_one_time(&self) -> bool {
        self.costs.is_one_time
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the inputs and their recomputed costs.
    ///
    /// # Errors
    ///
    /// Any error from [`EntryDetails::validate`]; the entry is unchanged.
    pub fn revise(&mut self, details: EntryDetails, costs: EntryCosts) -> Result<(), ValidationError> {
        details.validate()?;
        self.details = details;
        self.costs = costs;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::costing::{CostCalculator, CostInputs, DurationContext};

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    pub(crate) fn sample_details() -> EntryDetails {
        EntryDetails {
            category: CareCategory::TherapyFollowUp,
            item: "Physical therapy".to_string(),
            frequency: "2x per month".to_string(),
            cpt_code: Some("97110".to_string()),
            cpt_description: None,
            start_age: 45,
            end_age: 55,
            is_one_time: false,
            base_rate: d("120"),
            zip_code: Some("10001".to_string()),
            use_age_increments: false,
            age_increments: Vec::new(),
        }
    }

    pub(crate) fn costs_for(details: &EntryDetails) -> EntryCosts {
        let inputs = CostInputs::new(details.base_rate, details.frequency.clone())
            .one_time(details.is_one_time)
            .with_duration(
                DurationContext::default()
                    .with_age_range(Some(details.start_age), Some(details.end_age)),
            );
        let costs = CostCalculator::new().calculate(&inputs);
        EntryCosts::from_calculation(&costs, &GeoFactors::NEUTRAL)
    }

    #[test]
    fn valid_details_pass() {
        let warnings = sample_details().validate().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn blank_item_is_rejected() {
        let mut details = sample_details();
        details.item = "   ".to_string();
        assert_eq!(details.validate().unwrap_err().field(), "item");
    }

    #[test]
    fn ages_must_be_ordered_and_bounded() {
        let mut details = sample_details();
        details.start_age = 60;
        assert_eq!(details.validate().unwrap_err().field(), "start_age");

        let mut details = sample_details();
        details.end_age = 121;
        assert_eq!(details.validate().unwrap_err().field(), "end_age");
    }

    #[test]
    fn zero_rate_requires_cpt_code() {
        let mut details = sample_details();
        details.base_rate = Decimal::ZERO;
        assert!(details.validate().is_ok());

        details.cpt_code = None;
        assert_eq!(details.validate().unwrap_err().field(), "base_rate");
    }

    #[test]
    fn base_rate_must_fit_cost_columns() {
        let mut details = sample_details();
        details.base_rate = MAX_AMOUNT;
        assert!(details.validate().is_ok());

        details.base_rate = d("10000000000");
        assert_eq!(details.validate().unwrap_err().field(), "base_rate");
    }

    fn defaults() -> EntryDefaults {
        EntryDefaults {
            start_age: 44,
            end_age: 79,
            zip_code: Some("10001".to_string()),
            life_expectancy: None,
        }
    }

    #[test]
    fn draft_fills_missing_ages_and_zip_from_plan() {
        let mut draft = EntryDraft::from(sample_details());
        draft.start_age = None;
        draft.end_age = None;
        draft.zip_code = None;

        let details = draft.resolve(&defaults());

        assert_eq!((details.start_age, details.end_age), (44, 79));
        assert_eq!(details.zip_code.as_deref(), Some("10001"));
    }

    #[test]
    fn draft_keeps_explicit_values() {
        let details = EntryDraft::from(sample_details()).resolve(&defaults());
        assert_eq!(details, sample_details());
    }

    #[test]
    fn defaulted_end_age_follows_late_start() {
        let mut draft = EntryDraft::from(sample_details());
        draft.start_age = Some(90);
        draft.end_age = None;

        let details = draft.resolve(&defaults());

        assert_eq!((details.start_age, details.end_age), (90, 90));
    }

    #[test]
    fn malformed_codes_only_warn() {
        let mut details = sample_details();
        details.cpt_code = Some("G0151".to_string());
        details.zip_code = Some("1000".to_string());
        assert_eq!(details.validate().unwrap().len(), 2);
    }

    #[test]
    fn age_increments_required_when_enabled() {
        let mut details = sample_details();
        details.use_age_increments = true;
        assert_eq!(details.validate().unwrap_err().field(), "age_increments");

        details.age_increments = vec![AgeIncrement::new(45, 50, "weekly")];
        assert!(details.validate().is_ok());
        assert_eq!(details.pricing_increments().len(), 1);
    }

    #[test]
    fn costs_capture_calculation() {
        let details = sample_details();
        let costs = costs_for(&details);
        assert_eq!(costs.annual_cost, d("2880"));
        assert_eq!(costs.lifetime_cost, d("28800"));
        assert_eq!(costs.min_frequency, d("24"));
        assert_eq!(costs.min_duration, d("10"));
        assert_eq!(costs.mfr_adjusted, Decimal::ONE);
    }

    #[test]
    fn revise_replaces_inputs_and_costs() {
        let details = sample_details();
        let mut entry =
            CarePlanEntry::new(EntryId::new(), PlanId::new(), details.clone(), costs_for(&details))
                .unwrap();
        let created = *entry.created_at();

        let mut revised = details;
        revised.frequency = "one-time".to_string();
        let costs = costs_for(&revised);
        entry.revise(revised, costs).unwrap();

        assert!(entry.is_one_time());
        assert_eq!(entry.costs().annual_cost, Decimal::ZERO);
        assert!(*entry.updated_at() >= created);
    }

    #[test]
    fn revise_rejects_invalid_details() {
        let details = sample_details();
        let mut entry =
            CarePlanEntry::new(EntryId::new(), PlanId::new(), details.clone(), costs_for(&details))
                .unwrap();

        let mut bad = details.clone();
        bad.item = String::new();
        assert!(entry.revise(bad, costs_for(&details)).is_err());
        assert_eq!(entry.details().item, "Physical therapy");
    }
}
