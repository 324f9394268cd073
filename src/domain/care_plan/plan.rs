//! Life care plan aggregate.
//!
//! A plan covers one evaluee. Entries belong to a plan by ID and take their
//! default age range, ZIP code and remaining life expectancy from it. Ages
//! are always derived from dates against a caller-supplied "today", so the
//! derivations stay deterministic in tests.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::ZIP_CODE;
use crate::domain::costing::MAX_AGE;
use crate::domain::foundation::{PlanId, Timestamp, ValidationError};

/// Maximum length for a first or last name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Whole years completed between `date_of_birth` and `on`.
///
/// The year count drops by one until the birthday has passed in the year
/// of `on`. Dates before birth give zero.
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> u32 {
    let mut years = on.year() - date_of_birth.year();
    if (on.month(), on.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Who the plan is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalueeProfile {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_injury: Option<NaiveDate>,
    pub gender: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    /// Remaining life expectancy in years.
    pub life_expectancy: Option<Decimal>,
}

impl EvalueeProfile {
    /// Checks the profile as of `today`. Returns non-fatal warnings.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank first or last name
    /// - `OutOfRange` for an overlong name, an age above 120, or a life
    ///   expectancy outside `(0, 120]`
    /// - `InvalidFormat` for a birth date in the future or an injury date
    ///   outside birth..=today
    pub fn validate(&self, today: NaiveDate) -> Result<Vec<String>, ValidationError> {
        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            let value = value.trim();
            if value.is_empty() {
                return Err(ValidationError::empty_field(field));
            }
            if value.len() > MAX_NAME_LENGTH {
                return Err(ValidationError::out_of_range(field, 1, MAX_NAME_LENGTH, value.len()));
            }
        }

        if self.date_of_birth > today {
            return Err(ValidationError::invalid_format(
                "date_of_birth",
                "must not be in the future",
            ));
        }
        let age = age_on(self.date_of_birth, today);
        if age > MAX_AGE {
            return Err(ValidationError::out_of_range("date_of_birth", 0, MAX_AGE, age));
        }

        if let Some(injury) = self.date_of_injury {
            if injury < self.date_of_birth || injury > today {
                return Err(ValidationError::invalid_format(
                    "date_of_injury",
                    "must fall between the date of birth and today",
                ));
            }
        }

        if let Some(le) = self.life_expectancy {
            if le <= Decimal::ZERO || le > Decimal::from(MAX_AGE) {
                return Err(ValidationError::out_of_range("life_expectancy", 0, MAX_AGE, le));
            }
        }

        let mut warnings = Vec::new();
        if let Some(zip) = &self.zip_code {
            if !ZIP_CODE.is_match(zip) {
                warnings.push(format!("ZIP code '{}' is not in 12345 or 12345-6789 form", zip));
            }
        }
        Ok(warnings)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Ages derived from the evaluee's dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeProfile {
    pub age_today: u32,
    pub age_at_injury: Option<u32>,
    /// Age today plus remaining life expectancy.
    pub projected_age_at_death: Option<Decimal>,
}

/// Values an entry falls back to when its request leaves them out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDefaults {
    pub start_age: u32,
    pub end_age: u32,
    pub zip_code: Option<String>,
    /// The plan's remaining life expectancy, when it records one.
    pub life_expectancy: Option<Decimal>,
}

/// Life care plan aggregate.
///
/// # Invariants
///
/// - `evaluee` passed [`EvalueeProfile::validate`] when last written
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeCarePlan {
    id: PlanId,
    evaluee: EvalueeProfile,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl LifeCarePlan {
    /// Creates a new plan.
    ///
    /// # Errors
    ///
    /// Any error from [`EvalueeProfile::validate`].
    pub fn new(
        id: PlanId,
        evaluee: EvalueeProfile,
        today: NaiveDate,
    ) -> Result<(Self, Vec<String>), ValidationError> {
        let warnings = evaluee.validate(today)?;
        let now = Timestamp::now();
        let plan = Self {
            id,
            evaluee,
            created_at: now,
            updated_at: now,
        };
        Ok((plan, warnings))
    }

    /// Reconstitute a plan from persistence (no validation).
    pub fn reconstitute(
        id: PlanId,
        evaluee: EvalueeProfile,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            evaluee,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn evaluee(&self) -> &EvalueeProfile {
        &self.evaluee
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derivations
    // ─────────────────────────────────────────────────────────────────────────

    pub fn age_profile(&self, today: NaiveDate) -> AgeProfile {
        let age_today = age_on(self.evaluee.date_of_birth, today);
        AgeProfile {
            age_today,
            age_at_injury: self
                .evaluee
                .date_of_injury
                .map(|injury| age_on(self.evaluee.date_of_birth, injury)),
            projected_age_at_death: self
                .evaluee
                .life_expectancy
                .map(|le| Decimal::from(age_today) + le),
        }
    }

    /// Entry defaults as of `today`: from the current age to the projected
    /// age at death, floored and capped at 120. `fallback_life_expectancy`
    /// applies when the plan records none.
    pub fn entry_defaults(&self, today: NaiveDate, fallback_life_expectancy: Decimal) -> EntryDefaults {
        let start_age = age_on(self.evaluee.date_of_birth, today).min(MAX_AGE);
        let remaining = self.evaluee.life_expectancy.unwrap_or(fallback_life_expectancy);
        let end_age = (Decimal::from(start_age) + remaining)
            .floor()
            .to_u32()
            .unwrap_or(MAX_AGE)
            .clamp(start_age, MAX_AGE);

        EntryDefaults {
            start_age,
            end_age,
            zip_code: self.evaluee.zip_code.clone(),
            life_expectancy: self.evaluee.life_expectancy,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the evaluee profile.
    ///
    /// # Errors
    ///
    /// Any error from [`EvalueeProfile::validate`]; the plan is unchanged.
    pub fn revise(&mut self, evaluee: EvalueeProfile, today: NaiveDate) -> Result<Vec<String>, ValidationError> {
        let warnings = evaluee.validate(today)?;
        self.evaluee = evaluee;
        self.updated_at = Timestamp::now();
        Ok(warnings)
    }
}
