//! Care categories used to group plan entries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The closed set of life care plan categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CareCategory {
    PhysicianEvaluation,
    PhysicianFollowUp,
    TherapyEvaluation,
    TherapyFollowUp,
    Medication,
    Surgical,
    Dme,
    Supplies,
    HomeCare,
    HomeModification,
    Transportation,
    Interventional,
    Diagnostics,
}

impl CareCategory {
    /// All categories in report order.
    pub const ALL: [CareCategory; 13] = [
        CareCategory::PhysicianEvaluation,
        CareCategory::PhysicianFollowUp,
        CareCategory::TherapyEvaluation,
        CareCategory::TherapyFollowUp,
        CareCategory::Medication,
        CareCategory::Surgical,
        CareCategory::Dme,
        CareCategory::Supplies,
        CareCategory::HomeCare,
        CareCategory::HomeModification,
        CareCategory::Transportation,
        CareCategory::Interventional,
        CareCategory::Diagnostics,
    ];

    /// Stored and serialized identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CareCategory::PhysicianEvaluation => "physicianEvaluation",
            CareCategory::PhysicianFollowUp => "physicianFollowUp",
            CareCategory::TherapyEvaluation => "therapyEvaluation",
            CareCategory::TherapyFollowUp => "therapyFollowUp",
            CareCategory::Medication => "medication",
            CareCategory::Surgical => "surgical",
            CareCategory::Dme => "dme",
            CareCategory::Supplies => "supplies",
            CareCategory::HomeCare => "homeCare",
            CareCategory::HomeModification => "homeModification",
            CareCategory::Transportation => "transportation",
            CareCategory::Interventional => "interventional",
            CareCategory::Diagnostics => "diagnostics",
        }
    }

    /// Human-readable label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            CareCategory::PhysicianEvaluation => "Physician Evaluation",
            CareCategory::PhysicianFollowUp => "Physician Follow-Up",
            CareCategory::TherapyEvaluation => "Therapy Evaluation",
            CareCategory::TherapyFollowUp => "Therapy Follow-Up",
            CareCategory::Medication => "Medication",
            CareCategory::Surgical => "Surgical",
            CareCategory::Dme => "Durable Medical Equipment",
            CareCategory::Supplies => "Supplies",
            CareCategory::HomeCare => "Home Care",
            CareCategory::HomeModification => "Home Modification",
            CareCategory::Transportation => "Transportation",
            CareCategory::Interventional => "Interventional",
            CareCategory::Diagnostics => "Diagnostics",
        }
    }
}

impl fmt::Display for CareCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CareCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CareCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("category", format!("unknown category '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_identifier() {
        for category in CareCategory::ALL {
            assert_eq!(category.as_str().parse::<CareCategory>().unwrap(), category);
        }
    }

    #[test]
    fn serializes_as_camel_case() {
        let json = serde_json::to_string(&CareCategory::HomeModification).unwrap();
        assert_eq!(json, "\"homeModification\"");
        let parsed: CareCategory = serde_json::from_str("\"dme\"").unwrap();
        assert_eq!(parsed, CareCategory::Dme);
    }

    #[test]
    fn rejects_unknown_category() {
        let err = "spa".parse::<CareCategory>().unwrap_err();
        assert_eq!(err.field(), "category");
    }
}
