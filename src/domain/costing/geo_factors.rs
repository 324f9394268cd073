//! Geographic adjustment factors (GAF).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{mean, ValidationError};

/// Upper bound accepted for a manually entered factor.
pub const MAX_MANUAL_FACTOR: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Multiplicative adjustment pair for a location.
///
/// `mfr_factor` scales Medicare fee reference (MFU) amounts and
/// `pfr_factor` scales professional fee reference (PFR) amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoFactors {
    pub mfr_factor: Decimal,
    pub pfr_factor: Decimal,
}

impl GeoFactors {
    /// Factors that leave every amount unchanged.
    pub const NEUTRAL: Self = Self {
        mfr_factor: Decimal::ONE,
        pfr_factor: Decimal::ONE,
    };

    /// Creates factors, rejecting values outside (0, 5].
    ///
    /// Used for user-supplied overrides; reference data goes through
    /// [`GeoFactors::from_reference`].
    pub fn manual(mfr_factor: Decimal, pfr_factor: Decimal) -> Result<Self, ValidationError> {
        validate_factor("mfr_factor", mfr_factor)?;
        validate_factor("pfr_factor", pfr_factor)?;
        Ok(Self {
            mfr_factor,
            pfr_factor,
        })
    }

    /// Builds factors from reference table columns.
    ///
    /// A missing or non-positive column falls back to the neutral 1.0.
    pub fn from_reference(mfr_factor: Option<Decimal>, pfr_factor: Option<Decimal>) -> Self {
        let positive_or_one = |v: Option<Decimal>| match v {
            Some(v) if v > Decimal::ZERO => v,
            _ => Decimal::ONE,
        };
        Self {
            mfr_factor: positive_or_one(mfr_factor),
            pfr_factor: positive_or_one(pfr_factor),
        }
    }

    /// Mean of the two factors, applied to base rates without fee bands.
    pub fn average(&self) -> Decimal {
        mean(self.mfr_factor, self.pfr_factor)
    }

    /// True when both factors are exactly 1.
    pub fn is_neutral(&self) -> bool {
        self.mfr_factor == Decimal::ONE && self.pfr_factor == Decimal::ONE
    }
}

impl Default for GeoFactors {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

fn validate_factor(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO || value > MAX_MANUAL_FACTOR {
        return Err(ValidationError::out_of_range(field, "0 (exclusive)", MAX_MANUAL_FACTOR, value));
    }
    Ok(())
}

/// Key used by the GAF table: the 5-digit ZIP, with any ZIP+4 suffix
/// dropped.
pub fn normalize_zip(zip: &str) -> String {
    let zip = zip.trim();
    match zip.split_once('-') {
        Some((five, _)) => five.to_string(),
        None => zip.to_string(),
    }
}

/// Result of a GAF lookup.
///
/// A miss still carries usable (neutral) factors; `found` lets the caller
/// prompt for a manual override instead of silently using 1.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoFactorLookup {
    pub zip: String,
    pub factors: GeoFactors,
    pub found: bool,
    pub city: Option<String>,
    pub state_name: Option<String>,
}

impl GeoFactorLookup {
    /// A hit against the reference table.
    pub fn found(zip: impl Into<String>, factors: GeoFactors) -> Self {
        Self {
            zip: zip.into(),
            factors,
            found: true,
            city: None,
            state_name: None,
        }
    }

    /// A miss; factors default to neutral.
    pub fn missing(zip: impl Into<String>) -> Self {
        Self {
            zip: zip.into(),
            factors: GeoFactors::NEUTRAL,
            found: false,
            city: None,
            state_name: None,
        }
    }

    /// Attaches the location names from the reference row.
    pub fn with_location(mut self, city: Option<String>, state_name: Option<String>) -> Self {
        self.city = city;
        self.state_name = state_name;
        self
    }
}
