//! Response DTOs for reference data lookups.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::costing::{format_factor, FeeSchedule, GeoFactorLookup, PercentileBands};

/// GAF lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct GeoFactorsResponse {
    pub zip: String,
    pub found: bool,
    pub mfr_factor: Decimal,
    pub pfr_factor: Decimal,
    pub mfr_display: String,
    pub pfr_display: String,
    pub city: Option<String>,
    pub state_name: Option<String>,
}

impl From<GeoFactorLookup> for GeoFactorsResponse {
    fn from(lookup: GeoFactorLookup) -> Self {
        Self {
            mfr_display: format_factor(lookup.factors.mfr_factor, 4),
            pfr_display: format_factor(lookup.factors.pfr_factor, 4),
            zip: lookup.zip,
            found: lookup.found,
            mfr_factor: lookup.factors.mfr_factor,
            pfr_factor: lookup.factors.pfr_factor,
            city: lookup.city,
            state_name: lookup.state_name,
        }
    }
}

/// Percentile amounts of one source.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileBandsResponse {
    pub p50: Option<Decimal>,
    pub p75: Option<Decimal>,
    pub p90: Option<Decimal>,
}

impl From<PercentileBands> for PercentileBandsResponse {
    fn from(bands: PercentileBands) -> Self {
        Self {
            p50: bands.p50,
            p75: bands.p75,
            p90: bands.p90,
        }
    }
}

/// CPT lookup result.
#[derive(Debug, Clone, Serialize)]
pub struct FeeScheduleResponse {
    pub code: String,
    pub description: Option<String>,
    pub mfu: PercentileBandsResponse,
    pub pfr: PercentileBandsResponse,
    /// Whether the bands can price the code.
    pub has_bands: bool,
}

impl From<FeeSchedule> for FeeScheduleResponse {
    fn from(schedule: FeeSchedule) -> Self {
        Self {
            has_bands: schedule.has_bands(),
            code: schedule.code,
            description: schedule.description,
            mfu: schedule.mfu.into(),
            pfr: schedule.pfr.into(),
        }
    }
}
