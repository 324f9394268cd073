//! CPT fee schedule percentile bands.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CostRange, GeoFactors};
use crate::domain::foundation::mean;

/// 50th/75th/90th percentile amounts for one reference source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PercentileBands {
    pub p50: Option<Decimal>,
    pub p75: Option<Decimal>,
    pub p90: Option<Decimal>,
}

impl PercentileBands {
    pub fn new(p50: Option<Decimal>, p75: Option<Decimal>, p90: Option<Decimal>) -> Self {
        Self { p50, p75, p90 }
    }

    /// The (50th, 75th) pair when both are present. The 90th band is
    /// informational and never priced.
    fn priced_pair(&self) -> Option<(Decimal, Decimal)> {
        Some((self.p50?, self.p75?))
    }

    /// The 50th..75th range scaled by `factor`.
    pub fn adjusted(&self, factor: Decimal) -> Option<CostRange> {
        self.priced_pair()
            .map(|(p50, p75)| CostRange::from_bounds(p50 * factor, p75 * factor))
    }
}

/// Fee reference data for a single CPT code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub code: String,
    pub description: Option<String>,
    /// Medicare fee reference amounts (MFU).
    pub mfu: PercentileBands,
    /// Professional fee reference amounts (PFR).
    pub pfr: PercentileBands,
}

impl FeeSchedule {
    pub fn new(code: impl Into<String>, mfu: PercentileBands, pfr: PercentileBands) -> Self {
        Self {
            code: code.into(),
            description: None,
            mfu,
            pfr,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when at least one source has a usable 50th/75th pair.
    pub fn has_bands(&self) -> bool {
        self.mfu.priced_pair().is_some() || self.pfr.priced_pair().is_some()
    }

    /// Per-occurrence cost range after geographic adjustment.
    ///
    /// With both sources the low bound is the mean of the adjusted 50th
    /// percentiles and the high bound the mean of the adjusted 75th
    /// percentiles. With one source, that source's bands are scaled by its
    /// own factor. Returns `None` when neither source has bands.
    pub fn adjusted_range(&self, factors: &GeoFactors) -> Option<CostRange> {
        match (self.mfu.priced_pair(), self.pfr.priced_pair()) {
            (Some((mfu50, mfu75)), Some((pfr50, pfr75))) => {
                let low = mean(mfu50 * factors.mfr_factor, pfr50 * factors.pfr_factor);
                let high = mean(mfu75 * factors.mfr_factor, pfr75 * factors.pfr_factor);
                Some(CostRange::from_bounds(low, high))
            }
            (Some(_), None) => self.mfu.adjusted(factors.mfr_factor),
            (None, Some(_)) => self.pfr.adjusted(factors.pfr_factor),
            (None, None) => None,
        }
    }
}
