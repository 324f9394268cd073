//! In-memory reference data: fee schedules and geographic factors.
//!
//! Seeded programmatically or from a YAML file:
//!
//! ```yaml
//! fee_schedules:
//!   - code: "97110"
//!     description: Therapeutic exercise
//!     mfu_50th: 40
//!     mfu_75th: 55
//!     pfr_50th: 90
//!     pfr_75th: 120
//! geo_factors:
//!   - zip: "10001"
//!     city: New York
//!     state_name: NY
//!     mfr_code: 1.1
//!     pfr_code: 1.2
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::domain::costing::{
    normalize_zip, FeeSchedule, GeoFactorLookup, GeoFactors, PercentileBands,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{FeeScheduleReader, GeoFactorReader};

/// One `cpt_codes` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeScheduleRecord {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub mfu_50th: Option<Decimal>,
    #[serde(default)]
    pub mfu_75th: Option<Decimal>,
    #[serde(default)]
    pub mfu_90th: Option<Decimal>,
    #[serde(default)]
    pub pfr_50th: Option<Decimal>,
    #[serde(default)]
    pub pfr_75th: Option<Decimal>,
    #[serde(default)]
    pub pfr_90th: Option<Decimal>,
}

impl FeeScheduleRecord {
    fn into_schedule(self) -> FeeSchedule {
        let schedule = FeeSchedule::new(
            self.code,
            PercentileBands::new(self.mfu_50th, self.mfu_75th, self.mfu_90th),
            PercentileBands::new(self.pfr_50th, self.pfr_75th, self.pfr_90th),
        );
        match self.description {
            Some(description) => schedule.with_description(description),
            None => schedule,
        }
    }
}

/// One `gaf_lookup` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoFactorRecord {
    pub zip: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state_name: Option<String>,
    #[serde(default)]
    pub mfr_code: Option<Decimal>,
    #[serde(default)]
    pub pfr_code: Option<Decimal>,
}

/// Contents of a reference data seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDataSeed {
    #[serde(default)]
    pub fee_schedules: Vec<FeeScheduleRecord>,
    #[serde(default)]
    pub geo_factors: Vec<GeoFactorRecord>,
}

impl ReferenceDataSeed {
    /// Parses a seed from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml).map_err(|e| {
            DomainError::new(
                ErrorCode::ReferenceDataError,
                format!("Invalid reference data: {}", e),
            )
        })
    }

    /// Reads and parses a YAML seed file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::ReferenceDataError,
                format!("Failed to read reference data {}: {}", path.display(), e),
            )
        })?;
        Self::from_yaml(&yaml)
    }
}

/// In-memory fee schedule table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeeScheduleReader {
    schedules: Arc<RwLock<HashMap<String, FeeSchedule>>>,
}

impl InMemoryFeeScheduleReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<FeeScheduleRecord>) -> Self {
        let schedules: HashMap<String, FeeSchedule> = records
            .into_iter()
            .map(|r| (r.code.trim().to_string(), r.into_schedule()))
            .collect();
        Self {
            schedules: Arc::new(RwLock::new(schedules)),
        }
    }

    pub async fn insert(&self, schedule: FeeSchedule) {
        self.schedules
            .write()
            .await
            .insert(schedule.code.clone(), schedule);
    }
}

#[async_trait]
impl FeeScheduleReader for InMemoryFeeScheduleReader {
    async fn find_by_code(&self, code: &str) -> Result<Option<FeeSchedule>, DomainError> {
        Ok(self.schedules.read().await.get(code.trim()).cloned())
    }
}

/// In-memory GAF table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGeoFactorReader {
    factors: Arc<RwLock<HashMap<String, GeoFactorRecord>>>,
}

impl InMemoryGeoFactorReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<GeoFactorRecord>) -> Self {
        let factors: HashMap<String, GeoFactorRecord> = records
            .into_iter()
            .map(|r| (normalize_zip(&r.zip), r))
            .collect();
        Self {
            factors: Arc::new(RwLock::new(factors)),
        }
    }

    pub async fn insert(&self, record: GeoFactorRecord) {
        self.factors.write().await.insert(normalize_zip(&record.zip), record);
    }
}

#[async_trait]
impl GeoFactorReader for InMemoryGeoFactorReader {
    async fn find_by_zip(&self, zip: &str) -> Result<GeoFactorLookup, DomainError> {
        let key = normalize_zip(zip);
        let factors = self.factors.read().await;
        Ok(match factors.get(&key) {
            Some(record) => GeoFactorLookup::found(
                key,
                GeoFactors::from_reference(record.mfr_code, record.pfr_code),
            )
            .with_location(record.city.clone(), record.state_name.clone()),
            None => GeoFactorLookup::missing(key),
        })
    }
}

/// Builds both readers from one seed.
pub fn readers_from_seed(seed: ReferenceDataSeed) -> (InMemoryFeeScheduleReader, InMemoryGeoFactorReader) {
    tracing::info!(
        fee_schedules = seed.fee_schedules.len(),
        geo_factors = seed.geo_factors.len(),
        "Loaded in-memory reference data"
    );
    (
        InMemoryFeeScheduleReader::from_records(seed.fee_schedules),
        InMemoryGeoFactorReader::from_records(seed.geo_factors),
    )
}
