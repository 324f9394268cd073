//! Reference data queries: geographic factors and CPT fee schedules.

use std::sync::Arc;

use crate::domain::care_plan::CarePlanError;
use crate::domain::costing::{FeeSchedule, GeoFactorLookup};
use crate::ports::{FeeScheduleReader, GeoFactorReader};

/// Query for the factors of one ZIP code.
#[derive(Debug, Clone)]
pub struct GetGeoFactorsQuery {
    pub zip: String,
}

/// Handler for GAF lookups. A miss is a successful lookup with
/// `found = false`.
pub struct GetGeoFactorsHandler {
    reader: Arc<dyn GeoFactorReader>,
}

impl GetGeoFactorsHandler {
    pub fn new(reader: Arc<dyn GeoFactorReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetGeoFactorsQuery) -> Result<GeoFactorLookup, CarePlanError> {
        let zip = query.zip.trim();
        if zip.is_empty() {
            return Err(CarePlanError::validation("zip", "cannot be empty"));
        }
        Ok(self.reader.find_by_zip(zip).await?)
    }
}

/// Query for the fee schedule of one CPT code.
#[derive(Debug, Clone)]
pub struct GetFeeScheduleQuery {
    pub code: String,
}

/// Handler for CPT lookups. Returns `None` for unknown codes.
pub struct GetFeeScheduleHandler {
    reader: Arc<dyn FeeScheduleReader>,
}

impl GetFeeScheduleHandler {
    pub fn new(reader: Arc<dyn FeeScheduleReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetFeeScheduleQuery) -> Result<Option<FeeSchedule>, CarePlanError> {
        let code = query.code.trim();
        if code.is_empty() {
            return Err(CarePlanError::validation("code", "cannot be empty"));
        }
        Ok(self.reader.find_by_code(code).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryFeeScheduleReader, InMemoryGeoFactorReader};

    #[tokio::test]
    async fn geo_miss_is_not_an_error() {
        let handler = GetGeoFactorsHandler::new(Arc::new(InMemoryGeoFactorReader::new()));
        let lookup = handler
            .handle(GetGeoFactorsQuery { zip: "10001".to_string() })
            .await
            .unwrap();
        assert!(!lookup.found);
    }

    #[tokio::test]
    async fn blank_zip_is_rejected() {
        let handler = GetGeoFactorsHandler::new(Arc::new(InMemoryGeoFactorReader::new()));
        let err = handler
            .handle(GetGeoFactorsQuery { zip: "  ".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, CarePlanError::ValidationFailed { .. }));
    }

    #[tokio::test]
    async fn unknown_code_is_none() {
        let handler = GetFeeScheduleHandler::new(Arc::new(InMemoryFeeScheduleReader::new()));
        let schedule = handler
            .handle(GetFeeScheduleQuery { code: "97110".to_string() })
            .await
            .unwrap();
        assert!(schedule.is_none());
    }
}
