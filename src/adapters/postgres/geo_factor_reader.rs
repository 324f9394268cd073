//! PostgreSQL implementation of GeoFactorReader.
//!
//! Reads geographic adjustment factors from the `gaf_lookup` table.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};

use crate::domain::costing::{normalize_zip, GeoFactorLookup, GeoFactors};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::GeoFactorReader;

/// PostgreSQL implementation of GeoFactorReader.
#[derive(Clone)]
pub struct PostgresGeoFactorReader {
    pool: PgPool,
}

impl PostgresGeoFactorReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeoFactorReader for PostgresGeoFactorReader {
    async fn find_by_zip(&self, zip: &str) -> Result<GeoFactorLookup, DomainError> {
        let key = normalize_zip(zip);

        let row = sqlx::query(
            r#"
            SELECT zip, city, state_name, mfr_code, pfr_code
            FROM gaf_lookup
            WHERE zip = $1
            "#,
        )
        .bind(&key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch geographic factors: {}", e),
            )
        })?;

        let Some(row) = row else {
            tracing::debug!(zip = %key, "ZIP code not in GAF table");
            return Ok(GeoFactorLookup::missing(key));
        };

        let mfr: Option<Decimal> = row.try_get("mfr_code").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get mfr_code: {}", e))
        })?;
        let pfr: Option<Decimal> = row.try_get("pfr_code").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get pfr_code: {}", e))
        })?;
        let city: Option<String> = row.try_get("city").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get city: {}", e))
        })?;
        let state_name: Option<String> = row.try_get("state_name").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get state_name: {}", e),
            )
        })?;

        Ok(GeoFactorLookup::found(key, GeoFactors::from_reference(mfr, pfr))
            .with_location(city, state_name))
    }
}
