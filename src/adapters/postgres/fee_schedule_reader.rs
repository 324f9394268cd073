//! PostgreSQL implementation of FeeScheduleReader.
//!
//! Reads CPT percentile bands from the `cpt_codes` reference table.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::costing::{FeeSchedule, PercentileBands};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::FeeScheduleReader;

/// PostgreSQL implementation of FeeScheduleReader.
#[derive(Clone)]
pub struct PostgresFeeScheduleReader {
    pool: PgPool,
}

impl PostgresFeeScheduleReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeeScheduleReader for PostgresFeeScheduleReader {
    async fn find_by_code(&self, code: &str) -> Result<Option<FeeSchedule>, DomainError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT code, code_description,
                   mfu_50th, mfu_75th, mfu_90th,
                   pfr_50th, pfr_75th, pfr_90th
            FROM cpt_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch fee schedule: {}", e),
            )
        })?;

        let Some(row) = row else {
            tracing::debug!(cpt_code = %code, "CPT code not in fee schedule");
            return Ok(None);
        };

        let get = |name: &str| {
            row.try_get::<Option<rust_decimal::Decimal>, _>(name).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to get {}: {}", name, e),
                )
            })
        };

        let mfu = PercentileBands::new(get("mfu_50th")?, get("mfu_75th")?, get("mfu_90th")?);
        let pfr = PercentileBands::new(get("pfr_50th")?, get("pfr_75th")?, get("pfr_90th")?);

        let code: String = row.try_get("code").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get code: {}", e))
        })?;
        let description: Option<String> = row.try_get("code_description").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get code_description: {}", e),
            )
        })?;

        let mut schedule = FeeSchedule::new(code, mfu, pfr);
        if let Some(description) = description {
            schedule = schedule.with_description(description);
        }
        Ok(Some(schedule))
    }
}
