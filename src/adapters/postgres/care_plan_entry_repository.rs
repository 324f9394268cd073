//! PostgreSQL implementation of CarePlanEntryRepository.
//!
//! Persists CarePlanEntry aggregates to the `care_plan_entries` table.
//! Costs are NUMERIC columns mapped to `rust_decimal::Decimal`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::care_plan::{CareCategory, CarePlanEntry, EntryCosts, EntryDetails};
use crate::domain::costing::{AgeIncrement, CostRange};
use crate::domain::foundation::{DomainError, EntryId, ErrorCode, PlanId, Timestamp};
use crate::ports::CarePlanEntryRepository;

const SELECT_COLUMNS: &str = r#"
    id, plan_id, category, item, frequency, cpt_code, cpt_description,
    start_age, end_age, is_one_time, priced_one_time, base_rate, zip_code,
    min_cost, avg_cost, max_cost, annual_cost, lifetime_cost, lifetime_low, lifetime_high,
    min_frequency, max_frequency, min_duration, max_duration,
    mfr_adjusted, pfr_adjusted, use_age_increments, age_increments,
    created_at, updated_at
"#;

/// PostgreSQL implementation of CarePlanEntryRepository.
#[derive(Clone)]
pub struct PostgresCarePlanEntryRepository {
    pool: PgPool,
}

impl PostgresCarePlanEntryRepository {
    /// Creates a new PostgresCarePlanEntryRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarePlanEntryRepository for PostgresCarePlanEntryRepository {
    async fn save(&self, entry: &CarePlanEntry) -> Result<(), DomainError> {
        let details = entry.details();
        let costs = entry.costs();
        let age_increments = age_increments_to_json(&details.age_increments)?;
        let (requested_one_time, priced_one_time) = one_time_flags(entry);

        sqlx::query(
            r#"
            INSERT INTO care_plan_entries (
                id, plan_id, category, item, frequency, cpt_code, cpt_description,
                start_age, end_age, is_one_time, priced_one_time, base_rate, zip_code,
                min_cost, avg_cost, max_cost, annual_cost, lifetime_cost, lifetime_low, lifetime_high,
                min_frequency, max_frequency, min_duration, max_duration,
                mfr_adjusted, pfr_adjusted, use_age_increments, age_increments,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28, $29, $30
            )
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.plan_id().as_uuid())
        .bind(details.category.as_str())
        .bind(&details.item)
        .bind(&details.frequency)
        .bind(details.cpt_code.as_deref())
        .bind(details.cpt_description.as_deref())
        .bind(details.start_age as i32)
        .bind(details.end_age as i32)
        .bind(requested_one_time)
        .bind(priced_one_time)
        .bind(details.base_rate)
        .bind(details.zip_code.as_deref())
        .bind(costs.per_occurrence.low)
        .bind(costs.per_occurrence.average)
        .bind(costs.per_occurrence.high)
        .bind(costs.annual_cost)
        .bind(costs.lifetime_cost)
        .bind(costs.lifetime_low)
        .bind(costs.lifetime_high)
        .bind(costs.min_frequency)
        .bind(costs.max_frequency)
        .bind(costs.min_duration)
        .bind(costs.max_duration)
        .bind(costs.mfr_adjusted)
        .bind(costs.pfr_adjusted)
        .bind(details.use_age_increments)
        .bind(age_increments)
        .bind(entry.created_at().as_datetime())
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert care plan entry: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, entry: &CarePlanEntry) -> Result<(), DomainError> {
        let details = entry.details();
        let costs = entry.costs();
        let age_increments = age_increments_to_json(&details.age_increments)?;
        let (requested_one_time, priced_one_time) = one_time_flags(entry);

        let result = sqlx::query(
            r#"
            UPDATE care_plan_entries SET
                category = $2, item = $3, frequency = $4, cpt_code = $5, cpt_description = $6,
                start_age = $7, end_age = $8, is_one_time = $9, priced_one_time = $10,
                base_rate = $11, zip_code = $12,
                min_cost = $13, avg_cost = $14, max_cost = $15, annual_cost = $16,
                lifetime_cost = $17, lifetime_low = $18, lifetime_high = $19,
                min_frequency = $20, max_frequency = $21, min_duration = $22, max_duration = $23,
                mfr_adjusted = $24, pfr_adjusted = $25,
                use_age_increments = $26, age_increments = $27,
                updated_at = $28
            WHERE id = $1
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(details.category.as_str())
        .bind(&details.item)
        .bind(&details.frequency)
        .bind(details.cpt_code.as_deref())
        .bind(details.cpt_description.as_deref())
        .bind(details.start_age as i32)
        .bind(details.end_age as i32)
        .bind(requested_one_time)
        .bind(priced_one_time)
        .bind(details.base_rate)
        .bind(details.zip_code.as_deref())
        .bind(costs.per_occurrence.low)
        .bind(costs.per_occurrence.average)
        .bind(costs.per_occurrence.high)
        .bind(costs.annual_cost)
        .bind(costs.lifetime_cost)
        .bind(costs.lifetime_low)
        .bind(costs.lifetime_high)
        .bind(costs.min_frequency)
        .bind(costs.max_frequency)
        .bind(costs.min_duration)
        .bind(costs.max_duration)
        .bind(costs.mfr_adjusted)
        .bind(costs.pfr_adjusted)
        .bind(details.use_age_increments)
        .bind(age_increments)
        .bind(entry.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update care plan entry: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EntryNotFound,
                format!("Care plan entry not found: {}", entry.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &EntryId) -> Result<Option<CarePlanEntry>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM care_plan_entries WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch care plan entry: {}", e),
            )
        })?;

        row.map(row_to_entry).transpose()
    }

    async fn list_by_plan(&self, plan_id: &PlanId) -> Result<Vec<CarePlanEntry>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM care_plan_entries WHERE plan_id = $1 ORDER BY created_at ASC, id ASC",
            SELECT_COLUMNS
        ))
        .bind(plan_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch care plan entries: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn delete_by_plan(&self, plan_id: &PlanId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM care_plan_entries WHERE plan_id = $1")
            .bind(plan_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete care plan entries: {}", e),
                )
            })?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &EntryId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM care_plan_entries WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete care plan entry: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EntryNotFound,
                format!("Care plan entry not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// The user's one-time flag and the priced outcome, in column order.
/// Frequency text like "one-time" prices as one-time without the flag.
fn one_time_flags(entry: &CarePlanEntry) -> (bool, bool) {
    (entry.details().is_one_time, entry.costs().is_one_time)
}

fn age_from_column(value: i32, name: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {}: {}", name, value),
        )
    })
}

fn age_increments_to_json(increments: &[AgeIncrement]) -> Result<Option<String>, DomainError> {
    if increments.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(increments).map(Some).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Failed to encode age increments: {}", e),
        )
    })
}

fn age_increments_from_json(raw: Option<String>) -> Result<Vec<AgeIncrement>, DomainError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(json) => serde_json::from_str(json).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid age_increments: {}", e),
            )
        }),
    }
}

fn row_to_entry(row: PgRow) -> Result<CarePlanEntry, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let plan_id: uuid::Uuid = column(&row, "plan_id")?;

    let category_str: String = column(&row, "category")?;
    let category: CareCategory = category_str.parse().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid category: {}", e),
        )
    })?;

    let zero = |v: Option<Decimal>| v.unwrap_or(Decimal::ZERO);

    let details = EntryDetails {
        category,
        item: column(&row, "item")?,
        frequency: column::<Option<String>>(&row, "frequency")?.unwrap_or_default(),
        cpt_code: column(&row, "cpt_code")?,
        cpt_description: column(&row, "cpt_description")?,
        start_age: age_from_column(column(&row, "start_age")?, "start_age")?,
        end_age: age_from_column(column(&row, "end_age")?, "end_age")?,
        is_one_time: column(&row, "is_one_time")?,
        base_rate: column(&row, "base_rate")?,
        zip_code: column(&row, "zip_code")?,
        use_age_increments: column(&row, "use_age_increments")?,
        age_increments: age_increments_from_json(column(&row, "age_increments")?)?,
    };

    let costs = EntryCosts {
        per_occurrence: CostRange {
            low: zero(column(&row, "min_cost")?),
            average: zero(column(&row, "avg_cost")?),
            high: zero(column(&row, "max_cost")?),
        },
        annual_cost: column(&row, "annual_cost")?,
        lifetime_cost: column(&row, "lifetime_cost")?,
        lifetime_low: column(&row, "lifetime_low")?,
        lifetime_high: column(&row, "lifetime_high")?,
        min_frequency: zero(column(&row, "min_frequency")?),
        max_frequency: zero(column(&row, "max_frequency")?),
        min_duration: zero(column(&row, "min_duration")?),
        max_duration: zero(column(&row, "max_duration")?),
        mfr_adjusted: column::<Option<Decimal>>(&row, "mfr_adjusted")?.unwrap_or(Decimal::ONE),
        pfr_adjusted: column::<Option<Decimal>>(&row, "pfr_adjusted")?.unwrap_or(Decimal::ONE),
        is_one_time: column(&row, "priced_one_time")?,
    };

    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    Ok(CarePlanEntry::reconstitute(
        EntryId::from_uuid(id),
        PlanId::from_uuid(plan_id),
        details,
        costs,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
