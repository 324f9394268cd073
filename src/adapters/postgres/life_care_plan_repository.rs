//! PostgreSQL implementation of LifeCarePlanRepository.
//!
//! Persists LifeCarePlan aggregates to the `life_care_plans` table. Entries
//! reference plans with `ON DELETE CASCADE`.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::care_plan::{EvalueeProfile, LifeCarePlan};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp};
use crate::ports::LifeCarePlanRepository;

const SELECT_COLUMNS: &str = r#"
    id, first_name, last_name, date_of_birth, date_of_injury, gender,
    street_address, city, state, zip_code, life_expectancy,
    created_at, updated_at
"#;

/// PostgreSQL implementation of LifeCarePlanRepository.
#[derive(Clone)]
pub struct PostgresLifeCarePlanRepository {
    pool: PgPool,
}

impl PostgresLifeCarePlanRepository {
    /// Creates a new PostgresLifeCarePlanRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LifeCarePlanRepository for PostgresLifeCarePlanRepository {
    async fn save(&self, plan: &LifeCarePlan) -> Result<(), DomainError> {
        let evaluee = plan.evaluee();

        sqlx::query(
            r#"
            INSERT INTO life_care_plans (
                id, first_name, last_name, date_of_birth, date_of_injury, gender,
                street_address, city, state, zip_code, life_expectancy,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(plan.id().as_uuid())
        .bind(&evaluee.first_name)
        .bind(&evaluee.last_name)
        .bind(evaluee.date_of_birth)
        .bind(evaluee.date_of_injury)
        .bind(evaluee.gender.as_deref())
        .bind(evaluee.street_address.as_deref())
        .bind(evaluee.city.as_deref())
        .bind(evaluee.state.as_deref())
        .bind(evaluee.zip_code.as_deref())
        .bind(evaluee.life_expectancy)
        .bind(plan.created_at().as_datetime())
        .bind(plan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert life care plan: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, plan: &LifeCarePlan) -> Result<(), DomainError> {
        let evaluee = plan.evaluee();

        let result = sqlx::query(
            r#"
            UPDATE life_care_plans SET
                first_name = $2, last_name = $3, date_of_birth = $4, date_of_injury = $5,
                gender = $6, street_address = $7, city = $8, state = $9, zip_code = $10,
                life_expectancy = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(plan.id().as_uuid())
        .bind(&evaluee.first_name)
        .bind(&evaluee.last_name)
        .bind(evaluee.date_of_birth)
        .bind(evaluee.date_of_injury)
        .bind(evaluee.gender.as_deref())
        .bind(evaluee.street_address.as_deref())
        .bind(evaluee.city.as_deref())
        .bind(evaluee.state.as_deref())
        .bind(evaluee.zip_code.as_deref())
        .bind(evaluee.life_expectancy)
        .bind(plan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update life care plan: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PlanNotFound,
                format!("Life care plan not found: {}", plan.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<LifeCarePlan>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM life_care_plans WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch life care plan: {}", e),
            )
        })?;

        row.map(row_to_plan).transpose()
    }

    async fn exists(&self, id: &PlanId) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM life_care_plans WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to check life care plan: {}", e),
                    )
                })?;

        Ok(exists)
    }

    async fn list(&self) -> Result<Vec<LifeCarePlan>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM life_care_plans ORDER BY updated_at DESC, id ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch life care plans: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_plan).collect()
    }

    async fn delete(&self, id: &PlanId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM life_care_plans WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete life care plan: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PlanNotFound,
                format!("Life care plan not found: {}", id),
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

fn row_to_plan(row: PgRow) -> Result<LifeCarePlan, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let date_of_birth: NaiveDate = column(&row, "date_of_birth")?;
    let date_of_injury: Option<NaiveDate> = column(&row, "date_of_injury")?;
    let life_expectancy: Option<Decimal> = column(&row, "life_expectancy")?;

    let evaluee = EvalueeProfile {
        first_name: column(&row, "first_name")?,
        last_name: column(&row, "last_name")?,
        date_of_birth,
        date_of_injury,
        gender: column(&row, "gender")?,
        street_address: column(&row, "street_address")?,
        city: column(&row, "city")?,
        state: column(&row, "state")?,
        zip_code: column(&row, "zip_code")?,
        life_expectancy,
    };

    let created_at: chrono::DateTime<chrono::Utc> = column(&row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(&row, "updated_at")?;

    Ok(LifeCarePlan::reconstitute(
        PlanId::from_uuid(id),
        evaluee,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
