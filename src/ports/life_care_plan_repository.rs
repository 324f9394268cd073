//! Life care plan repository port.
//!
//! Defines the contract for persisting and retrieving LifeCarePlan
//! aggregates. Entries reference plans by ID and are stored separately.

use crate::domain::care_plan::LifeCarePlan;
use crate::domain::foundation::{DomainError, PlanId};
use async_trait::async_trait;

/// Repository port for LifeCarePlan persistence.
#[async_trait]
pub trait LifeCarePlanRepository: Send + Sync {
    /// Save a new plan.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, plan: &LifeCarePlan) -> Result<(), DomainError>;

    /// Update an existing plan.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, plan: &LifeCarePlan) -> Result<(), DomainError>;

    /// Find a plan by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<LifeCarePlan>, DomainError>;

    /// Check if a plan exists.
    async fn exists(&self, id: &PlanId) -> Result<bool, DomainError>;

    /// All plans, most recently updated first.
    async fn list(&self) -> Result<Vec<LifeCarePlan>, DomainError>;

    /// Delete a plan.
    ///
    /// # Errors
    ///
    /// - `PlanNotFound` if the plan doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &PlanId) -> Result<(), DomainError>;
}
