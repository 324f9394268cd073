//! Care plan entry repository port.
//!
//! Defines the contract for persisting and retrieving CarePlanEntry
//! aggregates. Derived costs are stored alongside the inputs.

use crate::domain::care_plan::CarePlanEntry;
use crate::domain::foundation::{DomainError, EntryId, PlanId};
use async_trait::async_trait;

/// Repository port for CarePlanEntry persistence.
#[async_trait]
pub trait CarePlanEntryRepository: Send + Sync {
    /// Save a new entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, entry: &CarePlanEntry) -> Result<(), DomainError>;

    /// Update an existing entry.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if the entry doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, entry: &CarePlanEntry) -> Result<(), DomainError>;

    /// Find an entry by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &EntryId) -> Result<Option<CarePlanEntry>, DomainError>;

    /// All entries of a plan, oldest first.
    async fn list_by_plan(&self, plan_id: &PlanId) -> Result<Vec<CarePlanEntry>, DomainError>;

    /// Delete every entry of a plan. Returns how many were removed.
    async fn delete_by_plan(&self, plan_id: &PlanId) -> Result<u64, DomainError>;

    /// Delete an entry.
    ///
    /// # Errors
    ///
    /// - `EntryNotFound` if the entry doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &EntryId) -> Result<(), DomainError>;
}
