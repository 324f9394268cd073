//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, currency helpers and error types
//! that form the vocabulary of the cost estimation domain.

mod errors;
mod ids;
mod money;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{EntryId, PlanId};
pub use money::{mean, round2, CURRENCY_DP, MAX_AMOUNT};
pub use timestamp::Timestamp;
