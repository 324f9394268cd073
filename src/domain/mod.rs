//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, money, errors)
//! - `costing` - Pure cost calculation pipeline (frequency, duration, geo factors, fee bands)
//! - `care_plan` - Care plan entries, validation and plan totals

pub mod care_plan;
pub mod costing;
pub mod foundation;
