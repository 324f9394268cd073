//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routers and DTOs
//! - `memory` - In-memory repositories and YAML-seeded reference readers
//! - `postgres` - PostgreSQL implementations via sqlx

pub mod http;
pub mod memory;
pub mod postgres;

pub use http::{api_router, ApiState};
pub use memory::{
    readers_from_seed, InMemoryCarePlanEntryRepository, InMemoryFeeScheduleReader,
    InMemoryGeoFactorReader, InMemoryLifeCarePlanRepository, ReferenceDataSeed,
};
pub use postgres::{
    PostgresCarePlanEntryRepository, PostgresFeeScheduleReader, PostgresGeoFactorReader,
    PostgresLifeCarePlanRepository,
};
