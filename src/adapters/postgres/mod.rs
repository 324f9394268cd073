//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresLifeCarePlanRepository` - Life care plans (`life_care_plans`)
//! - `PostgresCarePlanEntryRepository` - Care plan entries and their costs
//! - `PostgresFeeScheduleReader` - CPT fee schedule bands (`cpt_codes`)
//! - `PostgresGeoFactorReader` - Geographic factors by ZIP (`gaf_lookup`)

mod care_plan_entry_repository;
mod fee_schedule_reader;
mod geo_factor_reader;
mod life_care_plan_repository;

pub use care_plan_entry_repository::PostgresCarePlanEntryRepository;
pub use fee_schedule_reader::PostgresFeeScheduleReader;
pub use geo_factor_reader::PostgresGeoFactorReader;
pub use life_care_plan_repository::PostgresLifeCarePlanRepository;
