//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `LifeCarePlanRepository` - Life care plans and their evaluee
//! - `CarePlanEntryRepository` - Care plan line items and their derived costs
//!
//! ## Reference Data Ports
//!
//! - `FeeScheduleReader` - CPT fee schedule percentile bands
//! - `GeoFactorReader` - Geographic adjustment factors by ZIP code

mod care_plan_entry_repository;
mod fee_schedule_reader;
mod geo_factor_reader;
mod life_care_plan_repository;

pub use care_plan_entry_repository::CarePlanEntryRepository;
pub use fee_schedule_reader::FeeScheduleReader;
pub use geo_factor_reader::GeoFactorReader;
pub use life_care_plan_repository::LifeCarePlanRepository;
