//! In-memory adapters for development and tests.

mod care_plan_entry_repository;
mod life_care_plan_repository;
mod reference_data;

pub use care_plan_entry_repository::InMemoryCarePlanEntryRepository;
pub use life_care_plan_repository::InMemoryLifeCarePlanRepository;
pub use reference_data::{
    readers_from_seed, FeeScheduleRecord, GeoFactorRecord, InMemoryFeeScheduleReader,
    InMemoryGeoFactorReader, ReferenceDataSeed,
};
