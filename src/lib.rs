//! Lifecare Cost - Life Care Plan Cost Calculation Service
//!
//! Prices the line items of a life care plan: frequency and duration
//! parsing, geographic adjustment, fee schedule percentiles, and
//! low/average/high cost projections rolled up into plan totals.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
