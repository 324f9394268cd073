//! Fee schedule reader port.
//!
//! Read-only access to CPT fee reference data.

use crate::domain::costing::FeeSchedule;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Reader port for CPT fee schedules.
#[async_trait]
pub trait FeeScheduleReader: Send + Sync {
    /// Fee schedule for a CPT code.
    ///
    /// Returns `None` when the code is unknown; callers fall back to the
    /// base rate.
    async fn find_by_code(&self, code: &str) -> Result<Option<FeeSchedule>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_schedule_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn FeeScheduleReader) {}
    }
}
