//! Geographic adjustment factor reader port.

use crate::domain::costing::GeoFactorLookup;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Reader port for geographic adjustment factors keyed by ZIP code.
#[async_trait]
pub trait GeoFactorReader: Send + Sync {
    /// Factors for a ZIP code.
    ///
    /// A miss is not an error: implementations return
    /// [`GeoFactorLookup::missing`] with neutral factors.
    async fn find_by_zip(&self, zip: &str) -> Result<GeoFactorLookup, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_factor_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn GeoFactorReader) {}
    }
}
