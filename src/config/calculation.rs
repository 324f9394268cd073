//! Calculation configuration

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::application::handlers::costing::PricingDefaults;
use crate::domain::costing::MAX_AGE;

/// Calculation defaults and reference data source
#[derive(Debug, Clone, Deserialize)]
pub struct CalculationConfig {
    /// Remaining life expectancy used when an item has no age range
    #[serde(default = "default_life_expectancy")]
    pub default_life_expectancy_years: Decimal,

    /// Upper clamp for any duration
    #[serde(default = "default_max_duration")]
    pub max_duration_years: Decimal,

    /// YAML seed replacing the PostgreSQL reference tables
    #[serde(default)]
    pub reference_data_path: Option<PathBuf>,
}

impl CalculationConfig {
    pub fn pricing_defaults(&self) -> PricingDefaults {
        PricingDefaults {
            life_expectancy_years: self.default_life_expectancy_years,
            max_duration_years: self.max_duration_years,
        }
    }

    /// Validate calculation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_duration_years < Decimal::ONE || self.max_duration_years > Decimal::from(MAX_AGE) {
            return Err(ValidationError::InvalidMaxDuration);
        }
        if self.default_life_expectancy_years < Decimal::ONE
            || self.default_life_expectancy_years > self.max_duration_years
        {
            return Err(ValidationError::InvalidLifeExpectancy);
        }
        if let Some(path) = &self.reference_data_path {
            if !path.is_file() {
                return Err(ValidationError::ReferenceDataNotFound(
                    path.display().to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            default_life_expectancy_years: default_life_expectancy(),
            max_duration_years: default_max_duration(),
            reference_data_path: None,
        }
    }
}

fn default_life_expectancy() -> Decimal {
    Decimal::from(30)
}

fn default_max_duration() -> Decimal {
    Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_calculation_config_defaults() {
        let config = CalculationConfig::default();
        assert_eq!(config.default_life_expectancy_years, Decimal::from(30));
        assert_eq!(config.max_duration_years, Decimal::ONE_HUNDRED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_life_expectancy_beyond_max_duration() {
        let config = CalculationConfig {
            default_life_expectancy_years: Decimal::from(60),
            max_duration_years: Decimal::from(50),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidLifeExpectancy));
    }

    #[test]
    fn test_max_duration_bounds() {
        let config = CalculationConfig {
            max_duration_years: Decimal::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxDuration));
    }

    #[test]
    fn test_reference_data_path_must_exist() {
        let config = CalculationConfig {
            reference_data_path: Some(PathBuf::from("/nonexistent/reference.yaml")),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ReferenceDataNotFound(_))
        ));

        let file = NamedTempFile::new().unwrap();
        let config = CalculationConfig {
            reference_data_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pricing_defaults() {
        let defaults = CalculationConfig::default().pricing_defaults();
        assert_eq!(defaults.life_expectancy_years, Decimal::from(30));
    }
}
