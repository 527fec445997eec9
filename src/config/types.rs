//! Configuration types for the compensation engine.
//!
//! This module contains the strongly-typed configuration structure that is
//! deserialized from a YAML configuration file. All fields have documented
//! defaults so the engine is usable without a file on disk.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Per-hour bonus rates applied to hours worked above the monthly plan,
/// by employment category. Contractors never receive a bonus.
#[derive(Debug, Clone, Deserialize)]
pub struct BonusRates {
    /// Bonus per extra hour for staff engineers.
    pub staff: Decimal,
    /// Bonus per extra hour for remote engineers.
    pub remote: Decimal,
}

impl Default for BonusRates {
    fn default() -> Self {
        Self {
            staff: Decimal::from(250),
            remote: Decimal::from(200),
        }
    }
}

/// Numeric constants of the compensation rules.
///
/// # Example
///
/// ```
/// use compensation_engine::config::EngineConfig;
/// use rust_decimal::Decimal;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.home_territory_threshold, Decimal::from(60));
/// assert_eq!(config.default_contractor_km_rate, Decimal::from(14));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Distance (in distance units) up to which a session counts as home
    /// territory. Zone surcharges apply only strictly beyond this threshold.
    pub home_territory_threshold: Decimal,
    /// Per-km car rate used for contractor engineers when no override
    /// specifies one. Has no effect for staff or remote engineers.
    pub default_contractor_km_rate: Decimal,
    /// Per-hour bonus rates for hours above the monthly plan.
    pub bonus_rates: BonusRates,
    /// Age in seconds after which a stored engineer balance is considered
    /// stale and is recomputed on read.
    pub balance_staleness_secs: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_territory_threshold: Decimal::from(60),
            default_contractor_km_rate: Decimal::from(14),
            bonus_rates: BonusRates::default(),
            balance_staleness_secs: 3600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_sixty() {
        let config = EngineConfig::default();
        assert_eq!(config.home_territory_threshold, Decimal::from(60));
    }

    #[test]
    fn test_default_contractor_km_rate_is_fourteen() {
        let config = EngineConfig::default();
        assert_eq!(config.default_contractor_km_rate, Decimal::from(14));
    }

    #[test]
    fn test_default_staleness_is_one_hour() {
        let config = EngineConfig::default();
        assert_eq!(config.balance_staleness_secs, 3600);
    }

    #[test]
    fn test_default_bonus_rates_differ_by_category() {
        let rates = BonusRates::default();
        assert!(rates.staff > rates.remote);
    }

    #[test]
    fn test_deserialize_partial_yaml_uses_defaults() {
        let yaml = "home_territory_threshold: 80\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.home_territory_threshold, Decimal::from(80));
        assert_eq!(config.default_contractor_km_rate, Decimal::from(14));
        assert_eq!(config.balance_staleness_secs, 3600);
    }

    #[test]
    fn test_deserialize_full_yaml() {
        let yaml = r#"
home_territory_threshold: 50
default_contractor_km_rate: 16.5
bonus_rates:
  staff: 300
  remote: 150
balance_staleness_secs: 600
"#;
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.home_territory_threshold, Decimal::from(50));
        assert_eq!(
            config.default_contractor_km_rate,
            Decimal::new(165, 1) // 16.5
        );
        assert_eq!(config.bonus_rates.staff, Decimal::from(300));
        assert_eq!(config.bonus_rates.remote, Decimal::from(150));
        assert_eq!(config.balance_staleness_secs, 600);
    }
}
