//! Per-pair rate override model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rate configuration for one engineer/organization pair.
///
/// The pair is unique: at most one active override exists per engineer and
/// organization. Every field is optional; absent fields fall back to the
/// engineer's generic rates during resolution, except zone surcharges which
/// default to zero. An active override must exist before any money changes
/// hands for the pair — calculation never falls back to generic engineer
/// defaults on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateOverride {
    /// Unique identifier.
    pub id: Uuid,
    /// The engineer this override applies to.
    pub engineer_id: Uuid,
    /// The organization this override applies to.
    pub organization_id: Uuid,
    /// Override for the base hourly rate.
    pub base_rate: Option<Decimal>,
    /// Override for the overtime hourly rate.
    pub overtime_rate: Option<Decimal>,
    /// Override for the fixed monthly salary floor.
    pub fixed_salary: Option<Decimal>,
    /// Override for the fixed per-session car amount.
    pub fixed_car_amount: Option<Decimal>,
    /// Override for the per-kilometre car rate (contractors).
    pub car_km_rate: Option<Decimal>,
    /// Flat surcharge for zone 1 sessions beyond the home territory.
    pub zone1_surcharge: Option<Decimal>,
    /// Flat surcharge for zone 2 sessions beyond the home territory.
    pub zone2_surcharge: Option<Decimal>,
    /// Flat surcharge for zone 3 sessions beyond the home territory.
    pub zone3_surcharge: Option<Decimal>,
    /// Whether this override is currently in force.
    pub active: bool,
}

impl RateOverride {
    /// Creates an empty active override for a pair; all rate fields unset.
    pub fn empty(engineer_id: Uuid, organization_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            engineer_id,
            organization_id,
            base_rate: None,
            overtime_rate: None,
            fixed_salary: None,
            fixed_car_amount: None,
            car_km_rate: None,
            zone1_surcharge: None,
            zone2_surcharge: None,
            zone3_surcharge: None,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_override_is_active_with_no_rates() {
        let override_row = RateOverride::empty(Uuid::new_v4(), Uuid::new_v4());
        assert!(override_row.active);
        assert!(override_row.base_rate.is_none());
        assert!(override_row.zone3_surcharge.is_none());
    }

    #[test]
    fn test_override_round_trip() {
        let mut override_row = RateOverride::empty(Uuid::new_v4(), Uuid::new_v4());
        override_row.base_rate = Some(Decimal::from(800));
        override_row.zone2_surcharge = Some(Decimal::from(500));

        let json = serde_json::to_string(&override_row).unwrap();
        let deserialized: RateOverride = serde_json::from_str(&json).unwrap();
        assert_eq!(override_row, deserialized);
    }
}
