//! Client organization model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client organization whose orders the engineers service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: Uuid,
    /// Organization name.
    pub name: String,
    /// Base hourly billing rate charged to the organization.
    pub base_rate: Decimal,
    /// Multiplier applied to overtime billing when [`Self::has_overtime`]
    /// is set. `None` with `has_overtime` means overtime bills at the base
    /// rate.
    pub overtime_multiplier: Option<Decimal>,
    /// Whether the organization is billed an overtime premium at all.
    pub has_overtime: bool,
    /// Whether the organization is currently active.
    pub active: bool,
}

impl Organization {
    /// The hourly rate used for overtime billing.
    ///
    /// With `has_overtime` set, the base rate is scaled by the overtime
    /// multiplier (missing multiplier bills at the plain base rate).
    pub fn overtime_billing_rate(&self) -> Decimal {
        if self.has_overtime {
            self.base_rate * self.overtime_multiplier.unwrap_or(Decimal::ONE)
        } else {
            self.base_rate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_organization() -> Organization {
        Organization {
            id: Uuid::new_v4(),
            name: "Acme Retail".to_string(),
            base_rate: Decimal::from(1000),
            overtime_multiplier: Some(dec("1.5")),
            has_overtime: true,
            active: true,
        }
    }

    #[test]
    fn test_overtime_billing_rate_applies_multiplier() {
        let organization = create_test_organization();
        assert_eq!(organization.overtime_billing_rate(), Decimal::from(1500));
    }

    #[test]
    fn test_overtime_billing_rate_without_overtime_flag() {
        let mut organization = create_test_organization();
        organization.has_overtime = false;
        assert_eq!(organization.overtime_billing_rate(), Decimal::from(1000));
    }

    #[test]
    fn test_overtime_billing_rate_with_flag_but_no_multiplier() {
        let mut organization = create_test_organization();
        organization.overtime_multiplier = None;
        assert_eq!(organization.overtime_billing_rate(), Decimal::from(1000));
    }

    #[test]
    fn test_organization_round_trip() {
        let organization = create_test_organization();
        let json = serde_json::to_string(&organization).unwrap();
        let deserialized: Organization = serde_json::from_str(&json).unwrap();
        assert_eq!(organization, deserialized);
    }
}
