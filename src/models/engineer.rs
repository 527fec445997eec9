//! Engineer model and employment categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employment category of a field-service engineer.
///
/// The category drives bonus eligibility and the car-usage formula:
/// contractors are paid per kilometre, staff and remote engineers receive a
/// fixed home-territory amount plus zone surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineerCategory {
    /// In-house engineer working from the office.
    Staff,
    /// Engineer working remotely in their own territory.
    Remote,
    /// External contractor, paid per kilometre for travel.
    Contractor,
}

/// A field-service engineer.
///
/// Created at onboarding; rate fields are mutable by administrators.
/// Engineers are never deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engineer {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Email address used for payroll notifications.
    pub email: String,
    /// Employment category.
    pub category: EngineerCategory,
    /// Generic base hourly rate, used when no override field applies.
    pub base_rate: Decimal,
    /// Generic overtime hourly rate. Overtime falls back to the base rate
    /// when neither the override nor the engineer specifies one.
    pub overtime_rate: Option<Decimal>,
    /// Planned working hours per month; hours above this earn a bonus for
    /// non-contractor engineers.
    pub planned_hours: Decimal,
    /// Fixed home-territory transport amount applied per session for staff
    /// and remote engineers.
    pub home_transport_amount: Decimal,
    /// Guaranteed monthly salary floor. Zero means no guarantee.
    pub fixed_salary: Decimal,
    /// Fixed monthly car allowance added once to the month's car total.
    pub monthly_car_allowance: Decimal,
    /// Whether the engineer is currently active.
    pub active: bool,
}

impl Engineer {
    /// Returns true if the engineer is an external contractor.
    pub fn is_contractor(&self) -> bool {
        self.category == EngineerCategory::Contractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_engineer(category: EngineerCategory) -> Engineer {
        Engineer {
            id: Uuid::new_v4(),
            name: "Ivan Petrov".to_string(),
            email: "ivan@example.com".to_string(),
            category,
            base_rate: Decimal::from(700),
            overtime_rate: Some(Decimal::from(900)),
            planned_hours: Decimal::from(160),
            home_transport_amount: Decimal::from(350),
            fixed_salary: Decimal::ZERO,
            monthly_car_allowance: Decimal::ZERO,
            active: true,
        }
    }

    #[test]
    fn test_is_contractor_returns_true_for_contractor() {
        let engineer = create_test_engineer(EngineerCategory::Contractor);
        assert!(engineer.is_contractor());
    }

    #[test]
    fn test_is_contractor_returns_false_for_staff_and_remote() {
        assert!(!create_test_engineer(EngineerCategory::Staff).is_contractor());
        assert!(!create_test_engineer(EngineerCategory::Remote).is_contractor());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&EngineerCategory::Staff).unwrap(),
            "\"staff\""
        );
        assert_eq!(
            serde_json::to_string(&EngineerCategory::Remote).unwrap(),
            "\"remote\""
        );
        assert_eq!(
            serde_json::to_string(&EngineerCategory::Contractor).unwrap(),
            "\"contractor\""
        );
    }

    #[test]
    fn test_engineer_round_trip() {
        let engineer = create_test_engineer(EngineerCategory::Remote);
        let json = serde_json::to_string(&engineer).unwrap();
        let deserialized: Engineer = serde_json::from_str(&json).unwrap();
        assert_eq!(engineer, deserialized);
    }

    #[test]
    fn test_deserialize_engineer_with_decimal_rates() {
        let json = r#"{
            "id": "8f9e4f62-6a1f-4f7a-9a61-111111111111",
            "name": "Anna K",
            "email": "anna@example.com",
            "category": "staff",
            "base_rate": "712.50",
            "overtime_rate": "900.00",
            "planned_hours": "168",
            "home_transport_amount": "350",
            "fixed_salary": "30000",
            "monthly_car_allowance": "0",
            "active": true
        }"#;
        let engineer: Engineer = serde_json::from_str(json).unwrap();
        assert_eq!(engineer.base_rate, Decimal::new(71250, 2));
        assert_eq!(engineer.fixed_salary, Decimal::from(30000));
    }
}
