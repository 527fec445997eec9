//! Monthly payroll calculation model and status lifecycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a payroll calculation.
///
/// The only permitted backward transition is `Paid` → `Calculated`, taken
/// when a covering payment is deleted or edited downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    /// Created but not yet calculated.
    Draft,
    /// Amounts computed from the month's sessions.
    Calculated,
    /// Approved by an administrator.
    Approved,
    /// Fully covered by completed payments.
    Paid,
}

impl CalculationStatus {
    /// Whether a calculation in this status counts toward an engineer's
    /// accrued total.
    pub fn accrues(self) -> bool {
        self >= CalculationStatus::Calculated
    }
}

/// One engineer's payroll calculation for a calendar month.
///
/// Keyed by (engineer, month, year); recalculation overwrites the amounts
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Unique identifier (stable across recalculations).
    pub id: Uuid,
    /// The engineer this calculation belongs to.
    pub engineer_id: Uuid,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// The engineer's planned hours for the month.
    pub planned_hours: Decimal,
    /// Regular hours actually worked.
    pub actual_hours: Decimal,
    /// Overtime hours actually worked.
    pub overtime_hours: Decimal,
    /// Pay for regular hours, summed from sessions.
    pub base_amount: Decimal,
    /// Pay for overtime hours, summed from sessions.
    pub overtime_amount: Decimal,
    /// Bonus for hours above plan (non-contractors only).
    pub bonus_amount: Decimal,
    /// Car usage total: session car amounts plus the monthly allowance.
    pub car_amount: Decimal,
    /// base + overtime + bonus; the figure compared against the salary
    /// floor. Car usage is excluded.
    pub earned_amount: Decimal,
    /// max(fixed salary floor, earned amount).
    pub base_salary_paid: Decimal,
    /// base_salary_paid + car_amount.
    pub total_payable: Decimal,
    /// Billing summed from the month's sessions.
    pub client_revenue: Decimal,
    /// client_revenue − total_payable.
    pub profit_margin: Decimal,
    /// Lifecycle status.
    pub status: CalculationStatus,
}
