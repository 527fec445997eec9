//! Salary payment ledger model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of payment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Advance ahead of a calculation, tied to a month/year instead.
    Advance,
    /// Regular payment against a calculation.
    Regular,
    /// Bonus payment.
    Bonus,
    /// Manual adjustment (may be negative).
    Adjustment,
}

/// How the payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payout.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Card payment.
    Card,
}

/// Processing status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Entered but not yet executed.
    Pending,
    /// Executed; counts toward the engineer's paid total.
    Completed,
    /// Cancelled; ignored by reconciliation.
    Cancelled,
}

/// One payment event in the salary ledger.
///
/// Mutable until deleted; every create, update, or delete must be followed
/// by status and balance reconciliation for the affected engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPayment {
    /// Unique identifier.
    pub id: Uuid,
    /// The engineer being paid.
    pub engineer_id: Uuid,
    /// Payment amount.
    pub amount: Decimal,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// Payment method.
    pub method: PaymentMethod,
    /// Processing status.
    pub status: PaymentStatus,
    /// The date the payment was made.
    pub payment_date: NaiveDate,
    /// The calculation this payment settles, if any.
    pub calculation_id: Option<Uuid>,
    /// Month the payment relates to, for advances without a calculation.
    pub month: Option<u32>,
    /// Year the payment relates to, for advances without a calculation.
    pub year: Option<i32>,
}

impl SalaryPayment {
    /// Whether this payment counts toward the engineer's paid total.
    pub fn counts_as_paid(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
