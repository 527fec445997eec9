//! Derived per-engineer balance model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The running accrued/paid/balance figures for one engineer.
///
/// Derived, not authoritative: fully rebuildable at any time from the
/// payroll calculations and the payment ledger. One row per engineer.
/// `balance == total_accrued - total_paid` must hold after every
/// reconciliation; positive means the company owes the engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineerBalance {
    /// The engineer this balance belongs to.
    pub engineer_id: Uuid,
    /// Sum of all calculations in calculated-or-later status.
    pub total_accrued: Decimal,
    /// Sum of all completed payments.
    pub total_paid: Decimal,
    /// total_accrued − total_paid.
    pub balance: Decimal,
    /// First day of the most recent accrued month, if any.
    pub last_accrual: Option<NaiveDate>,
    /// Date of the most recent completed payment, if any.
    pub last_payment: Option<NaiveDate>,
    /// When this row was last recomputed; drives staleness-triggered lazy
    /// recompute on read.
    pub computed_at: DateTime<Utc>,
}

impl EngineerBalance {
    /// Whether the row is older than the given staleness threshold.
    pub fn is_stale(&self, now: DateTime<Utc>, staleness_secs: i64) -> bool {
        (now - self.computed_at).num_seconds() > staleness_secs
    }
}
