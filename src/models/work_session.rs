//! Work session model, territory zones, and numeric helpers.
//!
//! A [`WorkSession`] is the append-only ledger row for one unit of reported
//! work: hours, distance, the rates in force when it was priced, and the
//! resulting pay, billing, car usage, and profit. Sessions are written once
//! and never recomputed by later rate changes; manager edits recompute only
//! the session's own derived fields from its snapshotted rates.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance-based territory banding for transport surcharges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerritoryZone {
    /// Home territory; only the fixed transport amount applies.
    Home,
    /// Zone 1, the nearest band beyond home territory.
    Zone1,
    /// Zone 2.
    Zone2,
    /// Zone 3, the farthest band.
    Zone3,
}

/// The rates in force when a session was priced, snapshotted for audit.
///
/// A later change to an engineer's rates or an override must never
/// retroactively alter a historical session; recomputes read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Engineer base hourly rate used.
    pub base_rate: Decimal,
    /// Engineer overtime hourly rate used.
    pub overtime_rate: Decimal,
    /// Organization base billing rate used.
    pub org_base_rate: Decimal,
    /// Organization overtime billing rate used (already multiplied).
    pub org_overtime_rate: Decimal,
    /// Fixed per-session car amount used (staff/remote).
    pub fixed_car_amount: Decimal,
    /// Per-kilometre car rate used (contractors), if any.
    pub car_km_rate: Option<Decimal>,
    /// Zone 1 surcharge in force at pricing time.
    pub zone1_surcharge: Decimal,
    /// Zone 2 surcharge in force at pricing time.
    pub zone2_surcharge: Decimal,
    /// Zone 3 surcharge in force at pricing time.
    pub zone3_surcharge: Decimal,
}

/// The monetary outcome of pricing one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionAmounts {
    /// Engineer pay for regular hours.
    pub regular_pay: Decimal,
    /// Engineer pay for overtime hours.
    pub overtime_pay: Decimal,
    /// Organization billing for regular hours.
    pub regular_billing: Decimal,
    /// Organization billing for overtime hours.
    pub overtime_billing: Decimal,
    /// Car usage amount (per-km for contractors, fixed + surcharge
    /// otherwise).
    pub car_usage: Decimal,
    /// Billing minus pay minus car usage.
    pub profit: Decimal,
}

impl SessionAmounts {
    /// Total engineer pay (regular + overtime).
    pub fn engineer_pay(&self) -> Decimal {
        self.regular_pay + self.overtime_pay
    }

    /// Total organization billing (regular + overtime).
    pub fn org_billing(&self) -> Decimal {
        self.regular_billing + self.overtime_billing
    }
}

/// One engineer/order/date unit of reported work with its priced amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Unique identifier.
    pub id: Uuid,
    /// The engineer who performed the work.
    pub engineer_id: Uuid,
    /// The organization the work was billed to.
    pub organization_id: Uuid,
    /// The order this work belongs to, if any.
    pub order_id: Option<Uuid>,
    /// The date the work was performed (aggregation keys on this, not on
    /// creation time).
    pub work_date: NaiveDate,
    /// Regular hours worked.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Travel distance in distance units.
    pub distance: Decimal,
    /// Territory zone of the work site.
    pub zone: TerritoryZone,
    /// Rates in force at pricing time.
    pub rates: RateSnapshot,
    /// Priced amounts.
    pub amounts: SessionAmounts,
    /// Whether this session counts toward billing and payroll.
    pub invoicing_eligible: bool,
}

/// Rounds a monetary amount to 2 fraction digits, away from zero at the
/// midpoint.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derives a decimal hour count from a time range, rounded **up** to the
/// nearest quarter hour.
///
/// # Example
///
/// ```
/// use chrono::NaiveDateTime;
/// use compensation_engine::models::hours_between;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let start = NaiveDateTime::parse_from_str("2026-05-12 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2026-05-12 12:10:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(hours_between(start, end), Decimal::from_str("3.25").unwrap());
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let minutes = (end - start).num_minutes().max(0);
    let quarters = (minutes + 14) / 15; // ceiling to the next quarter hour
    Decimal::from(quarters) / Decimal::from(4)
}
