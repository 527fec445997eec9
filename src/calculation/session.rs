//! Per-session pricing: engineer pay, organization billing, car usage,
//! and profit.
//!
//! A session is priced once at creation against the rates resolved for its
//! engineer/organization pair; the rates are snapshotted onto the row so
//! later rate changes never retroactively alter history. Manager edits
//! recompute only the session's own derived amounts, from the snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    EngineerCategory, RateSnapshot, Role, SessionAmounts, TerritoryZone, WorkSession,
    round_money,
};
use crate::store::Store;

use super::rate_resolver::{EffectiveRates, resolve_rates};

/// Input for creating a work session.
#[derive(Debug, Clone)]
pub struct SessionInput {
    /// The engineer who performed the work.
    pub engineer_id: Uuid,
    /// The organization the work was billed to.
    pub organization_id: Uuid,
    /// The order this work belongs to, if any.
    pub order_id: Option<Uuid>,
    /// The date the work was performed.
    pub work_date: NaiveDate,
    /// Regular hours worked.
    pub regular_hours: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Travel distance in distance units.
    pub distance: Decimal,
    /// Territory zone of the work site.
    pub zone: TerritoryZone,
    /// Whether the session counts toward billing and payroll.
    pub invoicing_eligible: bool,
}

/// Fields of a session a manager may edit. Unset fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    /// New regular hours.
    pub regular_hours: Option<Decimal>,
    /// New overtime hours.
    pub overtime_hours: Option<Decimal>,
    /// New travel distance.
    pub distance: Option<Decimal>,
    /// New territory zone.
    pub zone: Option<TerritoryZone>,
    /// New invoicing-eligibility flag.
    pub invoicing_eligible: Option<bool>,
}

/// The zone surcharge that actually applies to a session.
///
/// Surcharges apply only strictly beyond the home-territory threshold and
/// are additive on top of the fixed home amount, never replacing it.
/// Zone 1 applies to remote engineers only; staff engineers skip straight
/// to the zone 2/3 bands. Contractors never receive surcharges.
fn applied_surcharge(
    config: &EngineConfig,
    category: EngineerCategory,
    rates: &RateSnapshot,
    distance: Decimal,
    zone: TerritoryZone,
) -> Decimal {
    if distance <= config.home_territory_threshold {
        return Decimal::ZERO;
    }
    match (zone, category) {
        (_, EngineerCategory::Contractor) => Decimal::ZERO,
        (TerritoryZone::Home, _) => Decimal::ZERO,
        (TerritoryZone::Zone1, EngineerCategory::Remote) => rates.zone1_surcharge,
        (TerritoryZone::Zone1, EngineerCategory::Staff) => Decimal::ZERO,
        (TerritoryZone::Zone2, _) => rates.zone2_surcharge,
        (TerritoryZone::Zone3, _) => rates.zone3_surcharge,
    }
}

/// Freezes the resolved rates and the organization's billing rates into a
/// session snapshot.
pub fn snapshot_rates(
    rates: &EffectiveRates,
    org_base_rate: Decimal,
    org_overtime_rate: Decimal,
) -> RateSnapshot {
    RateSnapshot {
        base_rate: rates.base_rate,
        overtime_rate: rates.overtime_or_base(),
        org_base_rate,
        org_overtime_rate,
        fixed_car_amount: rates.fixed_car_amount,
        car_km_rate: rates.car_km_rate,
        zone1_surcharge: rates.zone1_surcharge,
        zone2_surcharge: rates.zone2_surcharge,
        zone3_surcharge: rates.zone3_surcharge,
    }
}

/// Prices one session from snapshotted rates.
///
/// - Regular pay = regular hours × base rate
/// - Overtime pay = overtime hours × overtime rate (base rate when no
///   explicit overtime rate was resolved)
/// - Billing mirrors the same split at the organization's rates
/// - Car usage: contractors get distance × per-km rate; staff and remote
///   engineers get the fixed amount plus the applicable zone surcharge
/// - Profit = billing − pay − car usage
///
/// Every amount is rounded to 2 fraction digits before the profit
/// subtraction, so `profit == org_billing - engineer_pay - car_usage`
/// holds exactly.
pub fn compute_session(
    config: &EngineConfig,
    category: EngineerCategory,
    rates: &RateSnapshot,
    regular_hours: Decimal,
    overtime_hours: Decimal,
    distance: Decimal,
    zone: TerritoryZone,
) -> SessionAmounts {
    let regular_pay = round_money(regular_hours * rates.base_rate);
    let overtime_pay = round_money(overtime_hours * rates.overtime_rate);
    let regular_billing = round_money(regular_hours * rates.org_base_rate);
    let overtime_billing = round_money(overtime_hours * rates.org_overtime_rate);

    let car_usage = match category {
        EngineerCategory::Contractor => {
            let km_rate = rates
                .car_km_rate
                .unwrap_or(config.default_contractor_km_rate);
            round_money(distance * km_rate)
        }
        EngineerCategory::Staff | EngineerCategory::Remote => round_money(
            rates.fixed_car_amount + applied_surcharge(config, category, rates, distance, zone),
        ),
    };

    let profit = regular_billing + overtime_billing - regular_pay - overtime_pay - car_usage;

    SessionAmounts {
        regular_pay,
        overtime_pay,
        regular_billing,
        overtime_billing,
        car_usage,
        profit,
    }
}

fn validate(session_id: Uuid, hours: Decimal, field: &str) -> EngineResult<()> {
    if hours < Decimal::ZERO {
        return Err(EngineError::InvalidSession {
            session_id,
            message: format!("{field} cannot be negative"),
        });
    }
    Ok(())
}

/// Creates and persists a priced work session.
///
/// Resolves the effective rates for the session's engineer/organization
/// pair, snapshots them, prices the session, and writes the row. A
/// `RatesNotConfigured` failure is propagated untouched so the caller can
/// block work entry and show the specific missing pair.
pub fn create_session(
    store: &dyn Store,
    config: &EngineConfig,
    input: SessionInput,
) -> EngineResult<WorkSession> {
    let session_id = Uuid::new_v4();
    validate(session_id, input.regular_hours, "regular hours")?;
    validate(session_id, input.overtime_hours, "overtime hours")?;
    validate(session_id, input.distance, "distance")?;

    let engineer = store.engineer(input.engineer_id)?;
    let organization = store.organization(input.organization_id)?;
    let rates = resolve_rates(store, config, input.engineer_id, input.organization_id)?;

    let snapshot = snapshot_rates(
        &rates,
        organization.base_rate,
        organization.overtime_billing_rate(),
    );
    let amounts = compute_session(
        config,
        engineer.category,
        &snapshot,
        input.regular_hours,
        input.overtime_hours,
        input.distance,
        input.zone,
    );

    let session = WorkSession {
        id: session_id,
        engineer_id: input.engineer_id,
        organization_id: input.organization_id,
        order_id: input.order_id,
        work_date: input.work_date,
        regular_hours: input.regular_hours,
        overtime_hours: input.overtime_hours,
        distance: input.distance,
        zone: input.zone,
        rates: snapshot,
        amounts,
        invoicing_eligible: input.invoicing_eligible,
    };
    store.insert_session(session.clone());

    tracing::info!(
        session = %session.id,
        engineer = %session.engineer_id,
        profit = %session.amounts.profit,
        "work session priced"
    );

    Ok(session)
}

/// Applies a manager edit to a session and recomputes its derived amounts.
///
/// Requires at least the manager role. Only the session's own amounts are
/// recomputed, using the rates snapshotted at creation time; the snapshot
/// itself is never refreshed.
pub fn update_session(
    store: &dyn Store,
    config: &EngineConfig,
    actor: Role,
    session_id: Uuid,
    patch: SessionPatch,
) -> EngineResult<WorkSession> {
    if !actor.covers(Role::Manager) {
        return Err(EngineError::NotPermitted { role: actor });
    }

    let mut session = store.session(session_id)?;
    let engineer = store.engineer(session.engineer_id)?;

    if let Some(hours) = patch.regular_hours {
        session.regular_hours = hours;
    }
    if let Some(hours) = patch.overtime_hours {
        session.overtime_hours = hours;
    }
    if let Some(distance) = patch.distance {
        session.distance = distance;
    }
    if let Some(zone) = patch.zone {
        session.zone = zone;
    }
    if let Some(eligible) = patch.invoicing_eligible {
        session.invoicing_eligible = eligible;
    }

    validate(session.id, session.regular_hours, "regular hours")?;
    validate(session.id, session.overtime_hours, "overtime hours")?;
    validate(session.id, session.distance, "distance")?;

    session.amounts = compute_session(
        config,
        engineer.category,
        &session.rates,
        session.regular_hours,
        session.overtime_hours,
        session.distance,
        session.zone,
    );
    store.replace_session(session.clone())?;

    Ok(session)
}
