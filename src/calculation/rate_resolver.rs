//! Effective rate resolution for an engineer/organization pair.
//!
//! Resolution requires an active rate override for the pair. This is a
//! deliberate design choice, not an oversight: once a specific
//! engineer/organization relationship is billable, calculation must never
//! silently fall back to generic engineer defaults, to prevent under- or
//! over-paying without an administrator's explicit decision.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Engineer, RateOverride, TerritoryZone};
use crate::store::Store;

/// The resolved pay configuration for one engineer/organization pair.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveRates {
    /// Base hourly rate.
    pub base_rate: Decimal,
    /// Overtime hourly rate, if one is configured anywhere. Overtime work
    /// without an explicit rate is paid at the base rate.
    pub overtime_rate: Option<Decimal>,
    /// Monthly salary floor.
    pub fixed_salary: Decimal,
    /// Fixed per-session car amount for staff and remote engineers.
    pub fixed_car_amount: Decimal,
    /// Per-kilometre car rate. Populated from the override, or from the
    /// configured default for contractor engineers only.
    pub car_km_rate: Option<Decimal>,
    /// Flat zone 1 surcharge; zero when not configured.
    pub zone1_surcharge: Decimal,
    /// Flat zone 2 surcharge; zero when not configured.
    pub zone2_surcharge: Decimal,
    /// Flat zone 3 surcharge; zero when not configured.
    pub zone3_surcharge: Decimal,
}

impl EffectiveRates {
    /// The rate overtime hours are paid at: the explicit overtime rate, or
    /// the base rate when none is configured.
    pub fn overtime_or_base(&self) -> Decimal {
        self.overtime_rate.unwrap_or(self.base_rate)
    }

    /// The configured surcharge amount for a zone. Home territory has none.
    pub fn surcharge_for(&self, zone: TerritoryZone) -> Decimal {
        match zone {
            TerritoryZone::Home => Decimal::ZERO,
            TerritoryZone::Zone1 => self.zone1_surcharge,
            TerritoryZone::Zone2 => self.zone2_surcharge,
            TerritoryZone::Zone3 => self.zone3_surcharge,
        }
    }
}

/// Merges an override with the engineer's generic fields into the
/// effective rates.
///
/// Field precedence: the override when present, else the engineer's
/// generic field. The per-kilometre car rate falls back to the configured
/// default for contractors only; zone surcharges have no engineer-level
/// fallback and default to zero.
pub fn effective_rates(
    engineer: &Engineer,
    override_row: &RateOverride,
    config: &EngineConfig,
) -> EffectiveRates {
    let car_km_rate = override_row.car_km_rate.or_else(|| {
        engineer
            .is_contractor()
            .then_some(config.default_contractor_km_rate)
    });

    EffectiveRates {
        base_rate: override_row.base_rate.unwrap_or(engineer.base_rate),
        overtime_rate: override_row.overtime_rate.or(engineer.overtime_rate),
        fixed_salary: override_row.fixed_salary.unwrap_or(engineer.fixed_salary),
        fixed_car_amount: override_row
            .fixed_car_amount
            .unwrap_or(engineer.home_transport_amount),
        car_km_rate,
        zone1_surcharge: override_row.zone1_surcharge.unwrap_or(Decimal::ZERO),
        zone2_surcharge: override_row.zone2_surcharge.unwrap_or(Decimal::ZERO),
        zone3_surcharge: override_row.zone3_surcharge.unwrap_or(Decimal::ZERO),
    }
}

/// Resolves the effective pay configuration for an engineer/organization
/// pair.
///
/// # Returns
///
/// Returns the merged [`EffectiveRates`], or an error if:
/// - the engineer or organization does not exist (`EntityNotFound`)
/// - no active rate override exists for the pair (`RatesNotConfigured`)
///
/// Pure read; resolving twice against unchanged data yields identical
/// rates.
pub fn resolve_rates(
    store: &dyn Store,
    config: &EngineConfig,
    engineer_id: Uuid,
    organization_id: Uuid,
) -> EngineResult<EffectiveRates> {
    let engineer = store.engineer(engineer_id)?;
    store.organization(organization_id)?;

    let override_row = store
        .active_rate_override(engineer_id, organization_id)
        .ok_or(EngineError::RatesNotConfigured {
            engineer_id,
            organization_id,
        })?;

    Ok(effective_rates(&engineer, &override_row, config))
}
