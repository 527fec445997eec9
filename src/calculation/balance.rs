//! Payment/calculation reconciliation and the derived engineer balance.
//!
//! The balance row is never authoritative: it is rebuilt from the payroll
//! calculations and the payment ledger, after every payment mutation and
//! every payroll (re)calculation, and lazily on read once it goes stale.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationStatus, EngineerBalance, SalaryPayment};
use crate::notify::PayrollMailer;
use crate::store::Store;

/// Rebuilds an engineer's balance row from first principles.
///
/// Accrued is the sum of `total_payable` over calculations in
/// calculated-or-later status; paid is the sum of completed payments;
/// balance is their difference. Also records the most recent accrual month
/// and payment date. Idempotent: with no intervening changes, two runs
/// produce the same figures.
pub fn recompute_balance(store: &dyn Store, engineer_id: Uuid) -> EngineResult<EngineerBalance> {
    store.engineer(engineer_id)?;

    let mut total_accrued = Decimal::ZERO;
    let mut last_accrual: Option<NaiveDate> = None;
    for calculation in store.calculations_for_engineer(engineer_id) {
        if !calculation.status.accrues() {
            continue;
        }
        total_accrued += calculation.total_payable;
        let month_start = NaiveDate::from_ymd_opt(calculation.year, calculation.month, 1);
        if month_start > last_accrual {
            last_accrual = month_start;
        }
    }

    let mut total_paid = Decimal::ZERO;
    let mut last_payment: Option<NaiveDate> = None;
    for payment in store.payments_for_engineer(engineer_id) {
        if !payment.counts_as_paid() {
            continue;
        }
        total_paid += payment.amount;
        if Some(payment.payment_date) > last_payment {
            last_payment = Some(payment.payment_date);
        }
    }

    let balance = EngineerBalance {
        engineer_id,
        total_accrued,
        total_paid,
        balance: total_accrued - total_paid,
        last_accrual,
        last_payment,
        computed_at: Utc::now(),
    };
    store.save_balance(balance.clone());

    Ok(balance)
}

/// Checks the stored balance row against a fresh rebuild.
///
/// A mismatch means derived data diverged from its sources — a programming
/// error, logged at error severity and surfaced as `InvariantViolation`,
/// never silently corrected.
pub fn verify_balance(store: &dyn Store, engineer_id: Uuid) -> EngineResult<()> {
    store.engineer(engineer_id)?;
    let Some(stored) = store.balance(engineer_id) else {
        return Ok(());
    };

    let mut expected_accrued = Decimal::ZERO;
    for calculation in store.calculations_for_engineer(engineer_id) {
        if calculation.status.accrues() {
            expected_accrued += calculation.total_payable;
        }
    }
    let mut expected_paid = Decimal::ZERO;
    for payment in store.payments_for_engineer(engineer_id) {
        if payment.counts_as_paid() {
            expected_paid += payment.amount;
        }
    }

    let expected = expected_accrued - expected_paid;
    if stored.balance != expected || stored.balance != stored.total_accrued - stored.total_paid {
        tracing::error!(
            engineer = %engineer_id,
            stored = %stored.balance,
            expected = %expected,
            "engineer balance diverged from its sources"
        );
        return Err(EngineError::InvariantViolation {
            message: format!(
                "balance for engineer {engineer_id} is {}, expected {expected}",
                stored.balance
            ),
        });
    }
    Ok(())
}

/// Returns the engineer's balance, rebuilding it first when missing or
/// older than the configured staleness threshold.
///
/// Safe to race with itself for the same engineer: the row is fully
/// rebuildable, so last writer wins.
pub fn current_balance(
    store: &dyn Store,
    config: &EngineConfig,
    engineer_id: Uuid,
    now: DateTime<Utc>,
) -> EngineResult<EngineerBalance> {
    match store.balance(engineer_id) {
        Some(balance) if !balance.is_stale(now, config.balance_staleness_secs) => Ok(balance),
        _ => recompute_balance(store, engineer_id),
    }
}

/// Rebuilds every active engineer's balance that is missing or stale.
///
/// The plain callable an external hourly scheduler invokes. Returns the
/// number of balances rebuilt.
pub fn refresh_stale_balances(
    store: &dyn Store,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> usize {
    let mut refreshed = 0;
    for engineer in store.active_engineers() {
        let stale = match store.balance(engineer.id) {
            Some(balance) => balance.is_stale(now, config.balance_staleness_secs),
            None => true,
        };
        if !stale {
            continue;
        }
        match recompute_balance(store, engineer.id) {
            Ok(_) => refreshed += 1,
            Err(error) => {
                tracing::warn!(engineer = %engineer.id, %error, "balance refresh failed");
            }
        }
    }
    refreshed
}

/// Re-derives a calculation's status from its linked completed payments.
///
/// Completed payments covering the total promote the calculation to
/// `paid` (announced best-effort via the mailer); coverage dropping below
/// the total demotes a `paid` calculation back to `calculated` — the only
/// backward transition permitted anywhere in the lifecycle.
pub fn recompute_calculation_status(
    store: &dyn Store,
    mailer: &dyn PayrollMailer,
    calculation_id: Uuid,
) -> EngineResult<CalculationStatus> {
    let calculation = store.calculation(calculation_id)?;

    let paid: Decimal = store
        .payments_for_calculation(calculation_id)
        .iter()
        .filter(|p| p.counts_as_paid())
        .map(|p| p.amount)
        .sum();

    let covered = calculation.total_payable > Decimal::ZERO && paid >= calculation.total_payable;
    let status = match (covered, calculation.status) {
        (true, CalculationStatus::Paid) => CalculationStatus::Paid,
        (true, _) => {
            store.set_calculation_status(calculation_id, CalculationStatus::Paid)?;
            let engineer = store.engineer(calculation.engineer_id)?;
            if let Err(error) = mailer.send_payroll_ready(
                &engineer.email,
                calculation.total_payable,
                calculation.month,
                calculation.year,
            ) {
                tracing::warn!(
                    engineer = %engineer.id,
                    %error,
                    "payroll-ready notification failed"
                );
            }
            CalculationStatus::Paid
        }
        (false, CalculationStatus::Paid) => {
            store.set_calculation_status(calculation_id, CalculationStatus::Calculated)?;
            tracing::info!(
                calculation = %calculation_id,
                "payment coverage dropped, calculation demoted to calculated"
            );
            CalculationStatus::Calculated
        }
        (false, status) => status,
    };

    Ok(status)
}

fn reconcile_after_payment_change(
    store: &dyn Store,
    mailer: &dyn PayrollMailer,
    engineer_id: Uuid,
    calculation_ids: &[Option<Uuid>],
) -> EngineResult<()> {
    for calculation_id in calculation_ids.iter().flatten() {
        recompute_calculation_status(store, mailer, *calculation_id)?;
    }
    recompute_balance(store, engineer_id)?;
    Ok(())
}

/// Records a payment and reconciles the affected calculation and balance.
pub fn record_payment(
    store: &dyn Store,
    mailer: &dyn PayrollMailer,
    payment: SalaryPayment,
) -> EngineResult<SalaryPayment> {
    store.engineer(payment.engineer_id)?;
    if let Some(calculation_id) = payment.calculation_id {
        store.calculation(calculation_id)?;
    }

    store.insert_payment(payment.clone());
    reconcile_after_payment_change(
        store,
        mailer,
        payment.engineer_id,
        &[payment.calculation_id],
    )?;

    Ok(payment)
}

/// Applies an edit to an existing payment and reconciles both the
/// previously and the newly linked calculation.
pub fn update_payment(
    store: &dyn Store,
    mailer: &dyn PayrollMailer,
    payment: SalaryPayment,
) -> EngineResult<SalaryPayment> {
    let previous = store.payment(payment.id)?;
    if let Some(calculation_id) = payment.calculation_id {
        store.calculation(calculation_id)?;
    }

    store.replace_payment(payment.clone())?;
    reconcile_after_payment_change(
        store,
        mailer,
        payment.engineer_id,
        &[previous.calculation_id, payment.calculation_id],
    )?;
    if previous.engineer_id != payment.engineer_id {
        recompute_balance(store, previous.engineer_id)?;
    }

    Ok(payment)
}

/// Deletes a payment and reconciles the calculation it settled.
pub fn delete_payment(
    store: &dyn Store,
    mailer: &dyn PayrollMailer,
    payment_id: Uuid,
) -> EngineResult<()> {
    let removed = store.remove_payment(payment_id)?;
    reconcile_after_payment_change(
        store,
        mailer,
        removed.engineer_id,
        &[removed.calculation_id],
    )
}
