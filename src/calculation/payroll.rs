//! Monthly payroll aggregation.
//!
//! Sums an engineer's invoicing-eligible sessions for a calendar month into
//! a payroll calculation, applying the bonus-above-plan rule and the
//! guaranteed-minimum ("fixed vs. earned") rule. Sessions carry their own
//! priced amounts; aggregation never re-resolves rates.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{
    CalculationStatus, Engineer, EngineerCategory, PayrollCalculation, round_money,
};
use crate::notify::PayrollMailer;
use crate::store::Store;

use super::balance::{recompute_balance, recompute_calculation_status};

/// Outcome counts of a batch payroll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Engineers whose calculation was produced or refreshed.
    pub calculated: usize,
    /// Engineers skipped because their calculation failed; failures are
    /// logged and never abort the rest of the batch.
    pub skipped: usize,
}

fn bonus_amount(config: &EngineConfig, engineer: &Engineer, actual_hours: Decimal) -> Decimal {
    let rate = match engineer.category {
        EngineerCategory::Staff => config.bonus_rates.staff,
        EngineerCategory::Remote => config.bonus_rates.remote,
        EngineerCategory::Contractor => return Decimal::ZERO,
    };
    if actual_hours > engineer.planned_hours {
        round_money((actual_hours - engineer.planned_hours) * rate)
    } else {
        Decimal::ZERO
    }
}

/// Produces or refreshes the payroll calculation for one engineer's month.
///
/// Re-running on unchanged sessions yields identical amounts. The row for
/// the (engineer, month, year) key is overwritten in place, keeping its
/// id stable; a pre-existing `paid` status is handed to status
/// reconciliation, which decides whether the new amounts still justify it.
/// Balance and status reconciliation always run before returning.
///
/// # Algorithm
///
/// 1. Sum regular/overtime hours and their persisted pay amounts over the
///    month's invoicing-eligible sessions (selected by work date).
/// 2. Sum car usage (plus the engineer's fixed monthly car allowance) and
///    organization billing (client revenue).
/// 3. Bonus: non-contractors earn a category-specific per-hour rate on
///    hours above their monthly plan.
/// 4. Earned = base + overtime + bonus (car excluded).
/// 5. Base salary paid = max(fixed salary floor, earned).
/// 6. Total payable = base salary paid + car total (the floor never covers
///    car usage).
/// 7. Profit margin = client revenue − total payable.
pub fn calculate_month(
    store: &dyn Store,
    config: &EngineConfig,
    mailer: &dyn PayrollMailer,
    engineer_id: Uuid,
    month: u32,
    year: i32,
) -> EngineResult<PayrollCalculation> {
    let engineer = store.engineer(engineer_id)?;
    let sessions = store.eligible_sessions_for_month(engineer_id, month, year);

    let mut actual_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    let mut base_amount = Decimal::ZERO;
    let mut overtime_amount = Decimal::ZERO;
    let mut car_amount = engineer.monthly_car_allowance;
    let mut client_revenue = Decimal::ZERO;

    for session in &sessions {
        actual_hours += session.regular_hours;
        overtime_hours += session.overtime_hours;
        base_amount += session.amounts.regular_pay;
        overtime_amount += session.amounts.overtime_pay;
        car_amount += session.amounts.car_usage;
        client_revenue += session.amounts.org_billing();
    }

    let bonus = bonus_amount(config, &engineer, actual_hours);
    let earned_amount = base_amount + overtime_amount + bonus;
    let base_salary_paid = earned_amount.max(engineer.fixed_salary);
    let total_payable = base_salary_paid + car_amount;
    let profit_margin = client_revenue - total_payable;

    let existing = store.calculation_for_month(engineer_id, month, year);
    let (id, status) = match &existing {
        // a paid row is not silently regressed; reconciliation below
        // decides whether the new amounts still justify it
        Some(row) if row.status == CalculationStatus::Paid => (row.id, CalculationStatus::Paid),
        Some(row) => (row.id, CalculationStatus::Calculated),
        None => (Uuid::new_v4(), CalculationStatus::Calculated),
    };

    let calculation = PayrollCalculation {
        id,
        engineer_id,
        month,
        year,
        planned_hours: engineer.planned_hours,
        actual_hours,
        overtime_hours,
        base_amount,
        overtime_amount,
        bonus_amount: bonus,
        car_amount,
        earned_amount,
        base_salary_paid,
        total_payable,
        client_revenue,
        profit_margin,
        status,
    };
    store.upsert_calculation(calculation.clone());

    tracing::info!(
        engineer = %engineer_id,
        month,
        year,
        sessions = sessions.len(),
        total_payable = %total_payable,
        "payroll calculated"
    );

    recompute_calculation_status(store, mailer, id)?;
    recompute_balance(store, engineer_id)?;

    store.calculation(id)
}

/// Runs [`calculate_month`] for every active engineer.
///
/// A failure for one engineer is logged and skipped; it never aborts the
/// batch for the others. Intended to be invoked by an external monthly
/// scheduler for the prior period.
pub fn calculate_all_engineers(
    store: &dyn Store,
    config: &EngineConfig,
    mailer: &dyn PayrollMailer,
    month: u32,
    year: i32,
) -> BatchOutcome {
    let mut outcome = BatchOutcome {
        calculated: 0,
        skipped: 0,
    };

    for engineer in store.active_engineers() {
        match calculate_month(store, config, mailer, engineer.id, month, year) {
            Ok(_) => outcome.calculated += 1,
            Err(error) => {
                tracing::warn!(
                    engineer = %engineer.id,
                    month,
                    year,
                    %error,
                    "skipping engineer in batch payroll run"
                );
                outcome.skipped += 1;
            }
        }
    }

    outcome
}
