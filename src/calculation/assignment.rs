//! Capacity- and fairness-aware engineer selection for incoming orders.
//!
//! Selection prefers engineers with the lowest recorded earnings for the
//! current month, tie-breaking on the lowest in-flight order count. An
//! engineer with no earnings record for the month counts as having the
//! lowest possible earnings and wins immediately — strict rate
//! configuration guards money owed, but fairness ranking is deliberately
//! lenient about missing records.

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::OrderStatus;
use crate::notify::AssignmentNotifier;
use crate::store::Store;

/// The result of attempting to dispatch an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// An engineer was selected and the order assigned to them.
    Assigned(Uuid),
    /// Every candidate was at capacity; administrators were notified so
    /// the order is not left silently unassigned.
    Escalated,
}

/// Picks the best engineer for a new order from a candidate pool.
///
/// # Algorithm
///
/// 1. Keep active engineers whose in-flight order count (processing,
///    working, or review) is strictly below `max_orders_per_engineer`.
/// 2. No qualifiers ⇒ `None`.
/// 3. Prefer the lowest recorded earnings (`total_payable` of the
///    `month`/`year` calculation); a missing record ranks below every
///    recorded amount.
/// 4. Tie-break by lowest in-flight count, then pool order.
pub fn select_engineer(
    store: &dyn Store,
    candidate_pool: &[Uuid],
    max_orders_per_engineer: usize,
    month: u32,
    year: i32,
) -> EngineResult<Option<Uuid>> {
    let mut best: Option<(Option<rust_decimal::Decimal>, usize, Uuid)> = None;

    for &engineer_id in candidate_pool {
        let engineer = store.engineer(engineer_id)?;
        if !engineer.active {
            continue;
        }
        let in_flight = store.in_flight_order_count(engineer_id);
        if in_flight >= max_orders_per_engineer {
            continue;
        }

        let earnings = store
            .calculation_for_month(engineer_id, month, year)
            .map(|c| c.total_payable);

        // Option ordering puts None (no record) below every Some amount
        let candidate = (earnings, in_flight, engineer_id);
        let better = match &best {
            None => true,
            Some((best_earnings, best_in_flight, _)) => {
                (candidate.0.as_ref(), candidate.1) < (best_earnings.as_ref(), *best_in_flight)
            }
        };
        if better {
            best = Some(candidate);
        }
    }

    Ok(best.map(|(_, _, engineer_id)| engineer_id))
}

/// Dispatches an order to the best available engineer.
///
/// On success the order moves to `processing` under the selected engineer
/// and the engineer is notified; with no eligible candidate the order is
/// left untouched and administrators are notified instead. Notification
/// delivery is best-effort: failures are logged, never propagated.
pub fn assign_order(
    store: &dyn Store,
    notifier: &dyn AssignmentNotifier,
    order_id: Uuid,
    candidate_pool: &[Uuid],
    max_orders_per_engineer: usize,
    month: u32,
    year: i32,
) -> EngineResult<AssignmentOutcome> {
    let mut order = store.order(order_id)?;

    let selected = select_engineer(store, candidate_pool, max_orders_per_engineer, month, year)?;

    match selected {
        Some(engineer_id) => {
            order.engineer_id = Some(engineer_id);
            order.status = OrderStatus::Processing;
            store.replace_order(order)?;

            if let Err(error) = notifier.notify_assigned(engineer_id, order_id) {
                tracing::warn!(
                    engineer = %engineer_id,
                    order = %order_id,
                    %error,
                    "assignment notification failed"
                );
            }
            tracing::info!(engineer = %engineer_id, order = %order_id, "order assigned");
            Ok(AssignmentOutcome::Assigned(engineer_id))
        }
        None => {
            if let Err(error) = notifier.notify_no_candidate(&order.title) {
                tracing::warn!(order = %order_id, %error, "escalation notification failed");
            }
            tracing::warn!(order = %order_id, "no eligible engineer for order");
            Ok(AssignmentOutcome::Escalated)
        }
    }
}
