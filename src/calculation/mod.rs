//! Calculation logic for the compensation engine.
//!
//! This module contains the five core components: rate resolution for an
//! engineer/organization pair, per-session pricing, monthly payroll
//! aggregation with the guaranteed-minimum rule, payment/balance
//! reconciliation, and capacity-aware engineer selection for incoming
//! orders.

mod assignment;
mod balance;
mod payroll;
mod rate_resolver;
mod session;

pub use assignment::{AssignmentOutcome, assign_order, select_engineer};
pub use balance::{
    current_balance, delete_payment, record_payment, recompute_balance,
    recompute_calculation_status, refresh_stale_balances, update_payment, verify_balance,
};
pub use payroll::{BatchOutcome, calculate_all_engineers, calculate_month};
pub use rate_resolver::{EffectiveRates, effective_rates, resolve_rates};
pub use session::{
    SessionInput, SessionPatch, compute_session, create_session, snapshot_rates, update_session,
};
