//! Persistence interface for the compensation engine.
//!
//! The engine never holds direct references between entities; every
//! relation is an id resolved through the [`Store`] trait. Production
//! deployments back this with a transactional relational store; the
//! in-crate [`MemoryStore`] backs tests and examples.

mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    CalculationStatus, Engineer, EngineerBalance, Order, Organization, PayrollCalculation,
    RateOverride, SalaryPayment, WorkSession,
};

/// Id-keyed access to the six persisted entities.
///
/// Uniqueness constraints the backing store must provide: at most one
/// active rate override per engineer/organization pair, and one balance
/// row per engineer. Each method is a single consistent read or write;
/// callers wrap multi-step flows in whatever transaction mechanism the
/// backing store offers.
pub trait Store {
    /// Fetches an engineer by id.
    fn engineer(&self, id: Uuid) -> EngineResult<Engineer>;

    /// Fetches an organization by id.
    fn organization(&self, id: Uuid) -> EngineResult<Organization>;

    /// All engineers with the active flag set.
    fn active_engineers(&self) -> Vec<Engineer>;

    /// The active rate override for the pair, if one exists.
    fn active_rate_override(
        &self,
        engineer_id: Uuid,
        organization_id: Uuid,
    ) -> Option<RateOverride>;

    /// Persists a newly priced work session.
    fn insert_session(&self, session: WorkSession);

    /// Fetches a work session by id.
    fn session(&self, id: Uuid) -> EngineResult<WorkSession>;

    /// Overwrites an existing work session (manager edit path).
    fn replace_session(&self, session: WorkSession) -> EngineResult<()>;

    /// Invoicing-eligible sessions for an engineer within a calendar month,
    /// selected by work date.
    fn eligible_sessions_for_month(
        &self,
        engineer_id: Uuid,
        month: u32,
        year: i32,
    ) -> Vec<WorkSession>;

    /// Inserts or overwrites a payroll calculation. The (engineer, month,
    /// year) key is unique; overwriting keeps the row id stable.
    fn upsert_calculation(&self, calculation: PayrollCalculation);

    /// Fetches a calculation by id.
    fn calculation(&self, id: Uuid) -> EngineResult<PayrollCalculation>;

    /// The calculation for an engineer's month, if one exists.
    fn calculation_for_month(
        &self,
        engineer_id: Uuid,
        month: u32,
        year: i32,
    ) -> Option<PayrollCalculation>;

    /// All calculations for an engineer.
    fn calculations_for_engineer(&self, engineer_id: Uuid) -> Vec<PayrollCalculation>;

    /// Updates only the status of a calculation.
    fn set_calculation_status(&self, id: Uuid, status: CalculationStatus) -> EngineResult<()>;

    /// Records a payment.
    fn insert_payment(&self, payment: SalaryPayment);

    /// Fetches a payment by id.
    fn payment(&self, id: Uuid) -> EngineResult<SalaryPayment>;

    /// Overwrites an existing payment.
    fn replace_payment(&self, payment: SalaryPayment) -> EngineResult<()>;

    /// Deletes a payment, returning the removed row.
    fn remove_payment(&self, id: Uuid) -> EngineResult<SalaryPayment>;

    /// Payments linked to a calculation.
    fn payments_for_calculation(&self, calculation_id: Uuid) -> Vec<SalaryPayment>;

    /// All payments for an engineer.
    fn payments_for_engineer(&self, engineer_id: Uuid) -> Vec<SalaryPayment>;

    /// The stored balance row for an engineer, if one exists.
    fn balance(&self, engineer_id: Uuid) -> Option<EngineerBalance>;

    /// Inserts or overwrites the engineer's balance row (last writer wins;
    /// the row is fully rebuildable).
    fn save_balance(&self, balance: EngineerBalance);

    /// Persists a new order.
    fn insert_order(&self, order: Order);

    /// Fetches an order by id.
    fn order(&self, id: Uuid) -> EngineResult<Order>;

    /// Overwrites an existing order (assignment path).
    fn replace_order(&self, order: Order) -> EngineResult<()>;

    /// Count of the engineer's orders currently in flight
    /// (processing, working, or review).
    fn in_flight_order_count(&self, engineer_id: Uuid) -> usize;
}
