//! Domain models for the compensation engine.
//!
//! All entities are plain structs related by id fields; relations are
//! resolved through the [`crate::store::Store`] interface rather than held
//! as direct references.

mod balance;
mod engineer;
mod order;
mod organization;
mod payment;
mod payroll;
mod rate_override;
mod role;
mod work_session;

pub use balance::EngineerBalance;
pub use engineer::{Engineer, EngineerCategory};
pub use order::{Order, OrderStatus};
pub use organization::Organization;
pub use payment::{PaymentMethod, PaymentStatus, PaymentType, SalaryPayment};
pub use payroll::{CalculationStatus, PayrollCalculation};
pub use rate_override::RateOverride;
pub use role::Role;
pub use work_session::{
    RateSnapshot, SessionAmounts, TerritoryZone, WorkSession, hours_between, round_money,
};
