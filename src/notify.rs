//! Injected notification collaborators.
//!
//! Notifications are side channels of transactional flows: calculation
//! correctness never depends on them. Callers of these traits log failures
//! and move on (fire-and-forget, log-on-failure).

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// A notification delivery failure. Carried back to the engine only so it
/// can be logged; never propagated into calculation results.
#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

/// Notifies parties about order assignment outcomes.
pub trait AssignmentNotifier {
    /// Tells the selected engineer they have been assigned an order.
    fn notify_assigned(&self, engineer_id: Uuid, order_id: Uuid) -> Result<(), NotifyError>;

    /// Escalates to administrators that no engineer could take the order.
    fn notify_no_candidate(&self, order_title: &str) -> Result<(), NotifyError>;
}

/// Emails an engineer when their payroll is ready for payout.
pub trait PayrollMailer {
    /// Announces that `amount` for the `month`/`year` period is payable.
    fn send_payroll_ready(
        &self,
        email: &str,
        amount: Decimal,
        month: u32,
        year: i32,
    ) -> Result<(), NotifyError>;
}

/// A collaborator that delivers nothing and never fails. Useful for tests
/// and for wiring flows where notifications are handled elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl AssignmentNotifier for NoopNotifier {
    fn notify_assigned(&self, _engineer_id: Uuid, _order_id: Uuid) -> Result<(), NotifyError> {
        Ok(())
    }

    fn notify_no_candidate(&self, _order_title: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

impl PayrollMailer for NoopNotifier {
    fn send_payroll_ready(
        &self,
        _email: &str,
        _amount: Decimal,
        _month: u32,
        _year: i32,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Test double whose every delivery fails, for asserting that callers
/// treat notification errors as non-fatal.
#[cfg(test)]
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingNotifier;

#[cfg(test)]
impl AssignmentNotifier for FailingNotifier {
    fn notify_assigned(&self, _engineer_id: Uuid, _order_id: Uuid) -> Result<(), NotifyError> {
        Err(NotifyError("smtp connection refused".to_string()))
    }

    fn notify_no_candidate(&self, _order_title: &str) -> Result<(), NotifyError> {
        Err(NotifyError("smtp connection refused".to_string()))
    }
}

#[cfg(test)]
impl PayrollMailer for FailingNotifier {
    fn send_payroll_ready(
        &self,
        _email: &str,
        _amount: Decimal,
        _month: u32,
        _year: i32,
    ) -> Result<(), NotifyError> {
        Err(NotifyError("smtp connection refused".to_string()))
    }
}
