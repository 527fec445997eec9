//! Client order model, as seen by the assignment selector.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a client order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Created, not yet assigned.
    New,
    /// Assigned and accepted for processing.
    Processing,
    /// Engineer on site.
    Working,
    /// Work finished, awaiting manager review.
    Review,
    /// Closed successfully.
    Done,
    /// Cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status occupies the assigned engineer's
    /// capacity.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            OrderStatus::Processing | OrderStatus::Working | OrderStatus::Review
        )
    }
}

/// A client order to be dispatched to an engineer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier.
    pub id: Uuid,
    /// Short human-readable title, used in escalation notifications.
    pub title: String,
    /// The organization that placed the order.
    pub organization_id: Uuid,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// The assigned engineer, if any.
    pub engineer_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_statuses() {
        assert!(OrderStatus::Processing.is_in_flight());
        assert!(OrderStatus::Working.is_in_flight());
        assert!(OrderStatus::Review.is_in_flight());
    }

    #[test]
    fn test_terminal_and_new_statuses_are_not_in_flight() {
        assert!(!OrderStatus::New.is_in_flight());
        assert!(!OrderStatus::Done.is_in_flight());
        assert!(!OrderStatus::Cancelled.is_in_flight());
    }

    #[test]
    fn test_order_status_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Working).unwrap(),
            "\"working\""
        );
    }
}
