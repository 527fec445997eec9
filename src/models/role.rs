//! Actor roles for operations gated by permission level.

use serde::{Deserialize, Serialize};

/// The three-level role hierarchy of the surrounding admin application.
///
/// Ordered: `Engineer < Manager < Admin`. Callers compare with
/// [`Role::covers`] instead of string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Field engineer; may report their own work.
    Engineer,
    /// Manager; may edit sessions and record payments.
    Manager,
    /// Administrator; full access.
    Admin,
}

impl Role {
    /// Whether this role meets or exceeds the required level.
    ///
    /// # Example
    ///
    /// ```
    /// use compensation_engine::models::Role;
    ///
    /// assert!(Role::Admin.covers(Role::Manager));
    /// assert!(!Role::Engineer.covers(Role::Manager));
    /// ```
    pub fn covers(self, required: Role) -> bool {
        self >= required
    }
}
