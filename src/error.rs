//! Error types for the compensation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur during rate resolution,
//! session pricing, payroll aggregation, and balance reconciliation.

use thiserror::Error;
use uuid::Uuid;

use crate::models::Role;

/// The main error type for the compensation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use compensation_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let engineer = Uuid::nil();
/// let organization = Uuid::nil();
/// let error = EngineError::RatesNotConfigured { engineer_id: engineer, organization_id: organization };
/// assert!(error.to_string().contains("no active rate override"));
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No active rate override exists for the engineer/organization pair.
    ///
    /// This is deliberate: once a relationship is billable, rates must come
    /// from an administrator's explicit configuration, never from silent
    /// fallback to generic engineer defaults.
    #[error(
        "no active rate override for engineer {engineer_id} and organization {organization_id}"
    )]
    RatesNotConfigured {
        /// The engineer whose rates were requested.
        engineer_id: Uuid,
        /// The organization the work was performed for.
        organization_id: Uuid,
    },

    /// A referenced entity does not exist in the store.
    #[error("{entity} not found: {id}")]
    EntityNotFound {
        /// The kind of entity ("engineer", "organization", "calculation", ...).
        entity: &'static str,
        /// The id that was looked up.
        id: Uuid,
    },

    /// A derived-data invariant was broken (balance mismatch, illegal status
    /// transition). Treated as a programming error: logged at error severity
    /// and surfaced, never silently corrected.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// A description of the broken invariant.
        message: String,
    },

    /// The acting role is not allowed to perform the operation.
    #[error("role {role:?} is not permitted to perform this operation")]
    NotPermitted {
        /// The role that attempted the operation.
        role: Role,
    },

    /// A work session contained inconsistent data (negative hours, negative
    /// distance).
    #[error("invalid work session '{session_id}': {message}")]
    InvalidSession {
        /// The id of the invalid session.
        session_id: Uuid,
        /// A description of what made the session invalid.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_not_configured_names_both_ids() {
        let engineer_id = Uuid::new_v4();
        let organization_id = Uuid::new_v4();
        let error = EngineError::RatesNotConfigured {
            engineer_id,
            organization_id,
        };
        let message = error.to_string();
        assert!(message.contains(&engineer_id.to_string()));
        assert!(message.contains(&organization_id.to_string()));
    }

    #[test]
    fn test_entity_not_found_displays_entity_and_id() {
        let id = Uuid::new_v4();
        let error = EngineError::EntityNotFound {
            entity: "engineer",
            id,
        };
        assert_eq!(error.to_string(), format!("engineer not found: {id}"));
    }

    #[test]
    fn test_invariant_violation_displays_message() {
        let error = EngineError::InvariantViolation {
            message: "balance does not equal accrued minus paid".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invariant violation: balance does not equal accrued minus paid"
        );
    }

    #[test]
    fn test_not_permitted_displays_role() {
        let error = EngineError::NotPermitted {
            role: Role::Engineer,
        };
        assert!(error.to_string().contains("Engineer"));
    }

    #[test]
    fn test_invalid_session_displays_id_and_message() {
        let session_id = Uuid::new_v4();
        let error = EngineError::InvalidSession {
            session_id,
            message: "regular hours cannot be negative".to_string(),
        };
        assert!(error.to_string().contains(&session_id.to_string()));
        assert!(error.to_string().contains("regular hours"));
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::EntityNotFound {
                entity: "payment",
                id: Uuid::nil(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
