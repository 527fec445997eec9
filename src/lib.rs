//! Compensation Engine for field-service dispatch
//!
//! This crate implements the pay and billing core of a field-service dispatch
//! backend: resolving the effective pay configuration for an
//! engineer/organization pair, pricing individual work sessions, aggregating a
//! month of sessions into a payroll calculation with a guaranteed-minimum
//! rule, reconciling payments into a running per-engineer balance, and
//! selecting which engineer an incoming order should be auto-assigned to.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod store;
