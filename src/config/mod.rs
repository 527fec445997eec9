//! Engine configuration.
//!
//! This module provides the [`EngineConfig`] type holding the numeric
//! constants of the compensation rules (territory threshold, contractor
//! per-km fallback, bonus rates, balance staleness) and the
//! [`ConfigLoader`] for reading them from a YAML file.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BonusRates, EngineConfig};
