//! Record processing engine
//!
//! This module provides the FineEngine that applies driver records to a
//! `Registry` in the order they arrive.
//!
//! The engine enforces business rules such as:
//! - Owners must be registered before their vehicles
//! - Violations are only accepted from a vehicle's registered owner
//! - Fine amendments keep the fine's original classification

use crate::core::registry::Registry;
use crate::core::traits::FineBook;
use crate::types::{FineError, FineId, PersonSummary, ReportRecord, Totals};

/// Record processing engine
///
/// Owns a `Registry` and routes each record to the registry operation it
/// names.
#[derive(Debug, Default)]
pub struct FineEngine {
    registry: Registry,
}

impl FineEngine {
    /// Create a new FineEngine with an empty registry
    pub fn new() -> Self {
        FineEngine {
            registry: Registry::new(),
        }
    }

    /// Process a single driver record
    ///
    /// # Returns
    ///
    /// * `Ok(Some(FineId))` for violation records
    /// * `Ok(None)` for every other successfully applied record
    /// * `Err(FineError)` if the record was rejected; the registry is unchanged
    pub fn process(&mut self, record: ReportRecord) -> Result<Option<FineId>, FineError> {
        self.registry.apply(record)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn totals(&self) -> Totals {
        self.registry.totals()
    }

    /// Get per-person summaries sorted by person ID
    pub fn summaries(&self) -> Vec<PersonSummary> {
        self.registry.summaries()
    }
}
