//! Record processing orchestration for async batch processing
//!
//! This module provides the `AsyncFineEngine` struct, which applies driver
//! records to a shared, thread-safe `AsyncRegistry`.
//!
//! # Architecture
//!
//! ```text
//! AsyncFineEngine
//!     └── Arc<AsyncRegistry>
//!             ├── DashMap<PersonId, Person>   (people and their ledgers)
//!             ├── DashMap<String, Vehicle>    (active vehicles)
//!             └── AtomicTally                 (violation count, fine total)
//! ```
//!
//! # Thread Safety
//!
//! The engine is cloneable and can be shared across async tasks. Record
//! routing is the same `FineBook::apply` used by the synchronous engine.

use std::sync::Arc;

use super::AsyncRegistry;
use crate::core::traits::FineBook;
use crate::types::{FineError, FineId, ReportRecord};

/// Record processing orchestrator for async batch processing
#[derive(Debug, Clone)]
pub struct AsyncFineEngine {
    /// Thread-safe registry shared with every clone of the engine
    registry: Arc<AsyncRegistry>,
}

impl AsyncFineEngine {
    /// Create a new AsyncFineEngine over a shared registry
    pub fn new(registry: Arc<AsyncRegistry>) -> Self {
        Self { registry }
    }

    /// Process a single driver record
    ///
    /// # Returns
    ///
    /// * `Ok(Some(FineId))` for violation records
    /// * `Ok(None)` for every other successfully applied record
    /// * `Err(FineError)` if the record was rejected
    pub fn process_record(&self, record: ReportRecord) -> Result<Option<FineId>, FineError> {
        let mut book: &AsyncRegistry = &self.registry;
        book.apply(record)
    }

    pub fn registry(&self) -> &AsyncRegistry {
        &self.registry
    }
}
