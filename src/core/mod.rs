//! Core business logic module
//!
//! This module contains the core fine-computation and aggregation components:
//! - `policy` - Classification-driven fine adjustment
//! - `tally` - Process-wide violation count and fine total
//! - `ledger` - Per-person ordered collection of fines
//! - `traits` - The `FineBook` interface shared by both registries
//! - `registry` - Single-threaded registry of people, vehicles and fines
//! - `engine` - Record processing orchestration
//! - `async` - Thread-safe implementations for batch processing

pub mod r#async;
pub mod engine;
pub mod ledger;
pub mod policy;
pub mod registry;
pub mod tally;
pub mod traits;

pub use engine::FineEngine;
pub use ledger::FineLedger;
pub use r#async::{AsyncFineEngine, AsyncRegistry};
pub use registry::Registry;
pub use tally::Tally;
pub use traits::FineBook;
