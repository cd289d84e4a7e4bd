//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent implementations of the core
//! record processing components using DashMap and atomics.
//!
//! # Architecture
//!
//! The async implementations expose the same `FineBook` interface as the
//! synchronous versions but with concurrent data structures:
//!
//! - **AtomicTally**: Violation count and fine total safe for concurrent updates
//! - **AsyncRegistry**: People, vehicles and ledgers in DashMaps
//! - **AsyncFineEngine**: Applies records to a shared registry
//! - **BatchProcessor**: Partitions batches by person and runs them in parallel
//!
//! # Thread Safety
//!
//! - Records for different people proceed in parallel
//! - Records for the same person are applied in input order
//! - No global locks apart from the short fine-total critical section

pub mod batch_processor;
pub mod engine;
pub mod registry;
pub mod tally;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use engine::AsyncFineEngine;
pub use registry::AsyncRegistry;
pub use tally::AtomicTally;
