//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `violation`: Violation records and their identifiers
//! - `fine`: Fine classification, fines and fine identifiers
//! - `person`: People, per-person summaries and process-wide totals
//! - `vehicle`: Vehicles and their recorded violations
//! - `record`: Driver records fed into the engine
//! - `error`: Error types for the fines engine

pub mod error;
pub mod fine;
pub mod person;
pub mod record;
pub mod vehicle;
pub mod violation;

pub use error::{FineError, RecordError};
pub use fine::{Charge, Fine, FineClassification, FineId};
pub use person::{Person, PersonId, PersonSummary, Totals};
pub use record::{RecordType, ReportRecord};
pub use vehicle::Vehicle;
pub use violation::{Violation, ViolationId};
