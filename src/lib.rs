//! Traffic Fines Engine Library
//! # Overview
//!
//! This library models traffic violations and the fines they produce, with
//! a sync and an async strategy for processing CSV driver records.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Violation, Fine, Person, Vehicle, etc.)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Business logic components:
//!   - [`core::policy`] - Standard and heavy fine adjustment
//!   - [`core::ledger`] - Per-person ordered fines
//!   - [`core::tally`] - Global violation count and fine total
//!   - [`core::registry`] - People, vehicles and their fines
//!   - [`core::engine`] - Record processing orchestration
//! - [`io`] - CSV input readers and output writers
//! - [`strategy`] - Complete sync and async processing pipelines
//!
//! # Record Types
//!
//! - **Person**: Register an individual with a name and license number
//! - **Vehicle**: Register a vehicle to an existing person
//! - **Violation**: Report a violation; the owner is fined under a standard or heavy policy
//! - **Amend**: Change the base amount of an issued fine
//! - **Retire**: Discard a vehicle; its owner keeps the fines
//!
//! # Fine Policies
//!
//! - `standard`: the fine is the base amount
//! - `heavy`: the fine is double the base amount
//!
//! The global fine total always equals the sum of every person's ledger.

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{AsyncRegistry, FineBook, FineEngine, Registry};
pub use io::{write_report, write_summary_csv};
pub use types::{
    Charge, Fine, FineClassification, FineError, FineId, Person, PersonId, PersonSummary,
    RecordError, ReportRecord, Totals, Vehicle, Violation, ViolationId,
};
