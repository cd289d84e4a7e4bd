//! Core trait for the fines registry
//!
//! This module defines the library interface shared by the synchronous
//! `Registry` and the thread-safe `AsyncRegistry`, so both can be driven by
//! the same record dispatcher and exercised by the same tests.

use crate::types::{
    FineClassification, FineError, FineId, PersonId, PersonSummary, ReportRecord, Totals, Vehicle,
};
use rust_decimal::Decimal;

/// Registry of people, vehicles, fines and process-wide totals
pub trait FineBook {
    /// Register a person with an empty ledger
    fn register_person(
        &mut self,
        person: PersonId,
        name: String,
        license: String,
    ) -> Result<(), FineError>;

    /// Register a vehicle owned by an existing person
    fn register_vehicle(&mut self, registration: String, owner: PersonId)
        -> Result<(), FineError>;

    /// Record a violation against a vehicle and issue its fine to the owner
    fn report_violation(
        &mut self,
        person: PersonId,
        registration: &str,
        description: String,
        amount: Decimal,
        classification: FineClassification,
    ) -> Result<FineId, FineError>;

    /// Change the base amount of an issued fine
    fn amend_fine(&mut self, fine: FineId, amount: Decimal) -> Result<(), FineError>;

    /// Discard a vehicle, returning it with its recorded violations
    fn retire_vehicle(&mut self, person: PersonId, registration: &str)
        -> Result<Vehicle, FineError>;

    /// Number of violations ever recorded
    fn total_violations(&self) -> u64;

    /// Sum of the adjusted amounts of all live fines
    fn total_fines(&self) -> Decimal;

    /// Sum of the adjusted amounts in one person's ledger
    fn person_ledger_total(&self, person: PersonId) -> Result<Decimal, FineError>;

    /// One policy line per fine in one person's ledger
    fn person_ledger_report(&self, person: PersonId) -> Result<Vec<String>, FineError>;

    /// Per-person snapshots, sorted by person ID
    fn summaries(&self) -> Vec<PersonSummary>;

    fn totals(&self) -> Totals {
        Totals {
            violations: self.total_violations(),
            fines: self.total_fines(),
        }
    }

    /// Apply a driver record to the registry
    ///
    /// # Returns
    ///
    /// The id of the issued fine for violation records, `None` otherwise
    fn apply(&mut self, record: ReportRecord) -> Result<Option<FineId>, FineError> {
        match record {
            ReportRecord::Person {
                person,
                name,
                license,
            } => self.register_person(person, name, license).map(|_| None),
            ReportRecord::Vehicle {
                person,
                registration,
            } => self.register_vehicle(registration, person).map(|_| None),
            ReportRecord::Violation {
                person,
                registration,
                description,
                amount,
                classification,
            } => self
                .report_violation(person, &registration, description, amount, classification)
                .map(Some),
            ReportRecord::Amend { fine, amount } => self.amend_fine(fine, amount).map(|_| None),
            ReportRecord::Retire {
                person,
                registration,
            } => self.retire_vehicle(person, &registration).map(|_| None),
        }
    }
}
