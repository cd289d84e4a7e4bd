//! Person-related types
//!
//! A person is identified by a numeric id assigned by the driver and owns
//! exactly one fine ledger for the whole lifetime of the registry.

use crate::core::ledger::FineLedger;
use rust_decimal::Decimal;

/// Person identifier
///
/// Supports person IDs from 0 to 4,294,967,295
pub type PersonId = u32;

/// A registered individual and their fines
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    /// The person ID
    pub id: PersonId,

    /// Display name
    pub name: String,

    /// Driving license number
    pub license: String,

    /// Fines issued to this person, in reporting order
    pub ledger: FineLedger,
}

impl Person {
    /// Create a person with an empty ledger
    pub fn new(id: PersonId, name: impl Into<String>, license: impl Into<String>) -> Self {
        Person {
            id,
            name: name.into(),
            license: license.into(),
            ledger: FineLedger::new(),
        }
    }

    /// Snapshot of this person's ledger for output
    pub fn summary(&self) -> PersonSummary {
        PersonSummary {
            person: self.id,
            name: self.name.clone(),
            license: self.license.clone(),
            fines: self.ledger.len(),
            total: self.ledger.total_amount(),
            report: self.ledger.report_all(),
        }
    }
}

/// Per-person result read by the driver at the end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct PersonSummary {
    pub person: PersonId,
    pub name: String,
    pub license: String,
    /// Number of fines in the ledger
    pub fines: usize,
    /// Sum of the adjusted amounts in the ledger
    pub total: Decimal,
    /// One policy line per fine, in reporting order
    pub report: Vec<String>,
}

/// Process-wide aggregates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    /// Violations ever recorded
    pub violations: u64,
    /// Sum of the adjusted amounts of all live fines
    pub fines: Decimal,
}
