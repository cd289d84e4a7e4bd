//! Driver record types
//!
//! This module defines the records the driver feeds into the engine. Each
//! record names the person it concerns, which lets the async strategy keep
//! every person's records in order while processing different people in
//! parallel.

use super::fine::{FineClassification, FineId};
use super::person::PersonId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Record types understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// Register a person
    Person,

    /// Register a vehicle for an existing person
    Vehicle,

    /// Report a violation against a vehicle, issuing a fine to its owner
    Violation,

    /// Change the base amount of an issued fine
    Amend,

    /// Discard a vehicle; the owner's fines are kept
    Retire,
}

/// A validated driver record
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRecord {
    Person {
        person: PersonId,
        name: String,
        license: String,
    },
    Vehicle {
        person: PersonId,
        registration: String,
    },
    Violation {
        person: PersonId,
        registration: String,
        description: String,
        amount: Decimal,
        classification: FineClassification,
    },
    Amend {
        fine: FineId,
        amount: Decimal,
    },
    Retire {
        person: PersonId,
        registration: String,
    },
}

impl ReportRecord {
    /// The person this record concerns
    pub fn person(&self) -> PersonId {
        match self {
            ReportRecord::Person { person, .. }
            | ReportRecord::Vehicle { person, .. }
            | ReportRecord::Violation { person, .. }
            | ReportRecord::Retire { person, .. } => *person,
            ReportRecord::Amend { fine, .. } => fine.person,
        }
    }

    /// The vehicle registration this record refers to, if any
    pub fn registration(&self) -> Option<&str> {
        match self {
            ReportRecord::Vehicle { registration, .. }
            | ReportRecord::Violation { registration, .. }
            | ReportRecord::Retire { registration, .. } => Some(registration.as_str()),
            ReportRecord::Person { .. } | ReportRecord::Amend { .. } => None,
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            ReportRecord::Person { .. } => RecordType::Person,
            ReportRecord::Vehicle { .. } => RecordType::Vehicle,
            ReportRecord::Violation { .. } => RecordType::Violation,
            ReportRecord::Amend { .. } => RecordType::Amend,
            ReportRecord::Retire { .. } => RecordType::Retire,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amend_person_comes_from_fine_id() {
        let record = ReportRecord::Amend {
            fine: FineId { person: 5, seq: 1 },
            amount: Decimal::ONE,
        };

        assert_eq!(record.person(), 5);
        assert_eq!(record.record_type(), RecordType::Amend);
    }

    #[test]
    fn test_registration_only_on_vehicle_records() {
        let retire = ReportRecord::Retire {
            person: 1,
            registration: "REG1".to_string(),
        };
        let person = ReportRecord::Person {
            person: 1,
            name: "Alice".to_string(),
            license: "L1".to_string(),
        };

        assert_eq!(retire.registration(), Some("REG1"));
        assert_eq!(person.registration(), None);
    }
}
