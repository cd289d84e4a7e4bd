//! Error types for the traffic fines engine
//!
//! This module defines all error types that can occur while processing
//! driver records. Errors are designed to be descriptive and user-friendly
//! for CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, missing fields, bad amounts, etc.
//! - **Boundary Errors**: Unknown people/vehicles/fines, duplicates, owner mismatches
//! - **Arithmetic Errors**: Overflow in fine or total calculations
//!
//! Zero or negative amounts and empty descriptions are valid domain data and
//! never produce an error.

use super::fine::FineId;
use super::person::PersonId;
use thiserror::Error;

/// Main error type for the fines engine
///
/// Every variant except `IoError` is recoverable: the offending record is
/// skipped and processing continues with the next one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FineError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Record type outside the known set
    #[error("Invalid record type '{record_type}'")]
    InvalidRecordType {
        /// The invalid record type string
        record_type: String,
    },

    /// A field required by the record type is absent or empty
    #[error("{record_type} record requires field '{field}'")]
    MissingField {
        /// Record type that requires the field
        record_type: String,
        /// Name of the missing field
        field: String,
    },

    /// Amount that does not parse as a decimal number
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
    },

    /// Classification outside the closed set {standard, heavy}
    #[error("Invalid fine classification '{value}'")]
    InvalidClassification {
        /// The rejected classification string
        value: String,
    },

    /// The referenced person was never registered
    #[error("Person {person} is not registered")]
    UnknownPerson {
        /// Person ID
        person: PersonId,
    },

    /// The referenced vehicle is not registered (or was retired)
    #[error("Vehicle '{registration}' is not registered")]
    UnknownVehicle {
        /// Registration number
        registration: String,
    },

    /// The referenced fine does not exist in the person's ledger
    #[error("Fine {fine} does not exist")]
    UnknownFine {
        /// Fine ID
        fine: FineId,
    },

    /// A person with this ID is already registered
    #[error("Person {person} is already registered")]
    DuplicatePerson {
        /// Person ID
        person: PersonId,
    },

    /// A vehicle with this registration is already active
    #[error("Vehicle '{registration}' is already registered")]
    DuplicateVehicle {
        /// Registration number
        registration: String,
    },

    /// The record names a person who does not own the vehicle
    #[error("Owner mismatch for vehicle '{registration}': expected person {expected_owner}, got person {actual_owner}")]
    OwnerMismatch {
        /// Registration number
        registration: String,
        /// Registered owner of the vehicle
        expected_owner: PersonId,
        /// Person named by the record
        actual_owner: PersonId,
    },

    /// Arithmetic overflow would occur
    #[error("Arithmetic overflow in {operation} for person {person}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Person ID
        person: PersonId,
    },
}

/// A rejected input row together with its line in the input file
///
/// Line 1 is the header, so the first data row is line 2.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Line {line}: {source}")]
pub struct RecordError {
    pub line: u64,
    #[source]
    pub source: FineError,
}

impl From<std::io::Error> for FineError {
    fn from(error: std::io::Error) -> Self {
        FineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for FineError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        FineError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl FineError {
    /// Create a MissingField error
    pub fn missing_field(record_type: &str, field: &str) -> Self {
        FineError::MissingField {
            record_type: record_type.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        FineError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InvalidClassification error
    pub fn invalid_classification(value: &str) -> Self {
        FineError::InvalidClassification {
            value: value.to_string(),
        }
    }

    /// Create an InvalidRecordType error
    pub fn invalid_record_type(record_type: &str) -> Self {
        FineError::InvalidRecordType {
            record_type: record_type.to_string(),
        }
    }

    /// Create an UnknownPerson error
    pub fn unknown_person(person: PersonId) -> Self {
        FineError::UnknownPerson { person }
    }

    /// Create an UnknownVehicle error
    pub fn unknown_vehicle(registration: &str) -> Self {
        FineError::UnknownVehicle {
            registration: registration.to_string(),
        }
    }

    /// Create an UnknownFine error
    pub fn unknown_fine(fine: FineId) -> Self {
        FineError::UnknownFine { fine }
    }

    /// Create a DuplicatePerson error
    pub fn duplicate_person(person: PersonId) -> Self {
        FineError::DuplicatePerson { person }
    }

    /// Create a DuplicateVehicle error
    pub fn duplicate_vehicle(registration: &str) -> Self {
        FineError::DuplicateVehicle {
            registration: registration.to_string(),
        }
    }

    /// Create an OwnerMismatch error
    pub fn owner_mismatch(
        registration: &str,
        expected_owner: PersonId,
        actual_owner: PersonId,
    ) -> Self {
        FineError::OwnerMismatch {
            registration: registration.to_string(),
            expected_owner,
            actual_owner,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, person: PersonId) -> Self {
        FineError::ArithmeticOverflow {
            operation: operation.to_string(),
            person,
        }
    }
}
