//! Vehicle types
//!
//! A vehicle records the violations reported against it. Fines never live on
//! the vehicle: they are routed to the owner's ledger, so dropping a vehicle
//! cannot change anything the owner is charged.

use super::person::PersonId;
use super::violation::Violation;

/// A registered vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Registration number (unique among active vehicles)
    pub registration: String,

    /// The owning person (non-owning reference)
    pub owner: PersonId,

    /// Violations recorded against this vehicle, in reporting order
    pub violations: Vec<Violation>,
}

impl Vehicle {
    pub fn new(registration: impl Into<String>, owner: PersonId) -> Self {
        Vehicle {
            registration: registration.into(),
            owner,
            violations: Vec::new(),
        }
    }

    /// Keep a violation for the record
    pub fn record(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::violation::ViolationId;

    #[test]
    fn test_record_keeps_order() {
        let mut vehicle = Vehicle::new("REG1", 1);
        vehicle.record(Violation::new(ViolationId(1), "speeding"));
        vehicle.record(Violation::new(ViolationId(2), "reckless driving"));

        let descriptions: Vec<&str> = vehicle
            .violations
            .iter()
            .map(|violation| violation.description())
            .collect();
        assert_eq!(descriptions, vec!["speeding", "reckless driving"]);
        assert_eq!(vehicle.owner, 1);
    }
}
