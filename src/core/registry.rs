//! Registry of people, vehicles and fines
//!
//! This module provides the `Registry` struct which owns every person (and
//! with them their ledgers), every active vehicle and the process-wide tally.
//!
//! The Registry is responsible for:
//! - Registering people and vehicles, rejecting duplicates and phantom owners
//! - Recording violations and routing their fines to the owner's ledger
//! - Amending fines while keeping the running total exact
//! - Providing sorted per-person summaries for output

use crate::core::tally::Tally;
use crate::core::traits::FineBook;
use crate::types::{
    Charge, FineClassification, FineError, FineId, Person, PersonId, PersonSummary, Vehicle,
    Violation,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

/// Single-threaded fines registry
///
/// Maintains in-memory maps of people and vehicles together with the
/// aggregate tally. People are never removed; vehicles can be retired.
#[derive(Debug, Default)]
pub struct Registry {
    /// Map of person IDs to people (each owning a ledger)
    people: HashMap<PersonId, Person>,

    /// Map of registration numbers to active vehicles
    vehicles: HashMap<String, Vehicle>,

    /// Violation count and running fine total
    tally: Tally,
}

impl Registry {
    /// Create a new Registry with no people or vehicles
    pub fn new() -> Self {
        Registry {
            people: HashMap::new(),
            vehicles: HashMap::new(),
            tally: Tally::new(),
        }
    }

    /// Get a registered person
    pub fn person(&self, person: PersonId) -> Option<&Person> {
        self.people.get(&person)
    }

    /// Get an active vehicle
    pub fn vehicle(&self, registration: &str) -> Option<&Vehicle> {
        self.vehicles.get(registration)
    }

    /// Get all people sorted by person ID
    pub fn people(&self) -> Vec<&Person> {
        let mut people: Vec<&Person> = self.people.values().collect();
        people.sort_by_key(|person| person.id);
        people
    }

    /// Look up a vehicle and check that `person` owns it
    fn owned_vehicle_mut(
        &mut self,
        person: PersonId,
        registration: &str,
    ) -> Result<&mut Vehicle, FineError> {
        let vehicle = self
            .vehicles
            .get_mut(registration)
            .ok_or_else(|| FineError::unknown_vehicle(registration))?;

        if vehicle.owner != person {
            return Err(FineError::owner_mismatch(
                registration,
                vehicle.owner,
                person,
            ));
        }

        Ok(vehicle)
    }
}

impl FineBook for Registry {
    /// Register a person
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePerson` if the ID is already registered.
    fn register_person(
        &mut self,
        person: PersonId,
        name: String,
        license: String,
    ) -> Result<(), FineError> {
        if self.people.contains_key(&person) {
            return Err(FineError::duplicate_person(person));
        }

        debug!(person, %name, %license, "registered person");
        self.people.insert(person, Person::new(person, name, license));

        Ok(())
    }

    /// Register a vehicle
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner is not registered
    /// - The registration number belongs to an active vehicle
    fn register_vehicle(
        &mut self,
        registration: String,
        owner: PersonId,
    ) -> Result<(), FineError> {
        if !self.people.contains_key(&owner) {
            return Err(FineError::unknown_person(owner));
        }

        if self.vehicles.contains_key(&registration) {
            return Err(FineError::duplicate_vehicle(&registration));
        }

        debug!(%registration, owner, "registered vehicle");
        self.vehicles
            .insert(registration.clone(), Vehicle::new(registration, owner));

        Ok(())
    }

    /// Record a violation and issue its fine to the vehicle's owner
    ///
    /// The violation is kept on the vehicle for the record; the fine goes to
    /// the owner's ledger. Amounts and descriptions are not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vehicle is not registered
    /// - The vehicle is not owned by `person`
    /// - The adjusted amount, the owner's ledger total or the running total
    ///   would overflow
    ///
    /// Nothing is changed when an error is returned.
    fn report_violation(
        &mut self,
        person: PersonId,
        registration: &str,
        description: String,
        amount: Decimal,
        classification: FineClassification,
    ) -> Result<FineId, FineError> {
        self.owned_vehicle_mut(person, registration)?;

        let owner = self
            .people
            .get_mut(&person)
            .ok_or_else(|| FineError::unknown_person(person))?;

        let charge = Charge::new(amount, classification)
            .ok_or_else(|| FineError::arithmetic_overflow("report_violation", person))?;
        let adjusted = charge.adjusted();

        let (violation_id, seq) = self
            .tally
            .record_violation(adjusted, |id| {
                let seq = owner.ledger.append(charge.issue(id))?;
                Some((id, seq))
            })
            .ok_or_else(|| FineError::arithmetic_overflow("report_violation", person))?;
        let violation = Violation::new(violation_id, description);
        let fine_id = FineId { person, seq };

        debug!(
            fine = %fine_id,
            violation = %violation_id,
            %classification,
            %adjusted,
            "issued fine"
        );

        self.owned_vehicle_mut(person, registration)?
            .record(violation);

        Ok(fine_id)
    }

    /// Change the base amount of a fine
    ///
    /// The fine keeps the classification it was issued with; the running
    /// total swaps the old adjusted amount for the new one in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The person or the fine does not exist
    /// - The new adjusted amount, the person's ledger total or the running
    ///   total would overflow
    fn amend_fine(&mut self, fine_id: FineId, amount: Decimal) -> Result<(), FineError> {
        let person = self
            .people
            .get_mut(&fine_id.person)
            .ok_or_else(|| FineError::unknown_person(fine_id.person))?;

        let fine = person
            .ledger
            .get(fine_id.seq)
            .ok_or_else(|| FineError::unknown_fine(fine_id))?;

        let previous = fine.adjusted();
        let charge = fine
            .reprice(amount)
            .ok_or_else(|| FineError::arithmetic_overflow("amend_fine", fine_id.person))?;

        self.tally
            .replace_fine(previous, charge.adjusted(), || {
                person.ledger.amend(fine_id.seq, charge)
            })
            .ok_or_else(|| FineError::arithmetic_overflow("amend_fine", fine_id.person))?;

        debug!(
            fine = %fine_id,
            previous = %previous,
            adjusted = %charge.adjusted(),
            "amended fine"
        );

        Ok(())
    }

    /// Discard a vehicle
    ///
    /// The owner's ledger and the global totals are not touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle is not registered or not owned by
    /// `person`.
    fn retire_vehicle(
        &mut self,
        person: PersonId,
        registration: &str,
    ) -> Result<Vehicle, FineError> {
        self.owned_vehicle_mut(person, registration)?;

        let vehicle = self
            .vehicles
            .remove(registration)
            .ok_or_else(|| FineError::unknown_vehicle(registration))?;

        debug!(
            %registration,
            owner = person,
            violations = vehicle.violations.len(),
            "retired vehicle"
        );

        Ok(vehicle)
    }

    fn total_violations(&self) -> u64 {
        self.tally.violations()
    }

    fn total_fines(&self) -> Decimal {
        self.tally.fines()
    }

    fn person_ledger_total(&self, person: PersonId) -> Result<Decimal, FineError> {
        let person = self
            .people
            .get(&person)
            .ok_or_else(|| FineError::unknown_person(person))?;

        Ok(person.ledger.total_amount())
    }

    fn person_ledger_report(&self, person: PersonId) -> Result<Vec<String>, FineError> {
        let person = self
            .people
            .get(&person)
            .ok_or_else(|| FineError::unknown_person(person))?;

        Ok(person.ledger.report_all())
    }

    fn summaries(&self) -> Vec<PersonSummary> {
        self.people().into_iter().map(Person::summary).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ViolationId;

    fn registry_with_vehicle() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_person(1, "Alice".to_string(), "L1".to_string())
            .unwrap();
        registry.register_vehicle("REG1".to_string(), 1).unwrap();
        registry
    }

    #[test]
    fn test_new_creates_empty_registry() {
        let registry = Registry::new();

        assert!(registry.people().is_empty());
        assert_eq!(registry.total_violations(), 0);
        assert_eq!(registry.total_fines(), Decimal::ZERO);
    }

    #[test]
    fn test_register_person_rejects_duplicate() {
        let mut registry = registry_with_vehicle();

        let result = registry.register_person(1, "Bob".to_string(), "L2".to_string());

        assert_eq!(result, Err(FineError::duplicate_person(1)));
        assert_eq!(registry.person(1).unwrap().name, "Alice");
    }

    #[test]
    fn test_register_vehicle_requires_owner() {
        let mut registry = Registry::new();

        let result = registry.register_vehicle("REG1".to_string(), 9);

        assert_eq!(result, Err(FineError::unknown_person(9)));
        assert!(registry.vehicle("REG1").is_none());
    }

    #[test]
    fn test_register_vehicle_rejects_duplicate() {
        let mut registry = registry_with_vehicle();
        registry
            .register_person(2, "Bob".to_string(), "L2".to_string())
            .unwrap();

        let result = registry.register_vehicle("REG1".to_string(), 2);

        assert_eq!(result, Err(FineError::duplicate_vehicle("REG1")));
        assert_eq!(registry.vehicle("REG1").unwrap().owner, 1);
    }

    #[test]
    fn test_report_violation_keeps_violation_on_vehicle() {
        let mut registry = registry_with_vehicle();

        let fine_id = registry
            .report_violation(
                1,
                "REG1",
                "speeding".to_string(),
                Decimal::new(100, 0),
                FineClassification::Standard,
            )
            .unwrap();

        assert_eq!(fine_id, FineId { person: 1, seq: 1 });
        let vehicle = registry.vehicle("REG1").unwrap();
        assert_eq!(vehicle.violations.len(), 1);
        assert_eq!(vehicle.violations[0].id(), ViolationId(1));
        assert_eq!(vehicle.violations[0].description(), "speeding");

        let fine = registry.person(1).unwrap().ledger.get(1).unwrap();
        assert_eq!(fine.violation(), ViolationId(1));
    }

    #[test]
    fn test_report_violation_on_unknown_vehicle() {
        let mut registry = registry_with_vehicle();

        let result = registry.report_violation(
            1,
            "REG9",
            "speeding".to_string(),
            Decimal::new(100, 0),
            FineClassification::Standard,
        );

        assert_eq!(result, Err(FineError::unknown_vehicle("REG9")));
        assert_eq!(registry.total_violations(), 0);
    }

    #[test]
    fn test_report_violation_with_owner_mismatch() {
        let mut registry = registry_with_vehicle();
        registry
            .register_person(2, "Bob".to_string(), "L2".to_string())
            .unwrap();

        let result = registry.report_violation(
            2,
            "REG1",
            "speeding".to_string(),
            Decimal::new(100, 0),
            FineClassification::Standard,
        );

        assert_eq!(result, Err(FineError::owner_mismatch("REG1", 1, 2)));
        assert_eq!(registry.total_violations(), 0);
        assert_eq!(registry.person_ledger_total(2), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_report_violation_overflow_changes_nothing() {
        let mut registry = registry_with_vehicle();

        let result = registry.report_violation(
            1,
            "REG1",
            "speeding".to_string(),
            Decimal::MAX,
            FineClassification::Heavy,
        );

        assert_eq!(
            result,
            Err(FineError::arithmetic_overflow("report_violation", 1))
        );
        assert_eq!(registry.total_violations(), 0);
        assert_eq!(registry.total_fines(), Decimal::ZERO);
        assert!(registry.vehicle("REG1").unwrap().violations.is_empty());
    }

    #[test]
    fn test_amend_unknown_fine() {
        let mut registry = registry_with_vehicle();
        let fine_id = FineId { person: 1, seq: 1 };

        assert_eq!(
            registry.amend_fine(fine_id, Decimal::ONE),
            Err(FineError::unknown_fine(fine_id))
        );
        assert_eq!(
            registry.amend_fine(FineId { person: 7, seq: 1 }, Decimal::ONE),
            Err(FineError::unknown_person(7))
        );
    }

    #[test]
    fn test_amend_overflow_leaves_fine_and_total() {
        let mut registry = registry_with_vehicle();
        let fine_id = registry
            .report_violation(
                1,
                "REG1",
                "speeding".to_string(),
                Decimal::new(10, 0),
                FineClassification::Heavy,
            )
            .unwrap();

        let result = registry.amend_fine(fine_id, Decimal::MAX);

        assert_eq!(result, Err(FineError::arithmetic_overflow("amend_fine", 1)));
        assert_eq!(registry.total_fines(), Decimal::new(20, 0));
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::new(20, 0)));
    }

    /// Alice's ledger sits at the ceiling while Bob's negative fine keeps the
    /// global total just below it.
    fn registry_with_full_ledger() -> Registry {
        let mut registry = registry_with_vehicle();
        registry
            .register_person(2, "Bob".to_string(), "L2".to_string())
            .unwrap();
        registry.register_vehicle("REG2".to_string(), 2).unwrap();
        registry
            .report_violation(
                1,
                "REG1",
                "speeding".to_string(),
                Decimal::MAX,
                FineClassification::Standard,
            )
            .unwrap();
        registry
            .report_violation(
                2,
                "REG2",
                "refund".to_string(),
                Decimal::NEGATIVE_ONE,
                FineClassification::Standard,
            )
            .unwrap();
        registry
    }

    #[test]
    fn test_report_violation_rejects_ledger_overflow() {
        let mut registry = registry_with_full_ledger();

        let result = registry.report_violation(
            1,
            "REG1",
            "parking".to_string(),
            Decimal::ONE,
            FineClassification::Standard,
        );

        assert_eq!(
            result,
            Err(FineError::arithmetic_overflow("report_violation", 1))
        );
        assert_eq!(registry.total_violations(), 2);
        assert_eq!(registry.total_fines(), Decimal::MAX - Decimal::ONE);
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::MAX));
        assert_eq!(registry.person(1).unwrap().ledger.len(), 1);
        assert_eq!(registry.vehicle("REG1").unwrap().violations.len(), 1);
        assert_eq!(registry.summaries()[0].total, Decimal::MAX);
    }

    #[test]
    fn test_amend_rejects_ledger_overflow() {
        let mut registry = registry_with_full_ledger();
        let zero = registry
            .report_violation(
                1,
                "REG1",
                "warning".to_string(),
                Decimal::ZERO,
                FineClassification::Standard,
            )
            .unwrap();
        registry
            .report_violation(
                2,
                "REG2",
                "refund".to_string(),
                Decimal::new(-5, 0),
                FineClassification::Standard,
            )
            .unwrap();
        let before = registry.totals();

        let result = registry.amend_fine(zero, Decimal::ONE);

        assert_eq!(result, Err(FineError::arithmetic_overflow("amend_fine", 1)));
        assert_eq!(registry.totals(), before);
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::MAX));
        assert_eq!(
            registry.person(1).unwrap().ledger.get(2).unwrap().adjusted(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_retire_vehicle_returns_its_violations() {
        let mut registry = registry_with_vehicle();
        registry
            .report_violation(
                1,
                "REG1",
                "speeding".to_string(),
                Decimal::new(100, 0),
                FineClassification::Standard,
            )
            .unwrap();

        let vehicle = registry.retire_vehicle(1, "REG1").unwrap();

        assert_eq!(vehicle.registration, "REG1");
        assert_eq!(vehicle.violations.len(), 1);
        assert!(registry.vehicle("REG1").is_none());
        assert_eq!(
            registry.retire_vehicle(1, "REG1"),
            Err(FineError::unknown_vehicle("REG1"))
        );
    }

    #[test]
    fn test_retire_vehicle_with_owner_mismatch() {
        let mut registry = registry_with_vehicle();

        assert_eq!(
            registry.retire_vehicle(2, "REG1"),
            Err(FineError::owner_mismatch("REG1", 1, 2))
        );
        assert!(registry.vehicle("REG1").is_some());
    }

    #[test]
    fn test_people_sorted_by_id() {
        let mut registry = Registry::new();
        for id in [3, 1, 2] {
            registry
                .register_person(id, format!("P{}", id), format!("L{}", id))
                .unwrap();
        }

        let ids: Vec<PersonId> = registry.people().iter().map(|person| person.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_ledger_queries_on_unknown_person() {
        let registry = Registry::new();

        assert_eq!(
            registry.person_ledger_total(4),
            Err(FineError::unknown_person(4))
        );
        assert_eq!(
            registry.person_ledger_report(4),
            Err(FineError::unknown_person(4))
        );
    }
}
