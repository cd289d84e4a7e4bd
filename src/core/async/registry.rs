//! Thread-safe fines registry for async batch processing
//!
//! This module provides the `AsyncRegistry` struct, which keeps people and
//! vehicles in `DashMap`s and the process-wide aggregates in an
//! `AtomicTally`, so records for different people can be applied from
//! different tasks at the same time.
//!
//! # Thread Safety
//!
//! A person's entry is locked for the whole of a ledger update, which gives
//! one exclusive writer per ledger. Locks are always taken in the order
//! vehicle, then person, then tally, so concurrent operations cannot wait on
//! each other in a cycle.

use super::tally::AtomicTally;
use crate::core::traits::FineBook;
use crate::types::{
    Charge, FineClassification, FineError, FineId, Person, PersonId, PersonSummary, Totals,
    Vehicle, Violation,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;

/// Thread-safe fines registry
///
/// All methods take `&self` and are safe to call from multiple threads.
/// Operations on the same person are serialized by the person's map entry.
#[derive(Debug, Default)]
pub struct AsyncRegistry {
    /// Concurrent map of person IDs to people (each owning a ledger)
    people: DashMap<PersonId, Person>,

    /// Concurrent map of registration numbers to active vehicles
    vehicles: DashMap<String, Vehicle>,

    /// Violation count and running fine total
    tally: AtomicTally,
}

impl AsyncRegistry {
    /// Create a new empty AsyncRegistry
    pub fn new() -> Self {
        Self {
            people: DashMap::new(),
            vehicles: DashMap::new(),
            tally: AtomicTally::new(),
        }
    }

    /// Register a person
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePerson` if the ID is already registered.
    pub fn register_person(
        &self,
        person: PersonId,
        name: String,
        license: String,
    ) -> Result<(), FineError> {
        match self.people.entry(person) {
            Entry::Occupied(_) => Err(FineError::duplicate_person(person)),
            Entry::Vacant(entry) => {
                debug!(person, %name, %license, "registered person");
                entry.insert(Person::new(person, name, license));
                Ok(())
            }
        }
    }

    /// Register a vehicle
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The owner is not registered
    /// - The registration number belongs to an active vehicle
    pub fn register_vehicle(&self, registration: String, owner: PersonId) -> Result<(), FineError> {
        if !self.people.contains_key(&owner) {
            return Err(FineError::unknown_person(owner));
        }

        match self.vehicles.entry(registration) {
            Entry::Occupied(entry) => Err(FineError::duplicate_vehicle(entry.key())),
            Entry::Vacant(entry) => {
                debug!(registration = %entry.key(), owner, "registered vehicle");
                let vehicle = Vehicle::new(entry.key().clone(), owner);
                entry.insert(vehicle);
                Ok(())
            }
        }
    }

    /// Record a violation and issue its fine to the vehicle's owner
    ///
    /// The vehicle entry stays locked until the violation is stored on it, and
    /// the owner's entry is locked while the fine is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The vehicle is not registered
    /// - The vehicle is not owned by `person`
    /// - The adjusted amount, the owner's ledger total or the running total
    ///   would overflow
    pub fn report_violation(
        &self,
        person: PersonId,
        registration: &str,
        description: String,
        amount: Decimal,
        classification: FineClassification,
    ) -> Result<FineId, FineError> {
        let mut vehicle = self
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

        let mut owner = self
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
        drop(owner);

        let violation = Violation::new(violation_id, description);

        let fine_id = FineId { person, seq };
        debug!(
            fine = %fine_id,
            violation = %violation_id,
            %classification,
            %adjusted,
            "issued fine"
        );

        vehicle.record(violation);

        Ok(fine_id)
    }

    /// Change the base amount of a fine
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The person or the fine does not exist
    /// - The new adjusted amount, the person's ledger total or the running
    ///   total would overflow
    pub fn amend_fine(&self, fine_id: FineId, amount: Decimal) -> Result<(), FineError> {
        let mut person = self
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
    /// # Errors
    ///
    /// Returns an error if the vehicle is not registered or not owned by
    /// `person`.
    pub fn retire_vehicle(&self, person: PersonId, registration: &str) -> Result<Vehicle, FineError> {
        let owner = self
            .vehicles
            .get(registration)
            .map(|vehicle| vehicle.owner)
            .ok_or_else(|| FineError::unknown_vehicle(registration))?;

        if owner != person {
            return Err(FineError::owner_mismatch(registration, owner, person));
        }

        let (_, vehicle) = self
            .vehicles
            .remove_if(registration, |_, vehicle| vehicle.owner == person)
            .ok_or_else(|| FineError::unknown_vehicle(registration))?;

        debug!(
            %registration,
            owner = person,
            violations = vehicle.violations.len(),
            "retired vehicle"
        );

        Ok(vehicle)
    }

    pub fn total_violations(&self) -> u64 {
        self.tally.violations()
    }

    pub fn total_fines(&self) -> Decimal {
        self.tally.fines()
    }

    pub fn totals(&self) -> Totals {
        self.tally.totals()
    }

    pub fn person_ledger_total(&self, person: PersonId) -> Result<Decimal, FineError> {
        let person = self
            .people
            .get(&person)
            .ok_or_else(|| FineError::unknown_person(person))?;

        Ok(person.ledger.total_amount())
    }

    pub fn person_ledger_report(&self, person: PersonId) -> Result<Vec<String>, FineError> {
        let person = self
            .people
            .get(&person)
            .ok_or_else(|| FineError::unknown_person(person))?;

        Ok(person.ledger.report_all())
    }

    /// Get per-person summaries sorted by person ID
    ///
    /// The result is a snapshot; records applied concurrently may or may not
    /// be reflected.
    pub fn summaries(&self) -> Vec<PersonSummary> {
        let mut summaries: Vec<PersonSummary> =
            self.people.iter().map(|entry| entry.summary()).collect();

        summaries.sort_by_key(|summary| summary.person);
        summaries
    }

    /// Whether a vehicle is currently registered
    pub fn has_vehicle(&self, registration: &str) -> bool {
        self.vehicles.contains_key(registration)
    }
}

impl FineBook for &AsyncRegistry {
    fn register_person(
        &mut self,
        person: PersonId,
        name: String,
        license: String,
    ) -> Result<(), FineError> {
        AsyncRegistry::register_person(self, person, name, license)
    }

    fn register_vehicle(
        &mut self,
        registration: String,
        owner: PersonId,
    ) -> Result<(), FineError> {
        AsyncRegistry::register_vehicle(self, registration, owner)
    }

    fn report_violation(
        &mut self,
        person: PersonId,
        registration: &str,
        description: String,
        amount: Decimal,
        classification: FineClassification,
    ) -> Result<FineId, FineError> {
        AsyncRegistry::report_violation(
            self,
            person,
            registration,
            description,
            amount,
            classification,
        )
    }

    fn amend_fine(&mut self, fine: FineId, amount: Decimal) -> Result<(), FineError> {
        AsyncRegistry::amend_fine(self, fine, amount)
    }

    fn retire_vehicle(
        &mut self,
        person: PersonId,
        registration: &str,
    ) -> Result<Vehicle, FineError> {
        AsyncRegistry::retire_vehicle(self, person, registration)
    }

    fn total_violations(&self) -> u64 {
        AsyncRegistry::total_violations(self)
    }

    fn total_fines(&self) -> Decimal {
        AsyncRegistry::total_fines(self)
    }

    fn person_ledger_total(&self, person: PersonId) -> Result<Decimal, FineError> {
        AsyncRegistry::person_ledger_total(self, person)
    }

    fn person_ledger_report(&self, person: PersonId) -> Result<Vec<String>, FineError> {
        AsyncRegistry::person_ledger_report(self, person)
    }

    fn summaries(&self) -> Vec<PersonSummary> {
        AsyncRegistry::summaries(self)
    }

    fn totals(&self) -> Totals {
        AsyncRegistry::totals(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn registry_with_vehicle() -> AsyncRegistry {
        let registry = AsyncRegistry::new();
        registry
            .register_person(1, "Alice".to_string(), "L1".to_string())
            .unwrap();
        registry.register_vehicle("REG1".to_string(), 1).unwrap();
        registry
    }

    #[test]
    fn test_register_person_rejects_duplicate() {
        let registry = registry_with_vehicle();

        assert_eq!(
            registry.register_person(1, "Bob".to_string(), "L2".to_string()),
            Err(FineError::duplicate_person(1))
        );
    }

    #[test]
    fn test_register_vehicle_requires_owner() {
        let registry = AsyncRegistry::new();

        assert_eq!(
            registry.register_vehicle("REG1".to_string(), 3),
            Err(FineError::unknown_person(3))
        );
        assert!(!registry.has_vehicle("REG1"));
    }

    #[test]
    fn test_register_vehicle_rejects_duplicate() {
        let registry = registry_with_vehicle();

        assert_eq!(
            registry.register_vehicle("REG1".to_string(), 1),
            Err(FineError::duplicate_vehicle("REG1"))
        );
    }

    #[test]
    fn test_report_violation_with_owner_mismatch() {
        let registry = registry_with_vehicle();
        registry
            .register_person(2, "Bob".to_string(), "L2".to_string())
            .unwrap();

        let result = registry.report_violation(
            2,
            "REG1",
            "speeding".to_string(),
            Decimal::new(10, 0),
            FineClassification::Standard,
        );

        assert_eq!(result, Err(FineError::owner_mismatch("REG1", 1, 2)));
        assert_eq!(registry.totals(), Totals::default());
    }

    #[test]
    fn test_report_violation_overflow_changes_nothing() {
        let registry = registry_with_vehicle();

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
        assert_eq!(registry.totals(), Totals::default());
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_report_violation_rejects_ledger_overflow() {
        let registry = registry_with_vehicle();
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
        assert_eq!(
            registry.totals(),
            Totals {
                violations: 2,
                fines: Decimal::MAX - Decimal::ONE,
            }
        );
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::MAX));
        assert_eq!(registry.person_ledger_report(1).unwrap().len(), 1);

        let next = registry
            .report_violation(
                2,
                "REG2",
                "parking".to_string(),
                Decimal::ONE,
                FineClassification::Standard,
            )
            .unwrap();
        assert_eq!(next, FineId { person: 2, seq: 2 });
        assert_eq!(registry.total_violations(), 3);
    }

    #[test]
    fn test_retire_vehicle() {
        let registry = registry_with_vehicle();
        registry
            .report_violation(
                1,
                "REG1",
                "speeding".to_string(),
                Decimal::new(10, 0),
                FineClassification::Standard,
            )
            .unwrap();

        assert_eq!(
            registry.retire_vehicle(2, "REG1"),
            Err(FineError::owner_mismatch("REG1", 1, 2))
        );

        let vehicle = registry.retire_vehicle(1, "REG1").unwrap();

        assert_eq!(vehicle.violations.len(), 1);
        assert!(!registry.has_vehicle("REG1"));
        assert_eq!(registry.person_ledger_total(1), Ok(Decimal::new(10, 0)));
        assert_eq!(registry.total_violations(), 1);
    }

    #[test]
    fn test_concurrent_owners_are_isolated() {
        let registry = Arc::new(AsyncRegistry::new());
        for id in 1..=4u32 {
            registry
                .register_person(id, format!("P{}", id), format!("L{}", id))
                .unwrap();
            registry.register_vehicle(format!("REG{}", id), id).unwrap();
        }

        let handles: Vec<_> = (1..=4u32)
            .map(|id| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for _ in 0..25 {
                        registry
                            .report_violation(
                                id,
                                &format!("REG{}", id),
                                "speeding".to_string(),
                                Decimal::new(30, 0),
                                FineClassification::Heavy,
                            )
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.total_violations(), 100);
        assert_eq!(registry.total_fines(), Decimal::new(6000, 0));
        for id in 1..=4u32 {
            assert_eq!(registry.person_ledger_total(id), Ok(Decimal::new(1500, 0)));
        }
    }

    #[test]
    fn test_summaries_sorted_by_person() {
        let registry = AsyncRegistry::new();
        for id in [9, 2, 5] {
            registry
                .register_person(id, format!("P{}", id), format!("L{}", id))
                .unwrap();
        }

        let ids: Vec<PersonId> = registry
            .summaries()
            .iter()
            .map(|summary| summary.person)
            .collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }
}
