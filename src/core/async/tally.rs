//! Thread-safe process-wide aggregates for async batch processing
//!
//! The violation count lives in an `AtomicU64`; the fine total is a `Decimal`
//! behind a `Mutex`. Both are only written while the total is locked, so no
//! reader observes a half-applied update.

use crate::types::{Totals, ViolationId};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Violation count and running fine total, shareable across tasks
#[derive(Debug, Default)]
pub struct AtomicTally {
    violations: AtomicU64,
    fines: Mutex<Decimal>,
}

impl AtomicTally {
    pub fn new() -> Self {
        Self {
            violations: AtomicU64::new(0),
            fines: Mutex::new(Decimal::ZERO),
        }
    }

    /// A poisoned lock still holds a consistent total: the guarded value is
    /// only written after every checked operation succeeded.
    fn fines_guard(&self) -> MutexGuard<'_, Decimal> {
        self.fines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Count a new violation and add the adjusted amount of its fine
    ///
    /// `commit` runs while the total is locked and receives the id the
    /// violation will get. The counter and total are written only after it
    /// succeeds.
    ///
    /// # Returns
    ///
    /// * `Some(T)` - Whatever `commit` produced
    /// * `None` - If the fine total would overflow or `commit` failed
    ///   (nothing is changed)
    pub fn record_violation<T>(
        &self,
        adjusted: Decimal,
        commit: impl FnOnce(ViolationId) -> Option<T>,
    ) -> Option<T> {
        let mut fines = self.fines_guard();
        let total = fines.checked_add(adjusted)?;
        let id = self.violations.load(Ordering::SeqCst).checked_add(1)?;

        let committed = commit(ViolationId(id))?;
        *fines = total;
        self.violations.store(id, Ordering::SeqCst);

        Some(committed)
    }

    /// Replace a fine's old adjusted amount with its new one in one step
    ///
    /// `commit` re-prices the fine itself while the total is locked.
    pub fn replace_fine<T>(
        &self,
        previous: Decimal,
        adjusted: Decimal,
        commit: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        let mut fines = self.fines_guard();
        let total = fines.checked_sub(previous)?.checked_add(adjusted)?;

        let committed = commit()?;
        *fines = total;

        Some(committed)
    }

    pub fn violations(&self) -> u64 {
        self.violations.load(Ordering::SeqCst)
    }

    pub fn fines(&self) -> Decimal {
        *self.fines_guard()
    }

    pub fn totals(&self) -> Totals {
        let fines = self.fines_guard();
        Totals {
            violations: self.violations(),
            fines: *fines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_tally_is_zero() {
        let tally = AtomicTally::new();
        assert_eq!(tally.totals(), Totals::default());
    }

    #[test]
    fn test_record_violation_overflow_changes_nothing() {
        let tally = AtomicTally::new();
        tally.record_violation(Decimal::MAX, Some).unwrap();

        assert_eq!(tally.record_violation(Decimal::ONE, Some), None);
        assert_eq!(tally.violations(), 1);
        assert_eq!(tally.fines(), Decimal::MAX);
    }

    #[test]
    fn test_record_violation_failed_commit_changes_nothing() {
        let tally = AtomicTally::new();
        tally.record_violation(Decimal::new(10, 0), Some).unwrap();

        let outcome: Option<()> = tally.record_violation(Decimal::new(5, 0), |_| None);

        assert_eq!(outcome, None);
        assert_eq!(tally.violations(), 1);
        assert_eq!(tally.fines(), Decimal::new(10, 0));
        assert_eq!(tally.record_violation(Decimal::ONE, Some), Some(ViolationId(2)));
    }

    #[test]
    fn test_replace_fine() {
        let tally = AtomicTally::new();
        tally.record_violation(Decimal::new(60, 0), Some).unwrap();

        tally
            .replace_fine(Decimal::new(60, 0), Decimal::new(20, 0), || Some(()))
            .unwrap();

        assert_eq!(tally.fines(), Decimal::new(20, 0));
        assert_eq!(tally.violations(), 1);
    }

    #[test]
    fn test_concurrent_records_are_all_counted() {
        let tally = Arc::new(AtomicTally::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tally = Arc::clone(&tally);
                thread::spawn(move || {
                    for _ in 0..100 {
                        tally.record_violation(Decimal::new(15, 1), Some).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tally.violations(), 800);
        assert_eq!(tally.fines(), Decimal::new(1200, 0));
    }

    #[test]
    fn test_concurrent_ids_are_unique() {
        let tally = Arc::new(AtomicTally::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tally = Arc::clone(&tally);
                thread::spawn(move || {
                    (0..50)
                        .map(|_| tally.record_violation(Decimal::ONE, Some).unwrap().0)
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids, (1..=200).collect::<Vec<u64>>());
    }
}
