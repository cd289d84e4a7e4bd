//! Process-wide aggregates owned by a registry
//!
//! The violation count and the running fine total are the only state shared
//! across people. Keeping them in a registry-owned `Tally` instead of statics
//! lets independent registries coexist in one process.
//!
//! Invariants:
//! - `violations` equals the number of violations ever recorded
//! - `fines` equals the sum of the adjusted amounts of all live fines

use crate::types::{Totals, ViolationId};
use rust_decimal::Decimal;

/// Violation count and running fine total
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tally {
    violations: u64,
    fines: Decimal,
}

impl Tally {
    pub fn new() -> Self {
        Tally {
            violations: 0,
            fines: Decimal::ZERO,
        }
    }

    /// Count a new violation and add the adjusted amount of its fine
    ///
    /// `commit` receives the id the violation will get and stores the fine.
    /// The aggregates are only updated once `commit` succeeds, so both
    /// aggregates and the owner's ledger change together or not at all.
    ///
    /// # Returns
    ///
    /// * `Some(T)` - Whatever `commit` produced
    /// * `None` - If the fine total would overflow or `commit` failed
    ///   (nothing is changed)
    pub fn record_violation<T>(
        &mut self,
        adjusted: Decimal,
        commit: impl FnOnce(ViolationId) -> Option<T>,
    ) -> Option<T> {
        let fines = self.fines.checked_add(adjusted)?;
        let violations = self.violations.checked_add(1)?;

        let committed = commit(ViolationId(violations))?;
        self.fines = fines;
        self.violations = violations;

        Some(committed)
    }

    /// Replace a fine's old adjusted amount with its new one
    ///
    /// `commit` re-prices the fine itself; the total only moves once it
    /// succeeds. Returns `None` and leaves the total unchanged on overflow.
    pub fn replace_fine<T>(
        &mut self,
        previous: Decimal,
        adjusted: Decimal,
        commit: impl FnOnce() -> Option<T>,
    ) -> Option<T> {
        let fines = self.fines.checked_sub(previous)?.checked_add(adjusted)?;

        let committed = commit()?;
        self.fines = fines;

        Some(committed)
    }

    pub fn violations(&self) -> u64 {
        self.violations
    }

    pub fn fines(&self) -> Decimal {
        self.fines
    }

    pub fn totals(&self) -> Totals {
        Totals {
            violations: self.violations,
            fines: self.fines,
        }
    }
}
