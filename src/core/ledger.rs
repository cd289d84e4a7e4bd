//! Per-person fine ledger
//!
//! An ordered collection of fines. Insertion order is reporting order and is
//! never changed; a fine's 1-based position doubles as its sequence number in
//! `FineId`.
//!
//! The ledger keeps its total alongside the fines. Every change to the total
//! is checked, and a change that would overflow leaves the ledger untouched,
//! so the total of an accepted ledger is always representable.

use crate::types::{Charge, Fine};
use rust_decimal::Decimal;

/// Ordered collection of a person's fines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FineLedger {
    fines: Vec<Fine>,
    total: Decimal,
}

impl FineLedger {
    pub fn new() -> Self {
        FineLedger {
            fines: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    /// Append a fine to the end of the ledger
    ///
    /// # Returns
    ///
    /// * `Some(seq)` - The 1-based position of the fine in the ledger
    /// * `None` - If the ledger total would overflow (nothing is changed)
    pub fn append(&mut self, fine: Fine) -> Option<u32> {
        let total = self.total.checked_add(fine.adjusted())?;
        let seq = u32::try_from(self.fines.len()).ok()?.checked_add(1)?;

        self.fines.push(fine);
        self.total = total;

        Some(seq)
    }

    /// Look up a fine by its 1-based position
    pub fn get(&self, seq: u32) -> Option<&Fine> {
        let index = (seq as usize).checked_sub(1)?;
        self.fines.get(index)
    }

    /// Re-price the fine at `seq` with `charge`
    ///
    /// # Returns
    ///
    /// * `Some(previous)` - The fine's previous adjusted amount
    /// * `None` - If there is no such fine or the ledger total would
    ///   overflow (nothing is changed)
    pub fn amend(&mut self, seq: u32, charge: Charge) -> Option<Decimal> {
        let index = (seq as usize).checked_sub(1)?;
        let fine = self.fines.get_mut(index)?;

        let previous = fine.adjusted();
        let total = self
            .total
            .checked_sub(previous)?
            .checked_add(charge.adjusted())?;

        fine.amend(charge);
        self.total = total;

        Some(previous)
    }

    /// Sum of the adjusted amounts of all fines in the ledger
    pub fn total_amount(&self) -> Decimal {
        self.total
    }

    /// One report line per fine, in insertion order
    pub fn report_all(&self) -> Vec<String> {
        self.fines.iter().map(Fine::report).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fine> {
        self.fines.iter()
    }

    pub fn len(&self) -> usize {
        self.fines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fines.is_empty()
    }
}
