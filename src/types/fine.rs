//! Fine-related types
//!
//! This module defines the fine classification tag, fine identifiers and the
//! `Fine` itself. The adjusted amount of a fine is always derived from its
//! base amount through the policy of the classification it was issued with.

use super::error::FineError;
use super::person::PersonId;
use super::violation::ViolationId;
use crate::core::policy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification chosen when a violation is reported
///
/// Determines which policy adjusts the base amount of the fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FineClassification {
    /// The base amount is charged as-is
    Standard,

    /// The base amount is doubled
    Heavy,
}

impl FromStr for FineClassification {
    type Err = FineError;

    /// Parse a classification, accepting the names case-insensitively and the
    /// legacy `0`/`1` heavy flag
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "0" => Ok(FineClassification::Standard),
            "heavy" | "1" => Ok(FineClassification::Heavy),
            _ => Err(FineError::invalid_classification(s)),
        }
    }
}

impl fmt::Display for FineClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FineClassification::Standard => f.write_str("standard"),
            FineClassification::Heavy => f.write_str("heavy"),
        }
    }
}

/// Identifier of a fine: its owner and its 1-based position in the owner's ledger
///
/// Ledger positions never change, so the id is stable and does not depend on
/// the order in which different people's records were processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FineId {
    pub person: PersonId,
    pub seq: u32,
}

impl fmt::Display for FineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.person, self.seq)
    }
}

/// A base amount priced by its classification's policy
///
/// The adjusted amount is computed once, when the charge is created, and is
/// carried unchanged into the fine it is issued as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Charge {
    base: Decimal,
    classification: FineClassification,
    adjusted: Decimal,
}

impl Charge {
    /// Price `base` under `classification`
    ///
    /// Returns `None` if the policy adjustment overflows `Decimal`.
    pub fn new(base: Decimal, classification: FineClassification) -> Option<Self> {
        let adjusted = policy::adjusted_amount(classification, base)?;

        Some(Charge {
            base,
            classification,
            adjusted,
        })
    }

    pub fn base(&self) -> Decimal {
        self.base
    }

    pub fn classification(&self) -> FineClassification {
        self.classification
    }

    pub fn adjusted(&self) -> Decimal {
        self.adjusted
    }

    /// Attach the charge to a recorded violation
    pub fn issue(self, violation: ViolationId) -> Fine {
        Fine {
            base: self.base,
            classification: self.classification,
            adjusted: self.adjusted,
            violation,
        }
    }
}

/// A monetary penalty attached to one violation
#[derive(Debug, Clone, PartialEq)]
pub struct Fine {
    base: Decimal,
    classification: FineClassification,
    adjusted: Decimal,
    violation: ViolationId,
}

impl Fine {
    /// Issue a fine for a violation
    ///
    /// Returns `None` if the policy adjustment overflows `Decimal`.
    pub fn issue(
        base: Decimal,
        classification: FineClassification,
        violation: ViolationId,
    ) -> Option<Self> {
        Some(Charge::new(base, classification)?.issue(violation))
    }

    pub fn base(&self) -> Decimal {
        self.base
    }

    pub fn classification(&self) -> FineClassification {
        self.classification
    }

    /// Amount after the classification policy was applied
    pub fn adjusted(&self) -> Decimal {
        self.adjusted
    }

    pub fn violation(&self) -> ViolationId {
        self.violation
    }

    /// Price a new base amount under this fine's own classification
    pub fn reprice(&self, base: Decimal) -> Option<Charge> {
        Charge::new(base, self.classification)
    }

    /// Replace the base and adjusted amounts with those of `charge`
    ///
    /// The classification the fine was issued with never changes.
    pub(crate) fn amend(&mut self, charge: Charge) {
        self.base = charge.base;
        self.adjusted = charge.adjusted;
    }

    /// Human-readable line naming the policy and the current adjusted amount
    pub fn report(&self) -> String {
        policy::policy_line(self.classification, self.adjusted)
    }
}
