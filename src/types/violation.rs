//! Violation records
//!
//! A violation is an immutable description of an offense. Its identity is the
//! order in which it was created, not its description: two violations with
//! the same text are still two violations.

use std::fmt;

/// Creation-order identifier of a violation (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViolationId(pub u64);

impl fmt::Display for ViolationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{}", self.0)
    }
}

/// A recorded offense
///
/// Owned by the vehicle that recorded it. Fines refer to it by `ViolationId`
/// only, so a violation's lifetime never depends on its fine.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    id: ViolationId,
    description: String,
}

impl Violation {
    /// Create a violation with an id handed out by the registry tally
    pub fn new(id: ViolationId, description: impl Into<String>) -> Self {
        Violation {
            id,
            description: description.into(),
        }
    }

    pub fn id(&self) -> ViolationId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
