//! Error types for rule-level contract violations.

use thiserror::Error;

/// Raised when a caller hands the rules a selection it should have validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("selection index {index} is out of range for {len} entries")]
    InvalidSelection { index: usize, len: usize },

    #[error("selection index {index} was chosen more than once")]
    DuplicateSelection { index: usize },

    #[error("random source produced roll {roll}, outside every known outcome")]
    UnknownOutcome { roll: i32 },
}
