use std::collections::TryReserveError;

use thiserror::Error;

// =============================================================================
// Error taxonomy
// =============================================================================

/// Failures reported by [`Stack`](crate::Stack).
///
/// Both variants mean the buffer could not be obtained. Popping an empty
/// stack is not an error; it yields `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("failed to allocate a buffer of {requested} slots: {reason}")]
    AllocationFailure { requested: usize, reason: String },

    #[error("cannot grow past {current} slots: doubling overflows usize")]
    CapacityOverflow { current: usize },
}

impl StackError {
    pub fn from_reserve(requested: usize, err: TryReserveError) -> Self {
        Self::AllocationFailure {
            requested,
            reason: err.to_string(),
        }
    }

    /// The doubled capacity did not fit in `usize`.
    pub fn capacity_overflow(current: usize) -> Self {
        Self::CapacityOverflow { current }
    }

    /// Slot count the failed reservation asked for, if one was attempted.
    pub fn requested(&self) -> Option<usize> {
        match self {
            Self::AllocationFailure { requested, .. } => Some(*requested),
            Self::CapacityOverflow { .. } => None,
        }
    }
}

pub type Result<T, E = StackError> = std::result::Result<T, E>;
