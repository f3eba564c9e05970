use std::fmt;

/// Malformed input handed to the checked transition entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The neighbor slice was not exactly one Moore neighborhood.
    NeighborCount { expected: usize, found: usize },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NeighborCount { expected, found } => write!(
                f,
                "transition needs exactly {expected} neighbors, got {found}"
            ),
        }
    }
}

impl std::error::Error for TransitionError {}
