//! Error types for gridseer.
//!
//! All errors are strongly typed using thiserror. None of them are
//! retried internally: propagation is deterministic and total, so a
//! failed operation fails identically on retry. Every error surfaces
//! verbatim to the invoking harness.

use thiserror::Error;

use crate::domain::Attribute;
use crate::grid::{CellPos, GridDims, Move};

/// Validation errors raised before any state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// An observation or query referenced a cell outside the grid.
    #[error("cell {cell} is outside the {dims} grid")]
    InvalidCoordinate {
        /// The offending position.
        cell: CellPos,
        /// The grid it was checked against.
        dims: GridDims,
    },

    /// A grid dimension was zero.
    #[error("grid dimensions {rows}x{cols} must be non-zero")]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A scenario asked for more hazards than the board can hold.
    #[error("{requested} hazards exceed the scenario capacity of {capacity}")]
    TooManyHazards {
        /// Requested hazard count.
        requested: usize,
        /// Cells actually available for hazard placement.
        capacity: usize,
    },

    /// An explicit board layout placed items inconsistently.
    #[error("invalid board layout: {reason}")]
    InvalidLayout {
        /// What made the layout unusable.
        reason: String,
    },

    /// A move would step off the grid.
    #[error("move {mv} from {from} leaves the grid")]
    IllegalMove {
        /// The position the move started from.
        from: CellPos,
        /// The rejected move.
        mv: Move,
    },
}

/// Inference errors: the rule set met an inconsistent world.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// An observation or propagation step would force a domain already
    /// fixed to the opposite value. Fatal; the engine stops rather than
    /// silently picking a value.
    #[error(
        "contradiction at {cell}: {attribute} is fixed to {fixed} but {attempted} was forced"
    )]
    Contradiction {
        /// The cell whose domain was violated.
        cell: CellPos,
        /// The attribute whose domain was violated.
        attribute: Attribute,
        /// The value the domain is fixed to.
        fixed: bool,
        /// The value the step attempted to force.
        attempted: bool,
    },
}

/// Navigation errors: the policy has no admissible step left.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// No frontier cell is safe or speculatively enterable, and the
    /// goal has not been located. Unrecoverable: retrying without new
    /// information cannot change the outcome.
    #[error("no reachable target: the explored region offers no admissible frontier cell")]
    NoReachableTarget,

    /// The greedy walk through visited cells could not make progress
    /// toward the target.
    #[error("no path through visited cells from {from} toward {target}")]
    PathUnavailable {
        /// Where the walk started.
        from: CellPos,
        /// The cell the walk was heading for.
        target: CellPos,
    },
}

/// Top-level error type for gridseer.
#[derive(Debug, Error)]
pub enum SeerError {
    /// A caller bug caught before any state changed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An inconsistency between observations and the rule set.
    #[error("inference error: {0}")]
    Inference(#[from] InferenceError),

    /// The navigation policy found no admissible step.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// An internal invariant was breached.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the breached invariant.
        message: String,
    },
}

impl SeerError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an inference error.
    #[must_use]
    pub const fn is_inference(&self) -> bool {
        matches!(self, Self::Inference(_))
    }

    /// Returns true if this is a navigation error.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if the session cannot continue after this error.
    ///
    /// Validation errors leave all state untouched, so the caller may
    /// correct the call and proceed. Everything else ends the session.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Validation(_))
    }
}

/// Result type alias for gridseer operations.
pub type SeerResult<T> = Result<T, SeerError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDims {
        GridDims::new(5, 5).unwrap()
    }

    #[test]
    fn test_invalid_coordinate_message() {
        let err = ValidationError::InvalidCoordinate {
            cell: CellPos::new(7, 0),
            dims: dims(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("(7,0)"));
        assert!(msg.contains("5x5"));
    }

    #[test]
    fn test_contradiction_message() {
        let err = InferenceError::Contradiction {
            cell: CellPos::new(1, 2),
            attribute: Attribute::Hazard,
            fixed: false,
            attempted: true,
        };
        let msg = format!("{err}");
        assert!(msg.contains("(1,2)"));
        assert!(msg.contains("hazard"));
        assert!(msg.contains("fixed to false"));
    }

    #[test]
    fn test_seer_error_from_validation() {
        let err: SeerError = ValidationError::InvalidDimensions { rows: 0, cols: 4 }.into();
        assert!(err.is_validation());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_seer_error_from_inference() {
        let err: SeerError = InferenceError::Contradiction {
            cell: CellPos::new(0, 0),
            attribute: Attribute::Warn,
            fixed: true,
            attempted: false,
        }
        .into();
        assert!(err.is_inference());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_seer_error_from_navigation() {
        let err: SeerError = NavigationError::NoReachableTarget.into();
        assert!(err.is_navigation());
        assert!(err.is_fatal());
    }

    #[test]
    fn test_seer_error_internal() {
        let err = SeerError::internal("queue invariant broken");
        assert!(err.is_internal());
        assert!(err.is_fatal());
        assert!(format!("{err}").contains("queue invariant broken"));
    }
}
