// ============================================================================
// Pipeline Errors
// Failures surfaced by a pi computation run
// ============================================================================

use crate::numeric::NumericError;
use std::fmt;

/// Errors returned by [`compute_pi`](crate::engine::compute_pi) and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PiError {
    /// Requested digit count was zero; nothing was allocated
    InvalidDigitCount,
    /// The big-number backend reported a fault
    Backend(NumericError),
    /// A pool task panicked before finishing its work
    WorkerPanicked {
        /// Name of the phase the task belonged to
        phase: &'static str,
    },
    /// A task stopped early because a sibling task failed
    Aborted,
    /// Term sequences were missing a role or disagreed in length or precision
    MalformedSeries,
}

impl fmt::Display for PiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiError::InvalidDigitCount => {
                write!(f, "invalid digit count: at least one digit is required")
            },
            PiError::Backend(err) => write!(f, "arithmetic backend failure: {}", err),
            PiError::WorkerPanicked { phase } => {
                write!(f, "worker panicked during {} phase", phase)
            },
            PiError::Aborted => write!(f, "task aborted after a sibling failure"),
            PiError::MalformedSeries => {
                write!(f, "malformed series: term sequences do not line up")
            },
        }
    }
}

impl std::error::Error for PiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PiError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NumericError> for PiError {
    fn from(err: NumericError) -> Self {
        PiError::Backend(err)
    }
}

/// Result type alias for pipeline operations
pub type PiResult<T> = Result<T, PiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        assert_eq!(
            PiError::InvalidDigitCount.to_string(),
            "invalid digit count: at least one digit is required"
        );
        assert_eq!(
            PiError::WorkerPanicked { phase: "reduction" }.to_string(),
            "worker panicked during reduction phase"
        );
    }

    #[test]
    fn test_backend_conversion_keeps_source() {
        let err: PiError = NumericError::DivisionByZero.into();
        assert_eq!(err, PiError::Backend(NumericError::DivisionByZero));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "arithmetic backend failure: division by zero"
        );
    }
}
