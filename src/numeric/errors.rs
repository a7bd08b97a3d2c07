// ============================================================================
// Numeric Errors
// Error types for arbitrary-precision float arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during big-float arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Attempted division by zero
    DivisionByZero,
    /// Square root of a negative value
    NegativeSqrt,
    /// Operands carry different working precisions
    PrecisionMismatch {
        /// Precision of the left operand, in bits
        left: u64,
        /// Precision of the right operand, in bits
        right: u64,
    },
    /// Working precision of zero bits requested
    InvalidPrecision,
    /// Binary exponent left the representable range
    ExponentOverflow,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::NegativeSqrt => write!(f, "square root of a negative value"),
            NumericError::PrecisionMismatch { left, right } => write!(
                f,
                "precision mismatch: {} bits vs {} bits",
                left, right
            ),
            NumericError::InvalidPrecision => {
                write!(f, "invalid precision: must be at least one bit")
            },
            NumericError::ExponentOverflow => {
                write!(f, "exponent overflow: value out of representable range")
            },
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
