//! Error types for the Alexander polynomial pipeline.

use thiserror::Error;

/// Errors surfaced by polynomial arithmetic and knot construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlexanderError {
    /// A degree-dependent operation was applied to the zero polynomial.
    #[error("{operation} is undefined on the zero polynomial")]
    EmptyPolynomial { operation: &'static str },

    /// The divisor has no terms.
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// The divisor does not divide the dividend exactly.
    #[error("inexact division: {reason}")]
    InexactDivision { reason: String },

    /// The Fox derivative of the empty word was requested.
    #[error("relator is empty")]
    EmptyRelator,

    /// A relator character outside {a, b, A, B}.
    #[error("invalid relator letter '{0}' (expected one of a, b, A, B)")]
    InvalidLetter(char),

    /// Knot parameters rejected by a checked constructor.
    #[error("invalid knot parameters: {reason}")]
    InvalidParameters { reason: String },
}

pub type Result<T> = std::result::Result<T, AlexanderError>;
