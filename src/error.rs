//! Error types for the prime-counting engine.

use thiserror::Error;

/// Errors that can occur while computing `pi(x)` or a related quantity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrimeCountError {
    /// `x` exceeds `max_x(alpha)` for the selected algorithm and tuning factor.
    #[error("x = {x} exceeds the maximum supported value {max} for alpha = {alpha}")]
    ExceedsMaxX { x: String, max: String, alpha: f64 },

    /// A string could not be parsed into an integer at the API boundary.
    #[error("failed to parse '{0}' as an integer")]
    ParseError(String),

    /// The optional double-check recomputation (a second alpha) disagreed
    /// with the first result. This indicates a bug in the engine, not bad
    /// input, and is always fatal.
    #[error("verification mismatch: pi(x) = {first} on the first pass but {second} on the double-check pass")]
    VerificationMismatch { first: String, second: String },
}

/// Result type for prime-counting operations.
pub type Result<T> = std::result::Result<T, PrimeCountError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrimeCountError::ParseError("abc".to_string());
        assert_eq!(err.to_string(), "failed to parse 'abc' as an integer");

        let err = PrimeCountError::ExceedsMaxX {
            x: "1".to_string(),
            max: "0".to_string(),
            alpha: 1.0,
        };
        assert!(err.to_string().contains("exceeds the maximum"));
    }
}
