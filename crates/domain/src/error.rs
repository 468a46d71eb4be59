//! Domain error types.

use thiserror::Error;

/// Errors produced by `Money` construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// The nanos component is out of range or disagrees in sign with the units.
    #[error("Invalid money value: units={units}, nanos={nanos}")]
    InvalidValue { units: i64, nanos: i32 },

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: String, right: String },

    /// The result does not fit in the units range.
    #[error("Money arithmetic overflow")]
    Overflow,
}
