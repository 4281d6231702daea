//! # Error Types
//!
//! Structured error types for pace_core. Formula operations fail fast with
//! a typed error naming the offending field instead of letting `NaN` or
//! `Infinity` reach a result.
//!
//! ## Example
//!
//! ```rust
//! use pace_core::errors::{CalcError, CalcResult};
//!
//! fn validate_distance(distance_m: f64) -> CalcResult<()> {
//!     if distance_m <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "distance_m".to_string(),
//!             value: distance_m.to_string(),
//!             reason: "Distance must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pace_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and persistence operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (negative, non-finite, out of range)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A divisor (elapsed time, distance, pace) is zero
    #[error("Division by zero: '{field}' must be greater than zero")]
    DivisionByZero { field: String },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Calculation produced no meaningful result
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// The local key-value store cannot be read or written
    #[error("Persistence unavailable: {operation} on '{key}' - {reason}")]
    PersistenceUnavailable {
        operation: String,
        key: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file could not be parsed
    #[error("Configuration error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(field: impl Into<String>) -> Self {
        CalcError::DivisionByZero { field: field.into() }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a PersistenceUnavailable error
    pub fn persistence(
        operation: impl Into<String>,
        key: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::PersistenceUnavailable {
            operation: operation.into(),
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Name of the input field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. }
            | CalcError::DivisionByZero { field }
            | CalcError::MissingField { field } => Some(field),
            _ => None,
        }
    }

    /// Persistence failures degrade to an in-memory session; everything
    /// else must be fixed by the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::PersistenceUnavailable { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::PersistenceUnavailable { .. } => "PERSISTENCE_UNAVAILABLE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

/// Reject non-finite or negative values for `field`.
pub(crate) fn ensure_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value must be a finite number",
        ));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Value cannot be negative",
        ));
    }
    Ok(value)
}

/// Reject anything that is not a finite, strictly positive divisor.
pub(crate) fn ensure_positive(field: &str, value: f64) -> CalcResult<f64> {
    ensure_non_negative(field, value)?;
    if value == 0.0 {
        return Err(CalcError::division_by_zero(field));
    }
    Ok(value)
}

/// Reject a computed `output` that overflowed or lost meaning. Inputs can
/// each be finite while their quotient or product is not.
pub(crate) fn ensure_finite_result(
    calculation_type: &str,
    output: &str,
    value: f64,
) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::calculation_failed(
            calculation_type,
            format!("{} is out of range ({})", output, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("distance_m", "-5", "Distance must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::division_by_zero("time").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(
            CalcError::persistence("write", "runningStats", "disk full").error_code(),
            "PERSISTENCE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_only_persistence_is_recoverable() {
        assert!(CalcError::persistence("read", "formData", "denied").is_recoverable());
        assert!(!CalcError::division_by_zero("time").is_recoverable());
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("d", 2.5).unwrap(), 2.5);
        assert_eq!(ensure_positive("d", 0.0).unwrap_err(), CalcError::division_by_zero("d"));
        assert_eq!(ensure_positive("d", -1.0).unwrap_err().error_code(), "INVALID_INPUT");
        assert_eq!(ensure_positive("d", f64::NAN).unwrap_err().field(), Some("d"));
        assert!(ensure_positive("d", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_finite_result() {
        assert_eq!(ensure_finite_result("pace", "pace", 300.0).unwrap(), 300.0);
        let err = ensure_finite_result("pace", "pace", f64::INFINITY).unwrap_err();
        assert_eq!(err.error_code(), "CALCULATION_FAILED");
        assert!(err.to_string().contains("out of range"));
        assert!(ensure_finite_result("pace", "speed", f64::NAN).is_err());
    }
}
