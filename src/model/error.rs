use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// A single violated configuration invariant. `resolve` reports every
/// violation in the batch, never just the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFailure {
    pub field: String,
    pub message: String,
    pub suggested_value: f64
}

impl ValidationFailure {
    pub fn new(field: &str, message: impl Into<String>, suggested_value: f64) -> Self {
        ValidationFailure {
            field: field.to_string(),
            message: message.into(),
            suggested_value
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (suggested: {})",
            self.field, self.message, self.suggested_value
        )
    }
}

/// Engine failures. All are deterministic given identical inputs and are
/// reported synchronously; nothing here is transient or retryable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A configuration overlay violated one or more invariants. The prior
    /// configuration stays active.
    #[error("configuration rejected with {} violation(s)", .0.len())]
    ConfigValidation(Vec<ValidationFailure>),

    #[error("finishing order is empty")]
    EmptyFinishingOrder,

    #[error("finishing positions must be dense and 1-based: {reason}")]
    InvalidFinishingOrder { reason: String },

    /// Out-of-range finalist ratio is flagged, never silently clamped.
    #[error("finals eligibility ratio {ratio:.3} outside allowed range [{min:.2}, {max:.2}]")]
    FinalsEligibility { ratio: f64, min: f64, max: f64 },

    #[error("finals declared with {finalists} finalist(s) but qualifying field is empty")]
    EmptyQualifyingField { finalists: u32 }
}

impl From<Vec<ValidationFailure>> for EngineError {
    fn from(failures: Vec<ValidationFailure>) -> Self {
        EngineError::ConfigValidation(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_resolve_converts_into_an_engine_error() {
        let failures = vec![ValidationFailure::new(
            "distribution.flat_fraction",
            "must lie in [0, 1]",
            0.1
        )];

        let error: EngineError = failures.clone().into();
        assert_eq!(error, EngineError::ConfigValidation(failures));
        assert_eq!(error.to_string(), "configuration rejected with 1 violation(s)");
    }

    #[test]
    fn validation_failure_displays_field_and_suggestion() {
        let failure = ValidationFailure::new("rating.min_uncertainty", "must be below max_uncertainty", 50.0);

        assert_eq!(
            failure.to_string(),
            "rating.min_uncertainty: must be below max_uncertainty (suggested: 50)"
        );
    }
}
