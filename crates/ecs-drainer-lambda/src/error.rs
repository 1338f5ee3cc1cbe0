//! Error categories surfaced to the Lambda runtime
//!
//! Three categories only: the event was not ours to handle (validation), a
//! resource the procedure depends on is missing (not found), or an AWS call
//! failed and is passed through untouched. The orchestrator owns all retry.

use thiserror::Error;

/// Errors produced by a single drain invocation.
#[derive(Debug, Error)]
pub enum DrainError {
    /// The event is not a scale-in terminate lifecycle action.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// A resource the procedure depends on is missing.
    #[error("{what} not found: {detail}")]
    NotFound { what: &'static str, detail: String },

    /// Pass-through failure from an AWS capability call.
    #[error(transparent)]
    Aws(#[from] anyhow::Error),
}

impl DrainError {
    /// Build a validation error.
    pub fn validation(reason: impl Into<String>) -> Self {
        DrainError::Validation {
            reason: reason.into(),
        }
    }

    /// Build a not-found error for a named resource kind.
    pub fn not_found(what: &'static str, detail: impl Into<String>) -> Self {
        DrainError::NotFound {
            what,
            detail: detail.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, DrainError::Validation { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DrainError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_includes_reason() {
        let err = DrainError::validation("`detail-type` mismatch");
        assert!(err.is_validation());
        assert!(err.to_string().contains("`detail-type` mismatch"));
    }

    #[test]
    fn not_found_display_names_the_resource() {
        let err = DrainError::not_found("container instance", "cluster web has no i-abc");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
        assert_eq!(
            err.to_string(),
            "container instance not found: cluster web has no i-abc"
        );
    }

    #[test]
    fn aws_errors_pass_through_transparently() {
        let inner = anyhow::anyhow!("DescribeTasks throttled");
        let err = DrainError::from(inner);
        assert!(!err.is_validation());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "DescribeTasks throttled");
    }
}
