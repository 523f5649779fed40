//! Error types for client construction and validation batches

use thiserror::Error;

/// One template the remote validation endpoint rejected
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub template: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum CfnError {
    /// A client cannot be bound to an empty region
    #[error("region must not be empty")]
    EmptyRegion,

    /// Raised after every template in the batch was attempted
    #[error("template validation failed: {}", summarize(failures))]
    ValidationFailed { failures: Vec<ValidationFailure> },
}

fn summarize(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.template, f.reason))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_every_failed_template() {
        let err = CfnError::ValidationFailed {
            failures: vec![
                ValidationFailure {
                    template: "a.template".to_string(),
                    reason: "malformed JSON".to_string(),
                },
                ValidationFailure {
                    template: "b.template".to_string(),
                    reason: "unknown resource type".to_string(),
                },
            ],
        };
        let message = err.to_string();
        assert!(message.contains("a.template (malformed JSON)"));
        assert!(message.contains("b.template (unknown resource type)"));
    }
}
