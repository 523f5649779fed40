// Template validation batch.
//
// Each file is submitted to the remote validation endpoint sequentially and
// best-effort: one rejected template never prevents validation of the
// others. Failures are collected and escalated only after every file was
// attempted.

use crate::error::{CfnError, ValidationFailure};
use async_trait::async_trait;
use aws_sdk_cloudformation::error::DisplayErrorContext;
use aws_sdk_cloudformation::Client;
use stackform_config::TemplateFile;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Remote template-validation endpoint, abstracted so batch semantics can
/// be exercised without a live service.
#[async_trait]
pub trait TemplateValidator {
    /// Validate one template body. Declared parameter keys on success, the
    /// service's rendered failure reason otherwise.
    async fn validate_body(&self, body: &str) -> Result<Vec<String>, String>;
}

#[async_trait]
impl TemplateValidator for Client {
    async fn validate_body(&self, body: &str) -> Result<Vec<String>, String> {
        match self.validate_template().template_body(body).send().await {
            Ok(output) => Ok(output
                .parameters()
                .iter()
                .filter_map(|p| p.parameter_key().map(str::to_string))
                .collect()),
            Err(err) => Err(DisplayErrorContext(&err).to_string()),
        }
    }
}

/// Outcome of validating a single template file
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub path: PathBuf,
    /// Declared parameter keys on success, failure reason otherwise
    pub result: Result<Vec<String>, String>,
}

impl ValidationOutcome {
    fn template_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Aggregated results of one validation run. Successful outcomes stay
/// readable even when the batch as a whole fails.
#[derive(Debug, Default)]
pub struct ValidationReport {
    outcomes: Vec<ValidationOutcome>,
}

impl ValidationReport {
    pub fn outcomes(&self) -> &[ValidationOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Escalate collected failures. Only called once the whole batch was
    /// attempted.
    pub fn ensure_ok(&self) -> Result<(), CfnError> {
        if !self.has_failures() {
            return Ok(());
        }
        Err(CfnError::ValidationFailed {
            failures: self
                .failures()
                .map(|outcome| ValidationFailure {
                    template: outcome.template_name(),
                    reason: outcome
                        .result
                        .as_ref()
                        .err()
                        .cloned()
                        .unwrap_or_default(),
                })
                .collect(),
        })
    }
}

/// Validate every file in order, one blocking round trip per file.
pub async fn validate_templates<V>(validator: &V, files: &[TemplateFile]) -> ValidationReport
where
    V: TemplateValidator + ?Sized,
{
    let mut outcomes = Vec::with_capacity(files.len());
    for file in files {
        let result = validator.validate_body(&file.body).await;
        debug!(template = %file.path.display(), result = ?result, "raw validation result");
        match &result {
            Ok(parameters) => {
                info!(
                    template = %file.path.display(),
                    parameters = parameters.len(),
                    "template is valid"
                );
            }
            Err(reason) => {
                error!(template = %file.path.display(), %reason, "template failed validation");
            }
        }
        outcomes.push(ValidationOutcome {
            path: file.path.clone(),
            result,
        });
    }
    ValidationReport { outcomes }
}
