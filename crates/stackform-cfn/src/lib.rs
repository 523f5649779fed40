// stackform-cfn - CloudFormation client construction and stack operations
//
// Everything remote lives here: the region-bound client factory, the
// template validation batch, and the five stack lifecycle operations.
// Remote failures are never interpreted or retried; they propagate to the
// caller with context attached.

mod client;
mod error;
mod stack;
mod validate;

pub use client::ClientFactory;
pub use error::{CfnError, ValidationFailure};
pub use stack::{
    create, delete, describe, request_capabilities, request_parameters, status, update,
};
pub use validate::{validate_templates, TemplateValidator, ValidationOutcome, ValidationReport};

pub use aws_sdk_cloudformation::Client;
