// Stack lifecycle operations.
//
// Each operation is a single, unretried round trip. Remote-side errors
// (stack not found, already exists, conflicting in-progress operation) are
// surfaced to the caller unchanged; nothing here interprets or classifies
// failure codes.

use anyhow::{Context, Result};
use aws_sdk_cloudformation::types::{Capability, Parameter};
use aws_sdk_cloudformation::Client;
use std::collections::BTreeMap;
use tracing::info;

/// Convert the resolved parameter map into the request parameter list.
pub fn request_parameters(parameters: &BTreeMap<String, String>) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|(key, value)| {
            Parameter::builder()
                .parameter_key(key)
                .parameter_value(value)
                .build()
        })
        .collect()
}

/// Convert capability names into the request capability list.
pub fn request_capabilities(capabilities: &[String]) -> Vec<Capability> {
    capabilities
        .iter()
        .map(|name| Capability::from(name.as_str()))
        .collect()
}

/// Fetch and log the full description of every stack matching `stack_name`.
pub async fn describe(client: &Client, stack_name: &str) -> Result<()> {
    let output = client
        .describe_stacks()
        .stack_name(stack_name)
        .send()
        .await
        .context("Failed to describe stack")?;

    for stack in output.stacks() {
        info!(
            name = stack.stack_name().unwrap_or_default(),
            id = stack.stack_id().unwrap_or_default(),
            status = ?stack.stack_status(),
            created = ?stack.creation_time(),
            "stack"
        );
        for parameter in stack.parameters() {
            info!(
                key = parameter.parameter_key().unwrap_or_default(),
                value = parameter.parameter_value().unwrap_or_default(),
                "parameter"
            );
        }
        for stack_output in stack.outputs() {
            info!(
                key = stack_output.output_key().unwrap_or_default(),
                value = stack_output.output_value().unwrap_or_default(),
                "output"
            );
        }
    }

    Ok(())
}

/// Fetch and log status plus status reason per stack matching `stack_name`.
pub async fn status(client: &Client, stack_name: &str) -> Result<()> {
    let output = client
        .describe_stacks()
        .stack_name(stack_name)
        .send()
        .await
        .context("Failed to fetch stack status")?;

    for stack in output.stacks() {
        info!(
            name = stack.stack_name().unwrap_or_default(),
            status = ?stack.stack_status(),
            reason = stack.stack_status_reason().unwrap_or_default(),
            "stack status"
        );
    }

    Ok(())
}

/// Submit a create request; returns the new stack's identifier.
pub async fn create(
    client: &Client,
    stack_name: &str,
    template_body: &str,
    parameters: &BTreeMap<String, String>,
    capabilities: &[String],
) -> Result<String> {
    let output = client
        .create_stack()
        .stack_name(stack_name)
        .template_body(template_body)
        .set_parameters(Some(request_parameters(parameters)))
        .set_capabilities(Some(request_capabilities(capabilities)))
        .send()
        .await
        .context("Failed to create stack")?;

    let stack_id = output
        .stack_id()
        .context("create response carried no stack id")?
        .to_string();
    info!(stack = stack_name, id = %stack_id, "stack creation initiated");

    Ok(stack_id)
}

/// Submit an update request; returns the updated stack's identifier.
pub async fn update(
    client: &Client,
    stack_name: &str,
    template_body: &str,
    parameters: &BTreeMap<String, String>,
    capabilities: &[String],
) -> Result<String> {
    let output = client
        .update_stack()
        .stack_name(stack_name)
        .template_body(template_body)
        .set_parameters(Some(request_parameters(parameters)))
        .set_capabilities(Some(request_capabilities(capabilities)))
        .send()
        .await
        .context("Failed to update stack")?;

    let stack_id = output
        .stack_id()
        .context("update response carried no stack id")?
        .to_string();
    info!(stack = stack_name, id = %stack_id, "stack update initiated");

    Ok(stack_id)
}

/// Submit a delete request. Deletion is asynchronous on the remote side;
/// this only confirms initiation.
pub async fn delete(client: &Client, stack_name: &str) -> Result<()> {
    client
        .delete_stack()
        .stack_name(stack_name)
        .send()
        .await
        .context("Failed to delete stack")?;

    info!(stack = stack_name, "stack deletion initiated");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_map_converts_to_request_list() {
        let parameters = BTreeMap::from([
            ("Env".to_string(), "staging".to_string()),
            ("InstanceType".to_string(), "t3.micro".to_string()),
        ]);

        let request = request_parameters(&parameters);
        assert_eq!(request.len(), 2);
        assert_eq!(request[0].parameter_key(), Some("Env"));
        assert_eq!(request[0].parameter_value(), Some("staging"));
        assert_eq!(request[1].parameter_key(), Some("InstanceType"));
        assert_eq!(request[1].parameter_value(), Some("t3.micro"));
    }

    #[test]
    fn empty_parameter_map_converts_to_empty_list() {
        assert!(request_parameters(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn capability_names_convert_to_sdk_capabilities() {
        let capabilities = vec!["CAPABILITY_IAM".to_string()];
        let request = request_capabilities(&capabilities);
        assert_eq!(request, vec![Capability::CapabilityIam]);
    }
}
