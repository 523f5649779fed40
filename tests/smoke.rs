//! Real-account stack lifecycle smoke test
//!
//! Runs the full validate -> create -> status -> update -> describe ->
//! delete pass against a live CloudFormation endpoint. Never part of a
//! normal test run.
//!
//! ## Prerequisites
//! - AWS credentials configured (IAM role or environment variables)
//!
//! ## Environment Variables
//! - `SMOKE_TEST_AWS_REGION`: AWS region (default: "us-west-2")
//!
//! Run with: cargo test --features smoke-aws --test smoke
#![cfg(feature = "smoke-aws")]

use anyhow::{Context, Result};
use aws_sdk_cloudformation::types::StackStatus;
use stackform_cfn::ClientFactory;
use stackform_config::TemplateFile;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

const TEMPLATE: &str = r#"{
  "AWSTemplateFormatVersion": "2010-09-09",
  "Description": "stackform smoke test stack",
  "Parameters": {
    "Env": { "Type": "String" }
  },
  "Resources": {
    "Handle": { "Type": "AWS::CloudFormation::WaitConditionHandle" }
  }
}"#;

/// Poll until the stack reaches `expected`, bounded so a wedged stack fails
/// the test instead of hanging it.
async fn wait_for_status(
    client: &aws_sdk_cloudformation::Client,
    stack_name: &str,
    expected: StackStatus,
) -> Result<()> {
    let mut attempts = 0;
    loop {
        let output = client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .context("Failed to describe stack while waiting")?;
        let current = output
            .stacks()
            .first()
            .and_then(|s| s.stack_status().cloned());

        if current.as_ref() == Some(&expected) {
            return Ok(());
        }

        attempts += 1;
        if attempts > 30 {
            anyhow::bail!(
                "stack {} did not reach {:?} (last status: {:?})",
                stack_name,
                expected,
                current
            );
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
}

#[tokio::test]
async fn stack_lifecycle_round_trip() -> Result<()> {
    let region =
        std::env::var("SMOKE_TEST_AWS_REGION").unwrap_or_else(|_| "us-west-2".to_string());

    // Unique stack name for test isolation
    let test_id = uuid::Uuid::new_v4()
        .to_string()
        .split('-')
        .next()
        .unwrap()
        .to_string();
    let stack_name = format!("stackform-smoke-{}", test_id);

    let factory = ClientFactory::from_environment();
    let client = factory.client(&region).await?;

    let files = vec![TemplateFile {
        path: PathBuf::from("smoke.template"),
        body: TEMPLATE.to_string(),
    }];
    let report = stackform_cfn::validate_templates(&client, &files).await;
    report.ensure_ok()?;
    let declared = report.successes().next().unwrap();
    assert_eq!(
        declared.result.as_ref().unwrap(),
        &vec!["Env".to_string()]
    );

    let parameters = BTreeMap::from([("Env".to_string(), "smoke".to_string())]);
    let stack_id =
        stackform_cfn::create(&client, &stack_name, TEMPLATE, &parameters, &[]).await?;
    assert!(stack_id.contains(&stack_name));
    wait_for_status(&client, &stack_name, StackStatus::CreateComplete).await?;

    stackform_cfn::status(&client, &stack_name).await?;

    let updated = BTreeMap::from([("Env".to_string(), "smoke-updated".to_string())]);
    let updated_id =
        stackform_cfn::update(&client, &stack_name, TEMPLATE, &updated, &[]).await?;
    assert_eq!(updated_id, stack_id);
    wait_for_status(&client, &stack_name, StackStatus::UpdateComplete).await?;

    stackform_cfn::describe(&client, &stack_name).await?;

    stackform_cfn::delete(&client, &stack_name).await?;

    Ok(())
}
