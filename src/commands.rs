// One async function per CLI command. Each resolves what it needs locally
// (templates, region) before any client is constructed, so configuration
// errors never reach the network.

use anyhow::Result;
use stackform_cfn::ClientFactory;
use stackform_config::StackSettings;
use tracing::warn;

/// Validate every discovered template. All files are attempted; the command
/// fails after the batch completes if any template was rejected.
pub async fn validate(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let templates = settings.templates()?;
    if templates.is_empty() {
        warn!(
            dir = %settings.template_dir.display(),
            "no templates found; nothing to validate"
        );
        return Ok(());
    }

    let client = factory.client(settings.region()?).await?;
    let report = stackform_cfn::validate_templates(&client, &templates).await;

    println!(
        "{} of {} template(s) valid",
        report.successes().count(),
        report.outcomes().len()
    );
    report.ensure_ok()?;
    Ok(())
}

pub async fn describe(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let client = factory.client(settings.region()?).await?;
    stackform_cfn::describe(&client, &settings.stack_name).await
}

pub async fn status(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let client = factory.client(settings.region()?).await?;
    stackform_cfn::status(&client, &settings.stack_name).await
}

/// Create the stack from the default template and print the new stack id.
pub async fn create(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let template = settings.default_template()?;
    let client = factory.client(settings.region()?).await?;

    let stack_id = stackform_cfn::create(
        &client,
        &settings.stack_name,
        &template.body,
        &settings.parameters,
        &settings.capabilities,
    )
    .await?;

    println!("{stack_id}");
    Ok(())
}

/// Update the stack from the default template and print the stack id.
pub async fn update(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let template = settings.default_template()?;
    let client = factory.client(settings.region()?).await?;

    let stack_id = stackform_cfn::update(
        &client,
        &settings.stack_name,
        &template.body,
        &settings.parameters,
        &settings.capabilities,
    )
    .await?;

    println!("{stack_id}");
    Ok(())
}

pub async fn delete(settings: &StackSettings, factory: &ClientFactory) -> Result<()> {
    let client = factory.client(settings.region()?).await?;
    stackform_cfn::delete(&client, &settings.stack_name).await
}
