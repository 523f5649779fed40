// stackform - drive CloudFormation stack lifecycles from project
// configuration.
//
// The binary resolves settings for the requested environment once, builds
// one client for that environment, and dispatches a single stack operation.
// Settings live in stackform-config, remote operations in stackform-cfn.

use anyhow::Result;
use stackform_config::{Environment, ProjectConfig, StackSettings};
use std::path::Path;
use tracing::info;

mod commands;
mod init;

pub use commands::{create, delete, describe, status, update, validate};
pub use init::init_tracing;

/// Load project configuration and resolve settings for one environment.
/// CLI flag overrides are applied last, on top of the resolved scope.
pub fn load_settings(
    config_path: Option<&Path>,
    environment: Environment,
    region_override: Option<String>,
) -> Result<StackSettings> {
    let config = match config_path {
        Some(path) => ProjectConfig::load_from_path(path)?,
        None => ProjectConfig::load()?,
    };

    let mut settings = config.resolve(environment);
    if let Some(region) = region_override {
        settings.region = Some(region);
    }

    info!(
        environment = %settings.environment,
        stack = %settings.stack_name,
        region = settings.region.as_deref().unwrap_or("unset"),
        "resolved stack settings"
    );

    Ok(settings)
}
