use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stackform_config::Environment;
use std::path::PathBuf;

/// CloudFormation stack lifecycle driver
#[derive(Parser)]
#[command(name = "stackform")]
#[command(version)]
#[command(about = "Drive AWS CloudFormation stacks from project configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Deployment environment: staging or production
    #[arg(short, long, value_name = "ENV", global = true)]
    env: Option<Environment>,

    /// AWS region (overrides config file)
    #[arg(short, long, value_name = "REGION", global = true)]
    region: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every template in the template folder
    Validate,
    /// Log the full description of the deployed stack
    Describe,
    /// Log the status of the deployed stack
    Status,
    /// Create the stack from the default template
    Create,
    /// Update the stack from the default template
    Update,
    /// Delete the deployed stack
    Delete,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    stackform::init_tracing(cli.log_level.as_deref());

    let settings = stackform::load_settings(
        cli.config.as_deref(),
        cli.env.unwrap_or(Environment::Default),
        cli.region,
    )?;
    let factory = stackform_cfn::ClientFactory::from_environment();

    match cli.command {
        Commands::Validate => stackform::validate(&settings, &factory).await,
        Commands::Describe => stackform::describe(&settings, &factory).await,
        Commands::Status => stackform::status(&settings, &factory).await,
        Commands::Create => stackform::create(&settings, &factory).await,
        Commands::Update => stackform::update(&settings, &factory).await,
        Commands::Delete => stackform::delete(&settings, &factory).await,
    }
}
