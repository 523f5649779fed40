// Configuration source loading.
//
// Priority order:
// 1. Environment variables (STACKFORM_* prefix)
// 2. Config file path from STACKFORM_CONFIG
// 3. Default config files (./stackform.toml, ./.stackform.toml)
// 4. Built-in defaults; AWS_DEFAULT_REGION fills the region when no scope
//    configured one

use crate::ProjectConfig;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::debug;

pub const ENV_PREFIX: &str = "STACKFORM_";

/// Abstraction over environment-variable lookups so overrides can be tested
/// without touching the process environment.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the STACKFORM_ prefix.
    /// Used for AWS standard variables (AWS_DEFAULT_REGION).
    fn get_raw(&self, key: &str) -> Option<String>;
}

pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// Load configuration from default file locations, then apply environment
/// overrides.
pub fn load_config() -> Result<ProjectConfig> {
    let mut config = load_from_file()?.unwrap_or_default();
    apply_env_overrides(&mut config, &StdEnvSource);
    Ok(config)
}

/// Load configuration from a specific file path (for the CLI --config flag).
/// Returns an error if the file does not exist or cannot be parsed.
pub fn load_from_file_path(path: impl AsRef<Path>) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    debug!(path = %path.display(), "loaded config file");

    apply_env_overrides(&mut config, &StdEnvSource);
    Ok(config)
}

fn load_from_file() -> Result<Option<ProjectConfig>> {
    if let Ok(path) = env::var("STACKFORM_CONFIG") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        debug!(path = %path, "loaded config file from STACKFORM_CONFIG");
        return Ok(Some(config));
    }

    for path in &["./stackform.toml", "./.stackform.toml"] {
        if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            let config: ProjectConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?;
            debug!(path = %path, "loaded config file");
            return Ok(Some(config));
        }
    }

    Ok(None)
}

/// Apply environment-variable overrides to the base scope. Environment
/// scopes that explicitly set a field still win for that environment; CLI
/// flags are the absolute override and are applied by the binary after
/// resolution.
pub fn apply_env_overrides<E: EnvSource>(config: &mut ProjectConfig, env: &E) {
    if let Some(project) = env.get("PROJECT") {
        config.project = Some(project);
    }
    if let Some(region) = env.get("REGION") {
        config.stack.region = Some(region);
    }
    if let Some(dir) = env.get("TEMPLATE_DIR") {
        config.stack.template_dir = Some(dir.into());
    }
    if let Some(name) = env.get("STACK_NAME") {
        config.stack.name = Some(name);
    }

    // AWS_DEFAULT_REGION is the lowest-priority region source
    if config.stack.region.is_none() {
        if let Some(region) = env.get_raw("AWS_DEFAULT_REGION") {
            if !region.is_empty() {
                config.stack.region = Some(region);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv {
        vars: HashMap<&'static str, &'static str>,
    }

    impl EnvSource for FakeEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.vars
                .get(format!("{}{}", ENV_PREFIX, key).as_str())
                .map(|v| v.to_string())
        }

        fn get_raw(&self, key: &str) -> Option<String> {
            self.vars.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn env_overrides_replace_base_scope_fields() {
        let mut config = ProjectConfig::default();
        config.stack.region = Some("us-east-1".to_string());

        let env = FakeEnv {
            vars: HashMap::from([
                ("STACKFORM_REGION", "eu-central-1"),
                ("STACKFORM_TEMPLATE_DIR", "infra"),
            ]),
        };
        apply_env_overrides(&mut config, &env);

        assert_eq!(config.stack.region.as_deref(), Some("eu-central-1"));
        assert_eq!(
            config.stack.template_dir.as_deref(),
            Some(std::path::Path::new("infra"))
        );
    }

    #[test]
    fn aws_default_region_fills_unset_region_only() {
        let mut config = ProjectConfig::default();
        let env = FakeEnv {
            vars: HashMap::from([("AWS_DEFAULT_REGION", "ap-southeast-2")]),
        };
        apply_env_overrides(&mut config, &env);
        assert_eq!(config.stack.region.as_deref(), Some("ap-southeast-2"));

        let mut configured = ProjectConfig::default();
        configured.stack.region = Some("us-west-2".to_string());
        apply_env_overrides(&mut configured, &env);
        assert_eq!(configured.stack.region.as_deref(), Some("us-west-2"));
    }
}
