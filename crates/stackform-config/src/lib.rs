// stackform-config - Project settings for CloudFormation deployments
//
// Supports configuration from multiple sources:
// 1. Environment variables (STACKFORM_* prefix)
// 2. Config file path from STACKFORM_CONFIG env var
// 3. Default config file locations (./stackform.toml, ./.stackform.toml)
// 4. Built-in defaults (lowest priority); AWS_DEFAULT_REGION supplies the
//    region when no scope configures one

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod error;
mod sources;
mod templates;

pub use error::ConfigError;
pub use sources::{EnvSource, StdEnvSource, ENV_PREFIX};
pub use templates::{default_template, discover_templates, TemplateFile, TEMPLATE_EXTENSION};

/// Template folder used when no scope configures one.
pub const DEFAULT_TEMPLATE_DIR: &str = "src/main/aws";

/// Named deployment scope. `Default` is the unscoped project configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Default,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Default => write!(f, "default"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(Environment::Default),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Unknown environment: {}. Supported: staging, production",
                s
            ),
        }
    }
}

/// Project configuration as written in stackform.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name; defaults to the working directory name when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Base scope settings, inherited by every environment
    #[serde(default)]
    pub stack: ScopeConfig,

    #[serde(default)]
    pub environments: EnvironmentOverrides,
}

/// Per-environment override tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staging: Option<ScopeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production: Option<ScopeConfig>,
}

/// Settings carried by one configuration scope. Every field is optional;
/// unset fields inherit from the base scope or fall back to built-in
/// defaults during resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Explicit stack name; replaces the derived `<environment>-<project>` name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, String>>,
}

impl ScopeConfig {
    /// Field-level merge: a field set in `overrides` wins, unset fields inherit.
    pub fn merged_with(&self, overrides: Option<&ScopeConfig>) -> ScopeConfig {
        let Some(overrides) = overrides else {
            return self.clone();
        };
        ScopeConfig {
            template_dir: overrides
                .template_dir
                .clone()
                .or_else(|| self.template_dir.clone()),
            region: overrides.region.clone().or_else(|| self.region.clone()),
            name: overrides.name.clone().or_else(|| self.name.clone()),
            capabilities: overrides
                .capabilities
                .clone()
                .or_else(|| self.capabilities.clone()),
            parameters: overrides
                .parameters
                .clone()
                .or_else(|| self.parameters.clone()),
        }
    }
}

/// Fully-resolved settings for one environment. Resolved once per
/// invocation and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct StackSettings {
    pub project: String,
    pub environment: Environment,
    pub template_dir: PathBuf,
    pub region: Option<String>,
    pub stack_name: String,
    pub capabilities: Vec<String>,
    pub parameters: BTreeMap<String, String>,
}

impl StackSettings {
    /// Region to bind clients to. A client must never be constructed
    /// without one.
    pub fn region(&self) -> Result<&str, ConfigError> {
        match self.region.as_deref() {
            Some(region) if !region.is_empty() => Ok(region),
            _ => Err(ConfigError::MissingRegion),
        }
    }

    /// All template files under the resolved template folder.
    pub fn templates(&self) -> Result<Vec<TemplateFile>, ConfigError> {
        templates::discover_templates(&self.template_dir)
    }

    /// The default template (first match in sorted order).
    pub fn default_template(&self) -> Result<TemplateFile, ConfigError> {
        templates::default_template(&self.template_dir)
    }
}

impl ProjectConfig {
    /// Load configuration from all sources with priority
    pub fn load() -> Result<Self> {
        sources::load_config()
    }

    /// Load configuration from a specific file path (for CLI --config flag).
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        sources::load_from_file_path(path)
    }

    /// Normalized project name: explicit `project` key, else the working
    /// directory name.
    pub fn project_name(&self) -> String {
        let raw = self
            .project
            .clone()
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .unwrap_or_else(|| "stack".to_string());
        normalize_name(&raw)
    }

    /// Compute effective settings for `environment` by layering built-in
    /// defaults, the base scope, and the environment scope.
    ///
    /// The stack name is the environment scope's explicit `name` when set;
    /// otherwise named environments get `<environment>-<project>` and the
    /// default scope gets the project name alone. A base-scope `name` only
    /// applies to the default scope.
    pub fn resolve(&self, environment: Environment) -> StackSettings {
        let env_scope = match environment {
            Environment::Default => None,
            Environment::Staging => self.environments.staging.as_ref(),
            Environment::Production => self.environments.production.as_ref(),
        };
        let scope = self.stack.merged_with(env_scope);
        let project = self.project_name();

        let explicit_name = match environment {
            Environment::Default => scope.name.clone(),
            _ => env_scope.and_then(|s| s.name.clone()),
        };
        let stack_name = explicit_name.unwrap_or_else(|| match environment {
            Environment::Default => project.clone(),
            env => format!("{}-{}", env, project),
        });

        StackSettings {
            project,
            environment,
            template_dir: scope
                .template_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR)),
            region: scope.region,
            stack_name,
            capabilities: scope.capabilities.unwrap_or_default(),
            parameters: scope.parameters.unwrap_or_default(),
        }
    }
}

/// Lower-case, collapse runs of non-alphanumeric characters to a single
/// dash, trim leading/trailing dashes.
pub fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_dash = false;
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}
