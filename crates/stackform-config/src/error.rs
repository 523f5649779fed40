//! Error types for settings resolution and template discovery

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving project settings or locating templates
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The template folder holds no *.template file but one is required
    #[error("no *.template files found under '{}'", dir.display())]
    TemplateNotFound { dir: PathBuf },

    /// A discovered template could not be read
    #[error("failed to read template '{}'", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A client was requested without a region in scope
    #[error("region is not configured; set stack.region in stackform.toml or export AWS_DEFAULT_REGION")]
    MissingRegion,
}
