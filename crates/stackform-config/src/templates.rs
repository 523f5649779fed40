// Template discovery and loading.
//
// Templates are files with the `.template` extension anywhere under the
// configured folder. Matches are sorted by path so the "first match is the
// default template" rule is deterministic.

use crate::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const TEMPLATE_EXTENSION: &str = "template";

/// A discovered template file with its full text. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: PathBuf,
    pub body: String,
}

impl TemplateFile {
    /// Display name used in logs and failure summaries.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Scan `dir` recursively for template files and load their contents
/// eagerly. An empty result is not an error here; requiring a default
/// template is the caller's concern.
pub fn discover_templates(dir: &Path) -> Result<Vec<TemplateFile>, ConfigError> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext == TEMPLATE_EXTENSION)
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let body = fs::read_to_string(&path).map_err(|source| ConfigError::TemplateRead {
                path: path.clone(),
                source,
            })?;
            Ok(TemplateFile { path, body })
        })
        .collect()
}

/// The default template is the first match in sorted order.
pub fn default_template(dir: &Path) -> Result<TemplateFile, ConfigError> {
    discover_templates(dir)?
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::TemplateNotFound {
            dir: dir.to_path_buf(),
        })
}
