//! Project template loading and rendering

use std::fs;
use std::path::PathBuf;

use crate::error::GenerateError;

pub mod files;
pub use files::*;

/// Source of named template files
pub trait TemplateSource: Send + Sync {
    /// Load the raw contents of the template called `name`
    fn load(&self, name: &str) -> Result<String, GenerateError>;
}

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn load(&self, name: &str) -> Result<String, GenerateError> {
        match name {
            PACKAGE_JSON_TEMPLATE => Ok(PACKAGE_JSON_TPL.to_string()),
            _ => Err(GenerateError::Template {
                name: name.to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no built-in template with this name",
                ),
            }),
        }
    }
}

/// Templates read from a directory on disk
#[derive(Debug, Clone)]
pub struct DirTemplateSource {
    dir: PathBuf,
}

impl DirTemplateSource {
    /// Read templates from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory templates are read from
    #[must_use]
    pub const fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl TemplateSource for DirTemplateSource {
    fn load(&self, name: &str) -> Result<String, GenerateError> {
        let path = self.dir.join(name);
        tracing::debug!(path = %path.display(), "loading template");
        fs::read_to_string(&path).map_err(|source| GenerateError::Template {
            name: name.to_string(),
            source,
        })
    }
}

/// Substitute the manifest placeholders
///
/// Every occurrence of each token is replaced.
#[must_use]
pub fn render_manifest(template: &str, package_name: &str, start_script: &str) -> String {
    template
        .replace(PACKAGE_NAME_TOKEN, package_name)
        .replace(START_SCRIPT_TOKEN, start_script)
}
