//! Generation requests and their validation

use std::path::{Component, Path, PathBuf};

use crate::error::GenerateError;

/// What to generate and where
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Project and directory name
    pub name: String,

    /// Directory to create the project in; the process's current directory
    /// when `None` or empty
    pub cwd: Option<PathBuf>,
}

impl GenerationRequest {
    /// Request a project called `name` in the current directory
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cwd: None,
        }
    }

    /// Create the project under `cwd` instead
    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Fill in the default `cwd` and make it absolute
    ///
    /// A relative `cwd` is resolved against the process's current directory.
    pub fn resolve_cwd(&self) -> Result<PathBuf, GenerateError> {
        match self.cwd.as_deref() {
            Some(cwd) if cwd.is_absolute() => Ok(cwd.to_path_buf()),
            Some(cwd) if !cwd.as_os_str().is_empty() => Ok(current_dir()?.join(cwd)),
            _ => current_dir(),
        }
    }

    /// Check the name before anything touches the filesystem
    pub fn validate_name(&self) -> Result<(), GenerateError> {
        if self.name.is_empty() {
            return Err(GenerateError::validation("name is required"));
        }

        let mut components = Path::new(&self.name).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal || self.name.contains(['/', '\\']) {
            return Err(GenerateError::validation(format!(
                "name must be a single directory name, got '{}'",
                self.name
            )));
        }

        Ok(())
    }
}

fn current_dir() -> Result<PathBuf, GenerateError> {
    std::env::current_dir()
        .map_err(|source| GenerateError::filesystem("read current directory", ".", source))
}
