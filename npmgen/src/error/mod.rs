//! Error types and error handling

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors that stop a generation run
///
/// Only the `Display` message of these errors reaches the log; none of them
/// trigger a rollback of what was already created.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The request was rejected before anything was created
    #[error("{0}")]
    Validation(String),

    /// A directory or file could not be created or written
    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        /// What was being attempted, e.g. "create directory"
        action: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// A template could not be loaded
    #[error("Failed to load template {name}: {source}")]
    Template {
        /// Template name, e.g. `package.json.tpl`
        name: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },
}

impl GenerateError {
    /// Build a validation error from a message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Build a filesystem error for `path`
    pub fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    /// Whether the error came from request validation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Errors raised by a package installer
#[derive(Debug, Error)]
pub enum InstallError {
    /// The package manager process could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// The package manager ran but reported failure
    #[error("{program} exited with {status}{}", format_stderr(stderr))]
    Failed {
        /// Program that was executed
        program: String,
        /// Exit status of the process
        status: ExitStatus,
        /// Captured standard error, empty when output was inherited
        stderr: String,
    },

    /// Any other installer failure
    #[error("{0}")]
    Other(String),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = GenerateError::validation("name is required");
        assert_eq!(err.to_string(), "name is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_filesystem_message_names_path() {
        let err = GenerateError::filesystem(
            "create directory",
            "/tmp/foo",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let message = err.to_string();
        assert!(message.contains("create directory"));
        assert!(message.contains("/tmp/foo"));
        assert!(message.contains("permission denied"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_format_stderr() {
        assert_eq!(format_stderr("  \n"), "");
        assert_eq!(format_stderr("npm ERR! 404\n"), ": npm ERR! 404");
    }

    #[test]
    fn test_other_install_error() {
        let err = InstallError::Other("registry unreachable".to_string());
        assert_eq!(err.to_string(), "registry unreachable");
    }
}
