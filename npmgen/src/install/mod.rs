//! Dependency installation
//!
//! Installs are dispatched as Tokio tasks by the generator. Each task logs
//! its own outcome through the [`Reporter`], so dropping the returned
//! [`PendingInstalls`] detaches them without losing the log lines as long as
//! the runtime keeps running. Awaiting [`PendingInstalls::wait`] collects an
//! [`InstallSummary`] instead.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;

use crate::error::InstallError;
use crate::observability::Reporter;

mod npm;
pub use npm::NpmInstaller;

/// Options for a single install call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    /// Record the packages as dev dependencies
    pub save_dev: bool,

    /// Directory the package manager runs in
    pub cwd: PathBuf,
}

/// Capability that fetches named packages into a project
#[async_trait]
pub trait Installer: Send + Sync {
    /// Install `packages` according to `options`
    async fn install(&self, packages: &[String], options: &InstallOptions)
        -> Result<(), InstallError>;
}

/// Which package list an install covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstallKind {
    /// Dev dependencies
    Dev,
    /// Project dependencies
    Project,
}

impl InstallKind {
    /// Name used in log lines
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for InstallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Spawn an install task that reports its own outcome
///
/// Must be called from within a Tokio runtime.
pub(crate) fn dispatch(
    kind: InstallKind,
    packages: Vec<String>,
    options: InstallOptions,
    installer: Arc<dyn Installer>,
    reporter: Arc<dyn Reporter>,
) -> JoinHandle<bool> {
    reporter.info(&format!(
        "Installing {kind} packages... This may take a while"
    ));

    tokio::spawn(async move {
        if packages.is_empty() {
            reporter.info(&format!("No {kind} packages configured, skipping install"));
            return true;
        }

        tracing::debug!(%kind, cwd = %options.cwd.display(), ?packages, "starting install");

        match installer.install(&packages, &options).await {
            Ok(()) => {
                reporter.info(&format!(
                    "{kind} packages installed successfully => {}",
                    packages.join(",")
                ));
                true
            }
            Err(err) => {
                reporter.error(&format!(
                    "Error occurred while installing {kind} packages. {err}"
                ));
                false
            }
        }
    })
}

/// Handle to the install tasks started by a generation run
#[derive(Debug, Default)]
pub struct PendingInstalls {
    tasks: Vec<(InstallKind, JoinHandle<bool>)>,
}

impl PendingInstalls {
    pub(crate) fn push(&mut self, kind: InstallKind, handle: JoinHandle<bool>) {
        self.tasks.push((kind, handle));
    }

    /// Number of dispatched installs
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no installs were dispatched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for every install to finish
    ///
    /// Install errors were already reported by their tasks; this only
    /// collects which lists failed. A task that panicked counts as failed.
    pub async fn wait(self) -> InstallSummary {
        let mut summary = InstallSummary::default();

        for (kind, handle) in self.tasks {
            match handle.await {
                Ok(true) => summary.succeeded.push(kind),
                Ok(false) => summary.failed.push(kind),
                Err(err) => {
                    tracing::error!(%kind, "install task did not complete: {err}");
                    summary.failed.push(kind);
                }
            }
        }

        summary
    }
}

/// Outcome of the awaited installs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallSummary {
    /// Lists that installed successfully
    pub succeeded: Vec<InstallKind>,

    /// Lists whose install failed
    pub failed: Vec<InstallKind>,
}

impl InstallSummary {
    /// Whether every install succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}
