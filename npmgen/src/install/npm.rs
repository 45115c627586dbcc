//! Package installs through the npm command line

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{InstallOptions, Installer};
use crate::config::InstallerSettings;
use crate::error::InstallError;

/// Runs `<program> install [--save-dev] <packages...>`
///
/// Works with any npm-compatible CLI that accepts `install` and `--save-dev`.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: String,
    show_output: bool,
}

impl NpmInstaller {
    /// Create an installer for `program`
    pub fn new(program: impl Into<String>, show_output: bool) -> Self {
        Self {
            program: program.into(),
            show_output,
        }
    }

    /// Create an installer from configuration
    #[must_use]
    pub fn from_settings(settings: &InstallerSettings) -> Self {
        Self::new(settings.program.clone(), settings.show_output)
    }

    /// Arguments passed to the package manager
    #[must_use]
    pub fn args(packages: &[String], options: &InstallOptions) -> Vec<String> {
        let mut args = Vec::with_capacity(packages.len() + 2);
        args.push("install".to_string());
        if options.save_dev {
            args.push("--save-dev".to_string());
        }
        args.extend(packages.iter().cloned());
        args
    }

    fn command(&self, packages: &[String], options: &InstallOptions) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(Self::args(packages, options))
            .current_dir(&options.cwd)
            .stdin(Stdio::null());

        if self.show_output {
            command.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            command.stdout(Stdio::piped()).stderr(Stdio::piped());
        }

        command
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::from_settings(&InstallerSettings::default())
    }
}

#[async_trait]
impl Installer for NpmInstaller {
    async fn install(
        &self,
        packages: &[String],
        options: &InstallOptions,
    ) -> Result<(), InstallError> {
        tracing::debug!(
            program = %self.program,
            args = ?Self::args(packages, options),
            cwd = %options.cwd.display(),
            "running package manager"
        );

        let spawn_error = |source| InstallError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut command = self.command(packages, options);

        // `output()` forces piped stdio, so inherited output needs spawn + wait
        let (status, stderr) = if self.show_output {
            let status = command
                .spawn()
                .map_err(spawn_error)?
                .wait()
                .await
                .map_err(spawn_error)?;
            (status, String::new())
        } else {
            let output = command.output().await.map_err(spawn_error)?;
            (
                output.status,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        };

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::Failed {
                program: self.program.clone(),
                status,
                stderr,
            })
        }
    }
}
