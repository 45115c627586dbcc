//! Project generation command

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use npmgen::prelude::*;

/// Exit status when validation or a filesystem step fails
pub const EXIT_GENERATION_FAILED: u8 = 1;

/// Exit status when the project was created but an install failed
///
/// 2 is left to clap for usage errors.
pub const EXIT_INSTALL_FAILED: u8 = 3;

/// Generate a new npm project
#[derive(Debug, Clone, Args)]
pub struct GenerateCommand {
    /// Project name, also the name of the created directory
    #[arg(long)]
    pub name: String,

    /// Directory to create the project in [default: current directory]
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Configuration file to use instead of the standard locations
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing package.json.tpl
    #[arg(long, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Exit without waiting for the dependency installs to finish
    #[arg(long)]
    pub no_wait: bool,
}

/// How a generate run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Project created; installs succeeded or were not awaited
    Created,
    /// Validation or a filesystem step failed
    GenerationFailed,
    /// Project created but at least one install failed
    InstallsFailed,
}

impl Outcome {
    /// Process exit status for this outcome
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Created => ExitCode::SUCCESS,
            Self::GenerationFailed => ExitCode::from(EXIT_GENERATION_FAILED),
            Self::InstallsFailed => ExitCode::from(EXIT_INSTALL_FAILED),
        }
    }
}

impl GenerateCommand {
    /// Execute the command
    pub async fn execute(&self) -> Result<Outcome> {
        let config = self.load_config()?;
        let show_output = config.installer.show_output;

        let templates: Arc<dyn TemplateSource> = match &config.template_dir {
            Some(dir) => Arc::new(DirTemplateSource::new(dir)),
            None => Arc::new(EmbeddedTemplates),
        };
        let installer = Arc::new(NpmInstaller::from_settings(&config.installer));
        let generator = ProjectGenerator::new(config, installer, templates, Arc::new(TracingReporter));

        let mut request = GenerationRequest::new(self.name.clone());
        if let Some(cwd) = &self.cwd {
            request = request.with_cwd(cwd);
        }

        let generated = match generator.generate(request).await {
            Generation::Created(generated) => generated,
            Generation::Failed(_) => return Ok(Outcome::GenerationFailed),
        };

        if self.no_wait {
            tracing::debug!("not waiting for {} installs", generated.installs.len());
            self.print_success(&generated.paths.base, None);
            return Ok(Outcome::Created);
        }

        let summary = if show_output {
            generated.installs.wait().await
        } else {
            wait_with_spinner(generated.installs).await?
        };

        self.print_success(&generated.paths.base, Some(&summary));

        if summary.is_success() {
            Ok(Outcome::Created)
        } else {
            Ok(Outcome::InstallsFailed)
        }
    }

    /// Load configuration and apply command-line overrides
    fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => GeneratorConfig::load().context("Failed to load configuration")?,
        };

        if let Some(dir) = &self.template_dir {
            config.template_dir = Some(dir.clone());
        }

        Ok(config)
    }

    /// Print the result and next steps
    fn print_success(&self, base: &Path, summary: Option<&InstallSummary>) {
        println!();
        println!(
            "{} {}",
            style("✓ Project created:").green().bold(),
            style(base.display()).cyan().bold()
        );

        match summary {
            Some(summary) if !summary.is_success() => {
                let failed: Vec<&str> = summary.failed.iter().map(|kind| kind.label()).collect();
                println!(
                    "{} {} packages failed to install, run {} inside the project to retry",
                    style("!").yellow().bold(),
                    failed.join(" and "),
                    style("npm install").cyan()
                );
            }
            Some(_) => {}
            None => println!(
                "{} dependency installs are still running in the background",
                style("!").yellow().bold()
            ),
        }

        println!();
        println!("{}", style("Next steps:").bold());
        println!();
        println!("  {} Navigate to project:", style("1.").cyan());
        println!(
            "     {} {}",
            style("$").dim(),
            style(format!("cd {}", self.name)).cyan()
        );
        println!();
        println!("  {} Start with hot reload:", style("2.").cyan());
        println!("     {} {}", style("$").dim(), style("npm start").cyan());
        println!();
    }
}

/// Wait for captured-output installs behind a spinner
async fn wait_with_spinner(installs: PendingInstalls) -> Result<InstallSummary> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("Failed to set progress style")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Installing packages...");

    let summary = installs.wait().await;

    spinner.finish_and_clear();
    Ok(summary)
}
