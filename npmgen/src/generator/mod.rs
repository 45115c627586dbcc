//! Project generation
//!
//! [`ProjectGenerator::generate`] validates a request and then runs a fixed
//! sequence of steps against the filesystem:
//!
//! 1. create the base directory
//! 2. create `src/`
//! 3. create an empty `index.js`
//! 4. render `package.json` from its template
//! 5. dispatch the dev dependency install
//! 6. write `.babelrc`
//! 7. write `.eslintrc.js`
//! 8. dispatch the project dependency install
//!
//! A failing step stops the run. Nothing already created is removed, so a
//! failed run can leave an incomplete project directory behind.

use std::path::Path;
use std::sync::Arc;

use tokio::fs;

use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::install::{self, InstallKind, InstallOptions, Installer, PendingInstalls};
use crate::observability::Reporter;
use crate::templates::{self, TemplateSource, BABELRC, ESLINTRC, PACKAGE_JSON_TEMPLATE};

mod paths;
mod request;

pub use paths::*;
pub use request::GenerationRequest;

/// Result of a generation run
#[derive(Debug)]
pub enum Generation {
    /// Every filesystem step completed; installs may still be running
    Created(Generated),

    /// The run stopped early. The error has already been reported.
    Failed(GenerateError),
}

impl Generation {
    /// Whether every filesystem step completed
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// The error that stopped the run, if any
    #[must_use]
    pub const fn error(&self) -> Option<&GenerateError> {
        match self {
            Self::Created(_) => None,
            Self::Failed(err) => Some(err),
        }
    }
}

/// A successfully scaffolded project
#[derive(Debug)]
pub struct Generated {
    /// Everything that was created
    pub paths: ProjectPaths,

    /// The dev and project installs, in dispatch order
    pub installs: PendingInstalls,
}

/// Scaffolds npm projects
pub struct ProjectGenerator {
    config: GeneratorConfig,
    installer: Arc<dyn Installer>,
    templates: Arc<dyn TemplateSource>,
    reporter: Arc<dyn Reporter>,
}

impl ProjectGenerator {
    /// Create a generator from its collaborators
    pub fn new(
        config: GeneratorConfig,
        installer: Arc<dyn Installer>,
        templates: Arc<dyn TemplateSource>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            config,
            installer,
            templates,
            reporter,
        }
    }

    /// Configuration this generator runs with
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Scaffold the project described by `request`
    ///
    /// Never returns an error: validation and filesystem failures are
    /// reported at error level and returned as [`Generation::Failed`].
    /// Install failures are reported by their own tasks and only show up in
    /// the [`InstallSummary`](crate::install::InstallSummary) of
    /// [`PendingInstalls::wait`].
    ///
    /// Must run inside a Tokio runtime, which the installs are spawned on.
    pub async fn generate(&self, request: GenerationRequest) -> Generation {
        match self.run(&request).await {
            Ok(generated) => Generation::Created(generated),
            Err(err) => {
                self.reporter.error(&err.to_string());
                Generation::Failed(err)
            }
        }
    }

    async fn run(&self, request: &GenerationRequest) -> Result<Generated, GenerateError> {
        let cwd = request.resolve_cwd()?;
        tracing::debug!(cwd = %cwd.display(), name = %request.name, "resolved request");

        request.validate_name()?;
        let paths = ProjectPaths::new(&cwd, &request.name);
        if std::fs::symlink_metadata(&paths.base).is_ok() {
            return Err(GenerateError::validation(
                "Directory already exists. Please specify different project name.",
            ));
        }

        fs::create_dir(&paths.base)
            .await
            .map_err(|source| GenerateError::filesystem("create directory", &paths.base, source))?;
        self.reporter.info(&format!(
            "Base directory created: {}",
            paths.base.display()
        ));

        fs::create_dir(&paths.src)
            .await
            .map_err(|source| GenerateError::filesystem("create directory", &paths.src, source))?;
        self.reporter.info("src directory created.");

        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&paths.entry_file)
            .await
            .map_err(|source| GenerateError::filesystem("create file", &paths.entry_file, source))?;
        self.reporter
            .info(&format!("Empty {ENTRY_FILE} file created in base directory."));

        self.create_manifest(&request.name, &paths.manifest_file)
            .await?;

        let mut installs = PendingInstalls::default();
        installs.push(
            InstallKind::Dev,
            self.dispatch_install(InstallKind::Dev, &paths.base),
        );

        write_file(&paths.transpiler_config_file, BABELRC).await?;
        self.reporter.info(&format!(
            "{TRANSPILER_CONFIG_FILE} file created in base directory."
        ));

        write_file(&paths.lint_config_file, ESLINTRC).await?;
        self.reporter
            .info(&format!("{LINT_CONFIG_FILE} file created in base directory."));

        installs.push(
            InstallKind::Project,
            self.dispatch_install(InstallKind::Project, &paths.base),
        );

        Ok(Generated { paths, installs })
    }

    async fn create_manifest(&self, name: &str, path: &Path) -> Result<(), GenerateError> {
        let template = self.templates.load(PACKAGE_JSON_TEMPLATE)?;
        let contents = templates::render_manifest(&template, name, &self.config.start_script);
        if let Err(err) = serde_json::from_str::<serde_json::Value>(&contents) {
            tracing::warn!("rendered {MANIFEST_FILE} is not valid JSON: {err}");
        }

        write_file(path, &contents).await?;
        self.reporter.info(&format!(
            "Template {MANIFEST_FILE} file created in base directory. Update it!"
        ));
        Ok(())
    }

    fn dispatch_install(&self, kind: InstallKind, base: &Path) -> tokio::task::JoinHandle<bool> {
        let packages = match kind {
            InstallKind::Dev => self.config.packages.dev.clone(),
            InstallKind::Project => self.config.packages.project.clone(),
        };
        let options = InstallOptions {
            save_dev: kind == InstallKind::Dev,
            cwd: base.to_path_buf(),
        };

        install::dispatch(
            kind,
            packages,
            options,
            Arc::clone(&self.installer),
            Arc::clone(&self.reporter),
        )
    }
}

/// Write `contents` to a file that must not exist yet
async fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    use tokio::io::AsyncWriteExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|source| GenerateError::filesystem("create file", path, source))?;

    file.write_all(contents.as_bytes())
        .await
        .map_err(|source| GenerateError::filesystem("write file", path, source))?;
    file.flush()
        .await
        .map_err(|source| GenerateError::filesystem("write file", path, source))?;

    Ok(())
}
