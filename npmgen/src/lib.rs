//! npmgen: scaffold new npm projects
//!
//! Creates a project directory with an empty entry point, a `package.json`
//! rendered from a template, babel and eslint configuration, and installs the
//! configured dev and project dependencies through a package manager.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use npmgen::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     npmgen::observability::init(npmgen::observability::Verbosity::Normal)?;
//!
//!     let config = GeneratorConfig::load()?;
//!     let generator = ProjectGenerator::new(
//!         config.clone(),
//!         Arc::new(NpmInstaller::from_settings(&config.installer)),
//!         Arc::new(EmbeddedTemplates),
//!         Arc::new(TracingReporter),
//!     );
//!
//!     if let Generation::Created(generated) = generator
//!         .generate(GenerationRequest::new("my-app"))
//!         .await
//!     {
//!         let summary = generated.installs.wait().await;
//!         println!("installs ok: {}", summary.is_success());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod generator;
pub mod install;
pub mod observability;
pub mod templates;
pub mod testing;

/// Commonly used types
pub mod prelude {
    pub use crate::config::{GeneratorConfig, InstallerSettings, PackageList};
    pub use crate::error::{GenerateError, InstallError};
    pub use crate::generator::{
        Generated, Generation, GenerationRequest, ProjectGenerator, ProjectPaths,
    };
    pub use crate::install::{
        InstallKind, InstallOptions, InstallSummary, Installer, NpmInstaller, PendingInstalls,
    };
    pub use crate::observability::{Reporter, TracingReporter};
    pub use crate::templates::{DirTemplateSource, EmbeddedTemplates, TemplateSource};
}
