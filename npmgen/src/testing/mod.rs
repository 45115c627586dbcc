//! Testing utilities for code built on npmgen
//!
//! - [`MemoryReporter`] records every reported message
//! - [`FakeInstaller`] records install calls and succeeds or fails on demand
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use npmgen::prelude::*;
//! use npmgen::testing::{FakeInstaller, MemoryReporter};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let reporter = Arc::new(MemoryReporter::new());
//! let generator = ProjectGenerator::new(
//!     GeneratorConfig::default(),
//!     Arc::new(FakeInstaller::new()),
//!     Arc::new(EmbeddedTemplates),
//!     reporter.clone(),
//! );
//!
//! let generation = generator.generate(GenerationRequest::new("")).await;
//! assert!(!generation.is_created());
//! assert_eq!(reporter.errors(), vec!["name is required"]);
//! # }
//! ```

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::InstallError;
use crate::install::{InstallOptions, Installer};
use crate::observability::Reporter;

/// Level of a recorded message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Reported through [`Reporter::info`]
    Info,
    /// Reported through [`Reporter::error`]
    Error,
}

/// Reporter that keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    /// Create an empty reporter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages in the order they were reported
    #[must_use]
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().clone()
    }

    /// Info-level messages
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.at(Level::Info)
    }

    /// Error-level messages
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.at(Level::Error)
    }

    fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn info(&self, message: &str) {
        self.messages.lock().push((Level::Info, message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages.lock().push((Level::Error, message.to_string()));
    }
}

/// A recorded install call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCall {
    /// Requested packages
    pub packages: Vec<String>,
    /// Options the call was made with
    pub options: InstallOptions,
}

/// Installer that records calls instead of running a package manager
#[derive(Debug, Default)]
pub struct FakeInstaller {
    failure: Option<String>,
    calls: Mutex<Vec<InstallCall>>,
}

impl FakeInstaller {
    /// Installer whose installs always succeed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installer whose installs always fail with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            calls: Mutex::default(),
        }
    }

    /// Calls received so far
    #[must_use]
    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Installer for FakeInstaller {
    async fn install(
        &self,
        packages: &[String],
        options: &InstallOptions,
    ) -> Result<(), InstallError> {
        self.calls.lock().push(InstallCall {
            packages: packages.to_vec(),
            options: options.clone(),
        });

        match &self.failure {
            Some(message) => Err(InstallError::Other(message.clone())),
            None => Ok(()),
        }
    }
}
