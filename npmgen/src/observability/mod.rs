//! Observability (logging)
//!
//! Generator progress is reported through the [`Reporter`] trait so callers
//! decide where leveled messages go. [`TracingReporter`] forwards them to
//! `tracing`, and [`init`] installs the subscriber the CLI uses.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sink for the generator's leveled progress messages
pub trait Reporter: Send + Sync {
    /// Report a completed step
    fn info(&self, message: &str);

    /// Report a failure
    fn error(&self, message: &str);
}

/// Forwards reporter messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, message: &str) {
        tracing::info!(target: "npmgen", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "npmgen", "{message}");
    }
}

/// How much the CLI logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Step-by-step progress
    #[default]
    Normal,
    /// Progress plus resolved paths and commands
    Verbose,
    /// Everything
    Trace,
}

impl Verbosity {
    /// Map `-q` / `-v` counts to a verbosity
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    /// Default filter directive for this verbosity
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Verbose => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Initialize the logging stack
///
/// `RUST_LOG` takes precedence over `verbosity` when it is set.
///
/// # Example
///
/// ```rust,no_run
/// use npmgen::observability::{self, Verbosity};
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init(Verbosity::Normal)?;
/// tracing::info!("scaffolding started");
/// # Ok(())
/// # }
/// ```
pub fn init(verbosity: Verbosity) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init()?;

    Ok(())
}
