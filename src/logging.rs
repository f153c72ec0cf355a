//! Logging setup for the command line tool.
//!
//! Diagnostics go to stderr through `tracing`; stdout stays free for the
//! status lines and generated code.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Requested log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Derive the verbosity from the `-q`/`-v` flags; quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Verbose,
            _ => Verbosity::Normal,
        }
    }

    /// Filter directive used when `RUST_LOG` is not set.
    pub fn default_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "sheetsmith=warn",
            Verbosity::Normal => "sheetsmith=info",
            Verbosity::Verbose => "sheetsmith=debug",
        }
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the flags.
///
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    if result.is_err() {
        tracing::debug!("logging already initialised");
    }
}
