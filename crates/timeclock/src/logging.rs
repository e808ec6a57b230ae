//! Diagnostic logging.
//!
//! Time-ins, time-outs, report writes and file operations are traced with
//! `tracing`. The subscriber writes to stderr; stdout belongs to the kiosk
//! screens and to `log show` output that may be piped elsewhere.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output to show, chosen with `-q`, `-v` and `-vv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only, such as a daily log that could not be written.
    Quiet,
    /// Shift and report events.
    #[default]
    Normal,
    /// Adds file operations and rejected logins.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// The most detailed level shown.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.to_level_filter())
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` replaces the directive derived from `verbosity`. Calling this a
/// second time leaves the first subscriber in place.
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    let _ = subscriber.try_init();
}
