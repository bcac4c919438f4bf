//! Guise Telemetry - logging setup for the guise permission engine.
//!
//! The engine only emits `tracing` events; this crate installs a subscriber
//! for hosts that do not bring their own:
//! - stdout, stderr or rolling files
//! - pretty, compact, JSON or full formatting
//! - an `EnvFilter` built from a level plus per-crate directives
//!
//! With the `config` feature, a [`LogConfig`] can be built from the
//! `[logging]` section of a `guise-config` file.
//!
//! # Example
//!
//! ```rust,no_run
//! use guise_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), guise_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Json)
//!     .with_directive("guise_perms=debug");
//!
//! setup_logging(&config)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging,
    setup_logging,
};
