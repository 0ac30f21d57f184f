//! # RT Telemetry
//!
//! Structured logging setup for the restricted-transfer ledger.
//!
//! Every crate logs through `tracing` macros; this crate only decides where
//! the records go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rt_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_tracing(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RT_SERVICE_NAME` | `restricted-ledger` | Service name in the startup record |
//! | `RT_LOG_LEVEL` | `info` | Log filter (falls back to `RUST_LOG`) |
//! | `RT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `RT_JSON_LOGS` | `false` | JSON lines instead of pretty output |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_test_tracing, init_tracing, TracingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The log filter could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience macro for creating a span with subsystem context.
///
/// ```rust,ignore
/// let _span = subsystem_span!("mint", subsystem = "ledger", amount = 1000).entered();
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
