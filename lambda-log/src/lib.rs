#![deny(missing_docs)]

//! Console and remote collector logging for serverless functions
//!
//! Given the context of a function invocation and an optional remote log
//! destination, this crate builds a [`Logger`] which:
//! * always writes `<timestamp> <message>` lines to stdout, where the function
//!   runtime picks them up, and
//! * when running live with a destination configured, also forwards each call
//!   as a structured JSON record to a syslog-style remote collector.
//!
//! ```rust
//! use lambda_log::{InvocationContext, TimerEvent, create_logger};
//! use lambda_log_transport::DestinationConfig;
//!
//! # fn handler(context: InvocationContext, destination: Option<DestinationConfig>) -> Result<(), Box<dyn std::error::Error>> {
//! let logger = create_logger(&context, destination.as_ref())?;
//!
//! let timer = logger.start_timer("resize");
//! logger.info("resizing thumbnails")?;
//! logger.timer_event(&timer.finish("resized thumbnails"))?;
//! # Ok(())
//! # }
//! ```
//!
//! You are likely to be interested in the sibling crate:
//! * [`lambda-log-transport`](https://crates.io/crates/lambda-log-transport): The remote collector client.

use log::SetLoggerError;
use thiserror::Error;

mod context;
mod facade;
mod logger;
pub mod sink;
#[cfg(test)]
mod testing;
mod timer;
pub mod timestamp;

pub use context::{FALLBACK_HOSTNAME, FALLBACK_PROGRAM, InvocationContext, hostname_for_arn};
pub use facade::LambdaLog;
pub use lambda_log_transport::{DestinationConfig, TransportError};
pub use logger::{LogError, Logger, LoggerFactory, remote_transport_config};
pub use timer::{Timer, TimerEvent, round_msec};

/// Structured fields attached to a log call.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Why a logger could not be set up.
#[derive(Debug, Error)]
pub enum LogConfigError {
    /// The remote collector could not be reached.
    #[error("Failed to connect to the remote log destination: {0}")]
    Transport(#[from] TransportError),

    /// Another `log` backend is already installed.
    #[error("Failed to initialize the global logger: {cause}")]
    SetLogger {
        /// The facade's complaint
        cause: SetLoggerError,
    },
}

/// Builds a logger for one invocation with the default factory settings.
///
/// The remote sink is attached only when `context` carries a request id and
/// `destination` has a non-empty host. See [`LoggerFactory`] to change the
/// level, time zone, console writer or transport.
pub fn create_logger(
    context: &InvocationContext,
    destination: Option<&DestinationConfig>,
) -> Result<Logger, LogConfigError> {
    LoggerFactory::new().create(context, destination)
}

/// Installs `logger` behind the standard `log` macros.
///
/// You **must** only call this function once per process.
pub fn configure_logging(logger: Logger) -> Result<(), LogConfigError> {
    LambdaLog::init(logger).map_err(|e| LogConfigError::SetLogger { cause: e })
}
