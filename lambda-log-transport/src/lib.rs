#![deny(missing_docs)]

//! Remote log collector client for lambda-log
//!
//! This crate holds the network side of [`lambda-log`](https://crates.io/crates/lambda-log):
//! where remote records go, and how they get there.
//!
//! The default transport speaks the line-oriented syslog dialect accepted by
//! Papertrail-style log collectors, over a plain TCP connection. You can plug in
//! your own by implementing [`Connect`] and [`Transport`].
//!
//! You are likely to be interested in the sibling crate:
//! * [`lambda-log`](https://crates.io/crates/lambda-log): Logger construction and the standard `log` adapter.

pub mod destination;
mod error;
pub mod syslog;
mod transport;

pub use destination::{DestinationConfig, RemoteTransportConfig};
pub use error::TransportError;
pub use syslog::{Facility, SyslogTcpConnector, SyslogTcpTransport};
pub use transport::{Connect, Transport};
