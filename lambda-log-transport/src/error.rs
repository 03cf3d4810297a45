//! Errors raised while talking to a remote collector

use std::io;

/// Something went wrong between this process and the remote collector.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination host could not be resolved to an address.
    #[error("Could not resolve {host}:{port}: {source}")]
    Resolve {
        /// Configured host
        host: String,
        /// Configured port
        port: u16,
        /// The underlying resolver error
        source: io::Error,
    },

    /// No resolved address accepted a connection.
    #[error("Could not connect to {host}:{port}: {source}")]
    Connect {
        /// Configured host
        host: String,
        /// Configured port
        port: u16,
        /// The error from the last address tried
        source: io::Error,
    },

    /// Writing a record to an established connection failed.
    #[error("Failed to write to the remote collector: {0}")]
    Write(#[from] io::Error),

    /// A previous writer panicked while holding the connection.
    #[error("Remote collector connection is poisoned")]
    Poisoned,
}
