//! Syslog over TCP, in the dialect Papertrail-style collectors accept.
//!
//! Each record becomes one or more frames of the form
//! `<PRI>TIMESTAMP HOSTNAME PROGRAM MESSAGE\r\n`. Multi-line messages are sent
//! as one frame per non-blank line, with continuation lines indented so the
//! collector can stitch them back together.

use std::fmt::Write as _;
use std::io::Write as _;
use std::net::{TcpStream, ToSocketAddrs};
use std::sync::Mutex;
use std::time::Duration;

use time::format_description::well_known::Rfc3339;

use crate::{Connect, RemoteTransportConfig, Transport, TransportError};

const CONTINUATION_INDENT: &str = "    ";

/// Syslog facility codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facility {
    /// user-level messages
    User = 1,
    /// system daemons
    Daemon = 3,
    /// local use 0
    Local0 = 16,
    /// local use 1
    Local1 = 17,
    /// local use 2
    Local2 = 18,
    /// local use 3
    Local3 = 19,
    /// local use 4
    Local4 = 20,
    /// local use 5
    Local5 = 21,
    /// local use 6
    Local6 = 22,
    /// local use 7
    Local7 = 23,
}

/// Syslog severity for a `log` level.
pub fn severity(level: log::Level) -> u8 {
    match level {
        log::Level::Error => 3,
        log::Level::Warn => 4,
        log::Level::Info => 6,
        log::Level::Debug => 7,
        // syslog has nothing finer than debug
        log::Level::Trace => 7,
    }
}

/// Computes the `<PRI>` value for a facility and level.
pub fn priority(facility: Facility, level: log::Level) -> u8 {
    facility as u8 * 8 + severity(level)
}

/// Appends the frames for one record to `buffer`.
pub fn write_frames(
    buffer: &mut String,
    priority: u8,
    timestamp: &str,
    hostname: &str,
    program: &str,
    message: &str,
) {
    for (index, line) in message.split('\n').enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let gap = if index > 0 { CONTINUATION_INDENT } else { "" };
        let _ = write!(
            buffer,
            "<{priority}>{timestamp} {hostname} {program} {gap}{line}\r\n"
        );
    }
}

/// Opens [`SyslogTcpTransport`] sessions.
///
/// Records go out over plain TCP, unencrypted. Collectors that require TLS
/// need a [`Connect`] implementation of their own.
#[derive(Clone, Debug)]
pub struct SyslogTcpConnector {
    facility: Facility,
    connect_timeout: Duration,
}

impl Default for SyslogTcpConnector {
    fn default() -> Self {
        Self {
            facility: Facility::Daemon,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl SyslogTcpConnector {
    /// A connector using the `daemon` facility and a 5 second connect timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports records under a different facility.
    pub fn with_facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    /// Bounds how long each resolved address may take to accept a connection.
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    fn open_stream(&self, host: &str, port: u16) -> Result<TcpStream, TransportError> {
        let addresses = (host, port)
            .to_socket_addrs()
            .map_err(|source| TransportError::Resolve {
                host: host.to_string(),
                port,
                source,
            })?;

        let mut last_error = None;
        for address in addresses {
            match TcpStream::connect_timeout(&address, self.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }
        Err(match last_error {
            Some(source) => TransportError::Connect {
                host: host.to_string(),
                port,
                source,
            },
            None => TransportError::Resolve {
                host: host.to_string(),
                port,
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no addresses for host",
                ),
            },
        })
    }
}

impl Connect for SyslogTcpConnector {
    fn connect(
        &self,
        config: &RemoteTransportConfig,
    ) -> Result<Box<dyn Transport>, TransportError> {
        let stream = self.open_stream(&config.host, config.port)?;
        // Nagle only delays small writes; the session works either way.
        let _ = stream.set_nodelay(true);
        Ok(Box::new(SyslogTcpTransport {
            stream: Mutex::new(stream),
            facility: self.facility,
            hostname: config.hostname.clone(),
            program: config.program.clone(),
        }))
    }
}

/// A syslog session over one TCP connection.
pub struct SyslogTcpTransport {
    stream: Mutex<TcpStream>,
    facility: Facility,
    hostname: String,
    program: String,
}

impl Transport for SyslogTcpTransport {
    fn send(&self, level: log::Level, message: &str) -> Result<(), TransportError> {
        let mut buffer = String::with_capacity(128 + message.len());
        let utc_now = time::OffsetDateTime::now_utc();
        let timestamp = utc_now.format(&Rfc3339).unwrap_or("<unknown>".to_string());
        write_frames(
            &mut buffer,
            priority(self.facility, level),
            &timestamp,
            &self.hostname,
            &self.program,
            message,
        );
        if buffer.is_empty() {
            return Ok(());
        }

        let mut stream = self.stream.lock().map_err(|_| TransportError::Poisoned)?;
        stream.write_all(buffer.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), TransportError> {
        let mut stream = self.stream.lock().map_err(|_| TransportError::Poisoned)?;
        stream.flush()?;
        Ok(())
    }
}
