//! Shared fakes for unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use lambda_log_transport::{Connect, RemoteTransportConfig, Transport, TransportError};

pub type Sent = Arc<Mutex<Vec<(log::Level, String)>>>;

/// A cloneable in-memory writer.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that always fails.
pub struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::ErrorKind::BrokenPipe.into())
    }
}

pub struct RecordingTransport {
    sent: Sent,
    fail: bool,
}

impl Transport for RecordingTransport {
    fn send(&self, level: log::Level, message: &str) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError::Write(io::ErrorKind::ConnectionReset.into()));
        }
        self.sent.lock().unwrap().push((level, message.to_string()));
        Ok(())
    }
}

pub fn recording_transport() -> (RecordingTransport, Sent) {
    let sent = Sent::default();
    (
        RecordingTransport {
            sent: sent.clone(),
            fail: false,
        },
        sent,
    )
}

/// Hands out transports that record what they are sent, and remembers the
/// configuration each one was opened with.
#[derive(Clone, Default)]
pub struct RecordingConnector {
    pub sent: Sent,
    pub configs: Arc<Mutex<Vec<RemoteTransportConfig>>>,
    pub fail_sends: bool,
    pub refuse: bool,
}

impl Connect for RecordingConnector {
    fn connect(
        &self,
        config: &RemoteTransportConfig,
    ) -> Result<Box<dyn Transport>, TransportError> {
        self.configs.lock().unwrap().push(config.clone());
        if self.refuse {
            return Err(TransportError::Connect {
                host: config.host.clone(),
                port: config.port,
                source: io::ErrorKind::ConnectionRefused.into(),
            });
        }
        Ok(Box::new(RecordingTransport {
            sent: self.sent.clone(),
            fail: self.fail_sends,
        }))
    }
}
