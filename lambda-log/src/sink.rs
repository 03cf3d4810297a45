//! Destinations that log records are written to.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono_tz::Tz;
use lambda_log_transport::{RemoteTransportConfig, Transport, TransportError};
use serde_json::Value;

use crate::{InvocationContext, Meta, timestamp::timestamp};

/// One log call, as handed to each sink.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    /// Severity of the call
    pub level: log::Level,
    /// Free-text message
    pub message: &'a str,
    /// Caller-supplied structured fields
    pub meta: &'a Meta,
}

/// A single sink failed to accept a record.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The console writer failed.
    #[error("console write failed: {0}")]
    Console(#[from] io::Error),
    /// The remote transport failed.
    #[error("remote transport failed: {0}")]
    Remote(#[from] TransportError),
    /// The record could not be encoded.
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Something that accepts log records.
pub trait Sink: Send + Sync {
    /// Short name used when reporting failures.
    fn name(&self) -> &'static str;

    /// Write one record.
    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError>;

    /// Push out anything buffered.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes `<timestamp> <message>` lines.
///
/// This is the output picked up by the function runtime's own log capture.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
    time_zone: Tz,
}

impl ConsoleSink {
    /// A console sink on the process's standard output.
    pub fn stdout(time_zone: Tz) -> Self {
        Self::new(io::stdout(), time_zone)
    }

    /// A console sink on any writer.
    pub fn new(out: impl Write + Send + 'static, time_zone: Tz) -> Self {
        Self::from_boxed(Box::new(out), time_zone)
    }

    pub(crate) fn from_boxed(out: Box<dyn Write + Send>, time_zone: Tz) -> Self {
        Self {
            out: Mutex::new(out),
            time_zone,
        }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, Box<dyn Write + Send>>> {
        self.out
            .lock()
            .map_err(|_| io::Error::other("console writer is poisoned"))
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError> {
        let line = format!("{} {}\n", timestamp(self.time_zone), record.message);
        self.lock()?.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        self.lock()?.flush()?;
        Ok(())
    }
}

/// Forwards records to a remote collector as compact JSON.
pub struct RemoteSink {
    transport: Box<dyn Transport>,
    function_version: Option<String>,
    request_id: Option<String>,
    include_meta_in_message: bool,
    time_zone: Tz,
}

impl RemoteSink {
    /// Wraps a connected transport, capturing the invocation details that
    /// every record carries.
    pub fn new(
        transport: Box<dyn Transport>,
        context: &InvocationContext,
        config: &RemoteTransportConfig,
        time_zone: Tz,
    ) -> Self {
        Self {
            transport,
            function_version: context.function_version.clone(),
            request_id: context.aws_request_id.clone(),
            include_meta_in_message: config.include_meta_in_message,
            time_zone,
        }
    }

    /// Builds the encoded record for a log call, stamped with `time`.
    pub fn encode(&self, time: &str, record: &Record<'_>) -> Result<String, SinkError> {
        let message = if self.include_meta_in_message && !record.meta.is_empty() {
            format!("{} {}", record.message, serde_json::to_string(record.meta)?)
        } else {
            record.message.to_string()
        };

        let mut fields = Meta::new();
        fields.insert("_time".to_string(), Value::from(time));
        fields.insert("msg".to_string(), Value::from(message));
        for (key, value) in record.meta {
            fields.insert(key.clone(), value.clone());
        }
        fields.insert(
            "level".to_string(),
            Value::from(record.level.as_str().to_lowercase()),
        );
        set_or_remove(&mut fields, "version", self.function_version.as_deref());
        set_or_remove(&mut fields, "requestId", self.request_id.as_deref());

        Ok(serde_json::to_string(&fields)?)
    }
}

// An absent context value drops the key entirely, including any caller value.
fn set_or_remove(fields: &mut Meta, key: &str, value: Option<&str>) {
    match value {
        Some(value) => {
            fields.insert(key.to_string(), Value::from(value));
        }
        None => {
            fields.shift_remove(key);
        }
    }
}

impl Sink for RemoteSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn accept(&self, record: &Record<'_>) -> Result<(), SinkError> {
        let encoded = self.encode(&timestamp(self.time_zone), record)?;
        self.transport.send(record.level, &encoded)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        Ok(self.transport.flush()?)
    }
}
