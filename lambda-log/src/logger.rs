use std::io::Write;

use chrono_tz::Tz;
use lambda_log_transport::{
    Connect, DestinationConfig, RemoteTransportConfig, SyslogTcpConnector,
};
use log::{Level, LevelFilter};

use crate::sink::{ConsoleSink, Record, RemoteSink, Sink, SinkError};
use crate::timer::{Timer, TimerEvent};
use crate::{InvocationContext, LogConfigError, Meta, timestamp::DEFAULT_TIME_ZONE};

/// A sink failed to accept a record. Other sinks were still written to.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write to the {sink} sink: {source}")]
pub struct LogError {
    /// Name of the first sink that failed
    pub sink: &'static str,
    /// What went wrong
    pub source: SinkError,
}

/// Decides whether an invocation gets a remote sink, and how it is set up.
///
/// A remote sink needs a live request id and a destination with a non-empty
/// host. Anything else means console-only logging.
pub fn remote_transport_config(
    context: &InvocationContext,
    destination: Option<&DestinationConfig>,
) -> Option<RemoteTransportConfig> {
    context.request_id()?;
    let destination = destination?;
    let host = destination.enabled_host()?;
    Some(
        RemoteTransportConfig::new(host, destination.port)
            .with_program(context.program())
            .with_hostname(context.hostname())
            .with_meta_in_message(false),
    )
}

/// Builds [`Logger`]s.
///
/// ```rust
/// use lambda_log::{InvocationContext, LoggerFactory};
/// use lambda_log_transport::DestinationConfig;
///
/// let context = InvocationContext::new().with_function_name("thumbnailer");
/// let logger = LoggerFactory::new()
///     .with_log_level(log::LevelFilter::Debug)
///     .with_time_zone(chrono_tz::UTC)
///     .create(&context, Some(&DestinationConfig::new("logs.example.com", 12345)))
///     .unwrap();
///
/// // Not a live invocation, so only the console is attached.
/// assert_eq!(logger.sink_count(), 1);
/// logger.debug("resizing").unwrap();
/// ```
pub struct LoggerFactory<C = SyslogTcpConnector> {
    level: LevelFilter,
    time_zone: Tz,
    console: Option<Box<dyn Write + Send>>,
    connector: C,
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            time_zone: DEFAULT_TIME_ZONE,
            console: None,
            connector: SyslogTcpConnector::default(),
        }
    }
}

impl LoggerFactory {
    /// A factory logging at `Info` and above, in Oslo time, to stdout and a
    /// syslog-over-TCP collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Connect> LoggerFactory<C> {
    /// Drops records less severe than `level`.
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Renders timestamps in `time_zone`.
    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Writes console lines somewhere other than stdout.
    pub fn with_console(mut self, out: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(out));
        self
    }

    /// Opens remote sessions with a different connector.
    pub fn with_connector<D: Connect>(self, connector: D) -> LoggerFactory<D> {
        LoggerFactory {
            level: self.level,
            time_zone: self.time_zone,
            console: self.console,
            connector,
        }
    }

    /// Builds a logger for one invocation.
    ///
    /// The console sink is always attached. The remote sink is attached only
    /// when [`remote_transport_config`] says so, in which case the collector
    /// is connected to right away; a connection failure is returned as is.
    pub fn create(
        self,
        context: &InvocationContext,
        destination: Option<&DestinationConfig>,
    ) -> Result<Logger, LogConfigError> {
        let console = match self.console {
            Some(out) => ConsoleSink::from_boxed(out, self.time_zone),
            None => ConsoleSink::stdout(self.time_zone),
        };
        let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(console)];

        if let Some(config) = remote_transport_config(context, destination) {
            let transport = self.connector.connect(&config)?;
            sinks.push(Box::new(RemoteSink::new(
                transport,
                context,
                &config,
                self.time_zone,
            )));
        }

        Ok(Logger {
            sinks,
            level: self.level,
            function_name: context.function_name.clone(),
        })
    }
}

/// A per-invocation logger.
///
/// Every call goes to each attached sink in turn. A sink that fails does not
/// stop the others; the first failure is reported once all have been tried.
pub struct Logger {
    sinks: Vec<Box<dyn Sink>>,
    level: LevelFilter,
    function_name: Option<String>,
}

impl Logger {
    /// The most verbose level this logger writes.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// How many sinks are attached: 1 for console only, 2 with a remote collector.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Is a remote collector attached?
    pub fn has_remote_sink(&self) -> bool {
        self.sinks.iter().any(|sink| sink.name() == "remote")
    }

    /// Logs `message` with structured `meta` at `level`.
    pub fn log(&self, level: Level, message: &str, meta: &Meta) -> Result<(), LogError> {
        if level > self.level {
            return Ok(());
        }

        let record = Record {
            level,
            message,
            meta,
        };
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(source) = sink.accept(&record) {
                first_error.get_or_insert(LogError {
                    sink: sink.name(),
                    source,
                });
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Logs at `Error`.
    pub fn error(&self, message: impl AsRef<str>) -> Result<(), LogError> {
        self.log(Level::Error, message.as_ref(), &Meta::new())
    }

    /// Logs at `Warn`.
    pub fn warn(&self, message: impl AsRef<str>) -> Result<(), LogError> {
        self.log(Level::Warn, message.as_ref(), &Meta::new())
    }

    /// Logs at `Info`.
    pub fn info(&self, message: impl AsRef<str>) -> Result<(), LogError> {
        self.log(Level::Info, message.as_ref(), &Meta::new())
    }

    /// Logs at `Debug`.
    pub fn debug(&self, message: impl AsRef<str>) -> Result<(), LogError> {
        self.log(Level::Debug, message.as_ref(), &Meta::new())
    }

    /// Logs at `Trace`.
    pub fn trace(&self, message: impl AsRef<str>) -> Result<(), LogError> {
        self.log(Level::Trace, message.as_ref(), &Meta::new())
    }

    /// Logs a duration measurement at `Info`, tagged with this function's name.
    ///
    /// ```rust
    /// use lambda_log::{InvocationContext, LoggerFactory, TimerEvent};
    ///
    /// let logger = LoggerFactory::new()
    ///     .create(&InvocationContext::new().with_function_name("thumbnailer"), None)
    ///     .unwrap();
    /// logger.timer_event(&TimerEvent {
    ///     name: "resize".to_string(),
    ///     summary: "resized 3 images".to_string(),
    ///     msec: 12.34567,
    ///     hrtime: vec![0, 12_345_670],
    /// }).unwrap();
    /// ```
    pub fn timer_event(&self, event: &TimerEvent) -> Result<(), LogError> {
        let meta = event.to_meta(self.function_name.as_deref());
        self.log(Level::Info, &event.summary, &meta)
    }

    /// Starts a measurement to pass to [`Logger::timer_event`] once finished.
    pub fn start_timer(&self, name: impl Into<String>) -> Timer {
        Timer::start(name)
    }

    /// Flushes every sink, reporting the first failure.
    pub fn flush(&self) -> Result<(), LogError> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(source) = sink.flush() {
                first_error.get_or_insert(LogError {
                    sink: sink.name(),
                    source,
                });
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
