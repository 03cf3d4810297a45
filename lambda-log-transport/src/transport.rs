use crate::{RemoteTransportConfig, TransportError};

/// A live session with a remote collector.
///
/// Implementations receive records that are already fully formatted. They own
/// framing, delivery timing and whatever buffering the wire needs.
pub trait Transport: Send + Sync {
    /// Send one formatted record at the given level.
    fn send(&self, level: log::Level, message: &str) -> Result<(), TransportError>;

    /// Push anything written so far out to the collector.
    fn flush(&self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Opens [`Transport`] sessions.
///
/// ```rust
/// use lambda_log_transport::{Connect, RemoteTransportConfig, Transport, TransportError};
///
/// struct Discard;
/// impl Transport for Discard {
///     fn send(&self, _level: log::Level, _message: &str) -> Result<(), TransportError> {
///         Ok(())
///     }
/// }
///
/// struct DiscardConnector;
/// impl Connect for DiscardConnector {
///     fn connect(
///         &self,
///         _config: &RemoteTransportConfig,
///     ) -> Result<Box<dyn Transport>, TransportError> {
///         Ok(Box::new(Discard))
///     }
/// }
///
/// let transport = DiscardConnector
///     .connect(&RemoteTransportConfig::new("logs.example.com", 514))
///     .unwrap();
/// transport.send(log::Level::Info, "hello").unwrap();
/// ```
pub trait Connect {
    /// Establish a session using the given configuration.
    fn connect(&self, config: &RemoteTransportConfig)
    -> Result<Box<dyn Transport>, TransportError>;
}

impl<C: Connect + ?Sized> Connect for &C {
    fn connect(
        &self,
        config: &RemoteTransportConfig,
    ) -> Result<Box<dyn Transport>, TransportError> {
        (**self).connect(config)
    }
}
