//! Where remote logs should go, and how the client should present itself.

/// Port used when a destination does not name one.
pub const DEFAULT_SYSLOG_PORT: u16 = 514;

/// A remote log destination, as supplied by whoever deploys the function.
///
/// The whole configuration is optional for callers, and so is `host`: a
/// destination without a host is treated as "no remote logging".
///
/// ```rust
/// use lambda_log_transport::DestinationConfig;
///
/// let config: DestinationConfig =
///     serde_json::from_str(r#"{ "host": "logs1.example.com", "port": 12345 }"#).unwrap();
/// assert_eq!(config.enabled_host(), Some("logs1.example.com"));
///
/// let empty: DestinationConfig = serde_json::from_str(r#"{ "host": "" }"#).unwrap();
/// assert_eq!(empty.enabled_host(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct DestinationConfig {
    /// Collector host name or address
    #[serde(default)]
    pub host: Option<String>,
    /// Collector port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_SYSLOG_PORT
}

impl Default for DestinationConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_SYSLOG_PORT,
        }
    }
}

impl DestinationConfig {
    /// Creates a destination for the given collector.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: Some(host.into()),
            port,
        }
    }

    /// The host to send to, if it is set to something non-empty.
    pub fn enabled_host(&self) -> Option<&str> {
        self.host.as_deref().filter(|host| !host.is_empty())
    }
}

/// Everything a remote collector client is configured with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteTransportConfig {
    /// Collector host name or address
    pub host: String,
    /// Collector port
    pub port: u16,
    /// The program name reported with every record
    pub program: String,
    /// The host name reported with every record
    pub hostname: String,
    /// Should caller metadata also be appended to the free-text message?
    pub include_meta_in_message: bool,
}

impl RemoteTransportConfig {
    /// Targets the given collector, with an empty program name and a generic hostname.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            program: String::new(),
            hostname: "localhost".to_string(),
            include_meta_in_message: false,
        }
    }

    /// Sets the program name reported with every record.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the host name reported with every record.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    /// Chooses whether caller metadata is duplicated into the message text.
    pub fn with_meta_in_message(mut self, include_meta_in_message: bool) -> Self {
        self.include_meta_in_message = include_meta_in_message;
        self
    }
}
