use log::kv::{self, Key, Source, VisitSource};
use log::{Log, Metadata, Record, SetLoggerError, set_boxed_logger, set_max_level};
use serde_json::Value;

use crate::{Logger, Meta};

/// Serves the `log` macros from a [`Logger`].
///
/// Key-value pairs on a record become its structured metadata, so
/// `log::info!(user = "ann"; "signed in")` forwards `{"user": "ann"}` to the
/// remote collector.
pub struct LambdaLog {
    logger: Logger,
}

impl LambdaLog {
    /// Wraps a logger without installing it.
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Installs `logger` as the process-wide `log` backend.
    pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
        let level = logger.level();
        set_boxed_logger(Box::new(Self::new(logger)))?;
        set_max_level(level);
        Ok(())
    }
}

impl Log for LambdaLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.logger.level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let mut meta = Meta::new();
            let _ = record.key_values().visit(&mut MetaCollector(&mut meta));
            let message = record.args().to_string();

            // Nowhere to report a failed sink from inside the facade.
            let _ = self.logger.log(record.level(), &message, &meta);
        }
    }

    fn flush(&self) {
        let _ = self.logger.flush();
    }
}

struct MetaCollector<'a>(&'a mut Meta);

impl<'kvs> VisitSource<'kvs> for MetaCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        let value = serde_json::to_value(&value).unwrap_or_else(|_| Value::from(value.to_string()));
        self.0.insert(key.as_str().to_string(), value);
        Ok(())
    }
}
