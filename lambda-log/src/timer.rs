//! Duration measurements in the shape the remote collector indexes.

use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::Meta;

/// A named duration measurement.
///
/// `hrtime` is carried for schema compatibility with collectors that accept
/// `[seconds, nanoseconds]` pairs; it is not part of any rendered output.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TimerEvent {
    /// Event name, used by the collector to group measurements
    pub name: String,
    /// Human readable message logged with the measurement
    pub summary: String,
    /// Duration in milliseconds
    pub msec: f64,
    /// High resolution duration, `[seconds, nanoseconds]`
    #[serde(default)]
    pub hrtime: Vec<u64>,
}

impl TimerEvent {
    /// Creates an event from a measured duration.
    pub fn from_duration(
        name: impl Into<String>,
        summary: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            msec: elapsed.as_secs_f64() * 1000.0,
            hrtime: vec![elapsed.as_secs(), u64::from(elapsed.subsec_nanos())],
        }
    }

    /// The structured fields logged alongside `summary`.
    ///
    /// `service` is left out when the function name is unknown.
    pub fn to_meta(&self, service: Option<&str>) -> Meta {
        let mut tags = Meta::new();
        if let Some(service) = service {
            tags.insert("service".to_string(), Value::from(service));
        }

        let mut meta = Meta::new();
        meta.insert("name".to_string(), Value::from(self.name.as_str()));
        meta.insert("fields".to_string(), json!({ "msec": round_msec(self.msec) }));
        meta.insert("tags".to_string(), Value::Object(tags));
        meta.insert("_tags".to_string(), json!(["event"]));
        meta
    }
}

/// Rounds to three decimal places, i.e. whole microseconds.
///
/// Rounding is done on the decimal rendering of the stored value, so
/// `1.0005` (stored just below the half-step) becomes `1.0`.
pub fn round_msec(msec: f64) -> f64 {
    format!("{msec:.3}").parse().unwrap_or(msec)
}

/// A running measurement, finished into a [`TimerEvent`].
#[derive(Debug)]
pub struct Timer {
    name: String,
    started: Instant,
}

impl Timer {
    /// Starts measuring now.
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started: Instant::now(),
        }
    }

    /// Time elapsed so far.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Stops measuring and describes the measurement.
    pub fn finish(self, summary: impl Into<String>) -> TimerEvent {
        let elapsed = self.started.elapsed();
        TimerEvent::from_duration(self.name, summary, elapsed)
    }
}
