//! Wall clock rendering shared by every sink.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Zone used for rendered timestamps unless the factory is told otherwise.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Europe::Oslo;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders "now" in the given zone as `YYYY-MM-DD HH:mm:ss.SSS`.
pub fn timestamp(time_zone: Tz) -> String {
    format_timestamp(Utc::now(), time_zone)
}

/// Renders an instant in the given zone as `YYYY-MM-DD HH:mm:ss.SSS`.
pub fn format_timestamp(at: DateTime<Utc>, time_zone: Tz) -> String {
    at.with_timezone(&time_zone)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}
