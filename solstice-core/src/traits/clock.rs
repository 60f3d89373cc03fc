//! Wall clock trait

use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Source of the current instant and local time zone
pub trait Clock {
    /// Current instant
    fn now(&self) -> Timestamp;

    /// Current local time zone
    ///
    /// Read when the face becomes visible and on zone-change notifications.
    fn time_zone(&self) -> TimeZone;

    /// Current instant in Unix milliseconds
    fn now_ms(&self) -> i64 {
        self.now().as_millisecond()
    }
}
