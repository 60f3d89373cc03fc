//! Wall-clock snapshot and time/date text
//!
//! A snapshot is taken fresh for every frame from the clock's current instant
//! and the engine's time zone.

use core::fmt::Write;

use heapless::String;
use jiff::civil::Weekday;
use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Capacity of the time text ("23:59")
pub const TIME_TEXT_LEN: usize = 8;

/// Capacity of the date text ("WED, SEP 30, 2017")
pub const DATE_TEXT_LEN: usize = 24;

const WEEKDAYS: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Local calendar fields for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSnapshot {
    pub hour: u8,
    pub minute: u8,
    /// Days from Monday (0 = Monday)
    pub weekday: u8,
    /// Month of year (1 = January)
    pub month: u8,
    pub day: u8,
    pub year: i16,
}

impl TimeSnapshot {
    /// Snapshot of `timestamp` in `tz`
    pub fn at(timestamp: Timestamp, tz: &TimeZone) -> Self {
        let dt = tz.to_datetime(timestamp);
        Self {
            hour: dt.hour() as u8,
            minute: dt.minute() as u8,
            weekday: weekday_index(dt.weekday()),
            month: dt.month() as u8,
            day: dt.day() as u8,
            year: dt.year(),
        }
    }

    /// 24-hour time, hour unpadded, minute zero-padded ("9:05", "14:05")
    pub fn time_text(&self) -> String<TIME_TEXT_LEN> {
        let mut text = String::new();
        // Two small integers always fit
        let _ = write!(text, "{}:{:02}", self.hour, self.minute);
        text
    }

    /// Upper-case English date ("MON, FEB 13, 2017")
    pub fn date_text(&self) -> String<DATE_TEXT_LEN> {
        let weekday = WEEKDAYS[self.weekday as usize % 7];
        let month = MONTHS[(self.month.clamp(1, 12) - 1) as usize];

        let mut text = String::new();
        let _ = write!(text, "{}, {} {}, {}", weekday, month, self.day, self.year);
        text
    }
}

fn weekday_index(weekday: Weekday) -> u8 {
    weekday.to_monday_zero_offset() as u8
}
