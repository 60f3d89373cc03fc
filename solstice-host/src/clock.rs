//! System wall clock

use jiff::tz::{self, TimeZone};
use jiff::Timestamp;
use log::warn;

use solstice_core::traits::Clock;

/// Zones the console cycles through, after the system zone
const ZONES: [(&str, i8); 3] = [("UTC", 0), ("UTC-05", -5), ("UTC+09", 9)];

/// Wall clock with an optional fixed-zone override
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    /// Index into ZONES, or None for the system zone
    zone: Option<usize>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the next zone, returning its name
    pub fn cycle_zone(&mut self) -> &'static str {
        self.zone = match self.zone {
            None => Some(0),
            Some(i) if i + 1 < ZONES.len() => Some(i + 1),
            Some(_) => None,
        };
        self.zone_name()
    }

    /// Name of the active zone
    pub fn zone_name(&self) -> &'static str {
        match self.zone {
            Some(i) => ZONES[i].0,
            None => "system",
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn time_zone(&self) -> TimeZone {
        match self.zone {
            Some(i) => TimeZone::fixed(tz::offset(ZONES[i].1)),
            None => TimeZone::try_system().unwrap_or_else(|e| {
                warn!("System time zone unavailable ({}); using UTC", e);
                TimeZone::UTC
            }),
        }
    }
}
