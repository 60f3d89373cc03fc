//! Normalized weather snapshot

use core::fmt::Write;

use heapless::String;
use solstice_protocol::{CodecError, DataItem, DataMap, PayloadKeys, MAX_VALUE_LEN};

use crate::traits::ImageHandle;

/// Capacity of snapshot text fields
pub const TEXT_LEN: usize = MAX_VALUE_LEN;

/// Capacity of the temperature line ("<high> | <low>")
pub const TEMPERATURE_TEXT_LEN: usize = 2 * TEXT_LEN + 8;

/// Payload field names, for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Condition,
    High,
    Low,
}

/// Errors from normalizing a weather payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Payload bytes could not be decoded
    Codec(CodecError),
    /// Required field is absent or has the wrong type
    MissingField(Field),
    /// Condition id does not fit an i32
    OutOfRange,
}

impl From<CodecError> for PayloadError {
    fn from(err: CodecError) -> Self {
        PayloadError::Codec(err)
    }
}

/// Last received weather
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSnapshot {
    pub condition_id: i32,
    pub high: String<TEXT_LEN>,
    pub low: String<TEXT_LEN>,
    pub short_desc: String<TEXT_LEN>,
    pub unit_format: String<TEXT_LEN>,
    /// Condition art, if it could be resolved and loaded
    pub icon: Option<ImageHandle>,
}

impl WeatherSnapshot {
    /// Read a snapshot from a decoded map
    ///
    /// Condition, high and low are required. Short description and unit
    /// format default to empty. The icon is left unset.
    pub fn from_map(map: &DataMap, keys: &PayloadKeys) -> Result<Self, PayloadError> {
        let condition = map
            .get_int(&keys.condition)
            .ok_or(PayloadError::MissingField(Field::Condition))?;
        let condition_id = i32::try_from(condition).map_err(|_| PayloadError::OutOfRange)?;

        let high = map
            .get_str(&keys.high)
            .ok_or(PayloadError::MissingField(Field::High))?;
        let low = map
            .get_str(&keys.low)
            .ok_or(PayloadError::MissingField(Field::Low))?;

        Ok(Self {
            condition_id,
            high: text(high),
            low: text(low),
            short_desc: text(map.get_str(&keys.short_desc).unwrap_or("")),
            unit_format: text(map.get_str(&keys.units).unwrap_or("")),
            icon: None,
        })
    }

    /// Decode an item's payload and read a snapshot from it
    pub fn from_item(item: &DataItem, keys: &PayloadKeys) -> Result<Self, PayloadError> {
        let map = item.data_map()?;
        Self::from_map(&map, keys)
    }

    /// Temperature line, e.g. "50 | 34"
    pub fn temperature_text(&self) -> String<TEMPERATURE_TEXT_LEN> {
        let mut line = String::new();
        let _ = write!(line, "{} | {}", self.high, self.low);
        line
    }

    /// Check if both temperatures are present
    pub fn has_temperatures(&self) -> bool {
        !self.high.is_empty() && !self.low.is_empty()
    }
}

fn text(value: &str) -> String<TEXT_LEN> {
    let mut s = String::new();
    // Map values are bounded by the same capacity
    let _ = s.push_str(value);
    s
}
