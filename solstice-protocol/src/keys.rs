//! Weather payload schema
//!
//! The phone publishes the day's forecast at `WEATHER_PATH` with these keys.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::data::{DataMap, MAX_KEY_LEN};

/// Default path of the weather item
pub const WEATHER_PATH: &str = "/weather";

/// Default key for the weather condition id (integer)
pub const KEY_CONDITION: &str = "cond_id";
/// Default key for the high temperature (string)
pub const KEY_HIGH: &str = "hi";
/// Default key for the low temperature (string)
pub const KEY_LOW: &str = "low";
/// Default key for the short description (string)
pub const KEY_SHORT_DESC: &str = "short_desc";
/// Default key for the unit format (string)
pub const KEY_UNITS: &str = "units";

/// Key names used to read a weather payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct PayloadKeys {
    pub condition: String<MAX_KEY_LEN>,
    pub high: String<MAX_KEY_LEN>,
    pub low: String<MAX_KEY_LEN>,
    pub short_desc: String<MAX_KEY_LEN>,
    pub units: String<MAX_KEY_LEN>,
}

impl Default for PayloadKeys {
    fn default() -> Self {
        Self {
            condition: key(KEY_CONDITION),
            high: key(KEY_HIGH),
            low: key(KEY_LOW),
            short_desc: key(KEY_SHORT_DESC),
            units: key(KEY_UNITS),
        }
    }
}

impl PayloadKeys {
    /// Build a weather payload using these keys
    ///
    /// Used by companions and tests; the face only reads payloads.
    pub fn weather_map(
        &self,
        condition_id: i32,
        high: &str,
        low: &str,
        short_desc: &str,
        units: &str,
    ) -> Result<DataMap, crate::data::CodecError> {
        let mut map = DataMap::new();
        map.put_int(&self.condition, condition_id as i64)?;
        map.put_str(&self.high, high)?;
        map.put_str(&self.low, low)?;
        map.put_str(&self.short_desc, short_desc)?;
        map.put_str(&self.units, units)?;
        Ok(map)
    }
}

fn key(name: &str) -> String<MAX_KEY_LEN> {
    let mut s = String::new();
    // Default key names are compile-time constants well under the limit
    let _ = s.push_str(name);
    s
}
