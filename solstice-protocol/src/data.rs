//! Data items and key/value payloads
//!
//! A `DataItem` carries a path and an opaque payload. The payload of a
//! weather item is a postcard-encoded `DataMap`.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

/// Maximum encoded payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// Maximum path length
pub const MAX_PATH_LEN: usize = 32;

/// Maximum key length
pub const MAX_KEY_LEN: usize = 16;

/// Maximum string value length
pub const MAX_VALUE_LEN: usize = 32;

/// Maximum entries in a map
pub const MAX_ENTRIES: usize = 8;

/// Map key
pub type DataKey = String<MAX_KEY_LEN>;

/// Errors from payload encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Serialized map does not fit in a payload
    PayloadTooLarge,
    /// Map is full
    TooManyEntries,
    /// Key or value exceeds its capacity
    ValueTooLong,
    /// Payload bytes are not a valid map
    Malformed,
}

/// Logical item path (e.g. "/weather")
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataPath(String<MAX_PATH_LEN>);

impl DataPath {
    /// Create a path, failing if it does not fit
    pub fn new(path: &str) -> Result<Self, CodecError> {
        let mut s = String::new();
        s.push_str(path).map_err(|_| CodecError::ValueTooLong)?;
        Ok(Self(s))
    }

    /// Path as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq<str> for DataPath {
    fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
    }
}

impl PartialEq<&str> for DataPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
    }
}

/// Scalar payload value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataValue {
    Int(i64),
    Str(String<MAX_VALUE_LEN>),
}

impl DataValue {
    /// Create a string value, failing if it does not fit
    pub fn str(value: &str) -> Result<Self, CodecError> {
        let mut s = String::new();
        s.push_str(value).map_err(|_| CodecError::ValueTooLong)?;
        Ok(DataValue::Str(s))
    }

    /// Integer content, if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(v) => Some(*v),
            DataValue::Str(_) => None,
        }
    }

    /// String content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::Int(_) => None,
            DataValue::Str(s) => Some(s.as_str()),
        }
    }
}

/// A single map entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct Entry {
    key: DataKey,
    value: DataValue,
}

/// Flat key/value map
///
/// Insertion order is preserved. Inserting an existing key replaces its value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataMap {
    entries: Vec<Entry, MAX_ENTRIES>,
}

impl DataMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: &str, value: DataValue) -> Result<(), CodecError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key.as_str() == key) {
            entry.value = value;
            return Ok(());
        }

        let mut k = DataKey::new();
        k.push_str(key).map_err(|_| CodecError::ValueTooLong)?;
        self.entries
            .push(Entry { key: k, value })
            .map_err(|_| CodecError::TooManyEntries)
    }

    /// Insert an integer
    pub fn put_int(&mut self, key: &str, value: i64) -> Result<(), CodecError> {
        self.insert(key, DataValue::Int(value))
    }

    /// Insert a string
    pub fn put_str(&mut self, key: &str, value: &str) -> Result<(), CodecError> {
        self.insert(key, DataValue::str(value)?)
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries
            .iter()
            .find(|e| e.key.as_str() == key)
            .map(|e| &e.value)
    }

    /// Look up an integer value
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(DataValue::as_int)
    }

    /// Look up a string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(DataValue::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    /// Encode into a buffer, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, CodecError> {
        postcard::to_slice(self, buffer)
            .map(|used| used.len())
            .map_err(|_| CodecError::PayloadTooLarge)
    }

    /// Decode from payload bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        postcard::from_bytes(bytes).map_err(|_| CodecError::Malformed)
    }
}

/// A published data item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataItem {
    /// Item path
    pub path: DataPath,
    /// Encoded payload
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl DataItem {
    /// Create an item with raw payload bytes
    pub fn new(path: DataPath, payload: &[u8]) -> Result<Self, CodecError> {
        let mut bytes = Vec::new();
        bytes
            .extend_from_slice(payload)
            .map_err(|_| CodecError::PayloadTooLarge)?;
        Ok(Self {
            path,
            payload: bytes,
        })
    }

    /// Create an item by encoding a map
    pub fn from_map(path: DataPath, map: &DataMap) -> Result<Self, CodecError> {
        let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
        let len = map.encode(&mut buffer)?;
        Self::new(path, &buffer[..len])
    }

    /// Decode the payload as a map
    pub fn data_map(&self) -> Result<DataMap, CodecError> {
        DataMap::decode(&self.payload)
    }
}
