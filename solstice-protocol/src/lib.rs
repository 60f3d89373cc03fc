//! Companion data-layer protocol
//!
//! This crate defines what the paired phone publishes and what the watch face
//! consumes: data items addressed by path, flat key/value payloads, and the
//! events a sync channel delivers back to the face.
//!
//! # Data Model
//!
//! ```text
//! DataItem ──► path    "/weather"
//!          └─► payload postcard(DataMap)
//!
//! DataMap  ──► [ "cond_id" = Int(800), "hi" = Str("50"), "low" = Str("34"), ... ]
//! ```
//!
//! The transport that moves items between devices is not part of this crate.
//! A sync channel only needs to hand the face `SyncEvent`s.

#![no_std]
#![deny(unsafe_code)]

pub mod data;
pub mod events;
pub mod keys;

pub use data::{
    CodecError, DataItem, DataKey, DataMap, DataPath, DataValue, MAX_ENTRIES, MAX_KEY_LEN,
    MAX_PATH_LEN, MAX_PAYLOAD_SIZE, MAX_VALUE_LEN,
};
pub use events::{ChangeEvent, ChangeKind, NodeId, SyncEvent};
pub use keys::{PayloadKeys, WEATHER_PATH};
