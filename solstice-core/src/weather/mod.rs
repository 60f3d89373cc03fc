//! Weather data
//!
//! Condition art lookup, the normalized weather snapshot, and the pipeline
//! that turns sync-channel events into snapshots.

pub mod icons;
pub mod pipeline;
pub mod snapshot;

pub use icons::ConditionArt;
pub use pipeline::{LinkState, SyncPipeline};
pub use snapshot::{Field, PayloadError, WeatherSnapshot, TEXT_LEN};
