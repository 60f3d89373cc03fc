//! Display state machine
//!
//! Tracks visibility, ambient mode and the low-bit property, and turns host
//! lifecycle events into effects for the engine. The machine itself performs
//! no I/O.

pub mod events;
pub mod machine;

pub use events::{Effect, Effects, HostEvent, TapKind, MAX_EFFECTS};
pub use machine::{DisplayState, FaceMode};
