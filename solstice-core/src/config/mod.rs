//! Configuration types
//!
//! Face configuration is loaded once by the host and treated as read-only.

pub mod types;

pub use types::*;
