//! Board-agnostic core logic for the Solstice watch face
//!
//! This crate contains all face logic that does not depend on a specific
//! host, display or transport:
//!
//! - Display state machine (visibility, ambient mode, low-bit ambient, taps)
//! - Drift-corrected tick scheduler
//! - Weather snapshot normalization and the sync pipeline
//! - Pure layout from time, weather and display state to draw operations
//! - The engine that coordinates the above
//! - Collaborator traits (sync channel, icon source, clock, render sink)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the log macros are in scope for every module
#[macro_use]
mod fmt;

pub mod config;
pub mod engine;
pub mod layout;
pub mod scheduler;
pub mod state;
pub mod time;
pub mod traits;
pub mod weather;

pub use engine::FaceEngine;
