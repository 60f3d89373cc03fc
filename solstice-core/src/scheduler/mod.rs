//! Periodic redraw scheduler
//!
//! Arms one tick at a time on period boundaries of the wall clock, so a slow
//! render never pushes later ticks off the second.

pub mod tick;

pub use tick::{next_delay_ms, ScheduledTick, TickOutcome, TickScheduler, DEFAULT_PERIOD_MS};
