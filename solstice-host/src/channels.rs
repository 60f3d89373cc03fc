//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use solstice_core::scheduler::ScheduledTick;
use solstice_protocol::SyncEvent;

use crate::tasks::console::Command;

/// Channel capacity for sync events
pub const SYNC_CHANNEL_SIZE: usize = 8;

/// Channel capacity for console commands
const CONSOLE_CHANNEL_SIZE: usize = 4;

/// Results and change notifications from the sync channel
pub type SyncEventChannel = Channel<CriticalSectionRawMutex, SyncEvent, SYNC_CHANNEL_SIZE>;

/// Coalescing redraw request
pub type RedrawSignal = Signal<CriticalSectionRawMutex, ()>;

/// Latest scheduler tick (None when stopped)
pub type TimerSignal = Signal<CriticalSectionRawMutex, Option<ScheduledTick>>;

/// Sync events from the loopback data layer
pub static SYNC_EVENTS: SyncEventChannel = Channel::new();

/// Signal that a frame should be rendered
pub static REDRAW: RedrawSignal = Signal::new();

/// Signal that the pending tick changed
pub static TIMER: TimerSignal = Signal::new();

/// Commands typed on the console
pub static CONSOLE: Channel<CriticalSectionRawMutex, Command, CONSOLE_CHANNEL_SIZE> =
    Channel::new();

/// Ask the companion to publish its next forecast now
pub static PUBLISH_NOW: Signal<CriticalSectionRawMutex, ()> = Signal::new();
