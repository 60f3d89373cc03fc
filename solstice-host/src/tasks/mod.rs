//! Embassy async tasks
//!
//! Each task runs independently and reaches the face through the shared
//! coordinator. Tasks talk to each other only via channels and signals.

pub mod companion;
pub mod console;
pub mod render;
pub mod sync;
pub mod tick;

pub use companion::{companion_task, CompanionSettings};
pub use console::{console_task, spawn_stdin_reader};
pub use render::render_task;
pub use sync::sync_task;
pub use tick::{tick_task, time_tick_task};

use solstice_display::IconAtlas;

use crate::clock::SystemClock;
use crate::coordinator::FrameCoordinator;
use crate::sync::LoopbackSync;

/// Coordinator type shared by every task
pub type HostCoordinator =
    FrameCoordinator<'static, LoopbackSync<'static>, IconAtlas, SystemClock>;
