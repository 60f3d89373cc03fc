//! Solstice - weather watch face simulator
//!
//! Runs the face engine on the desktop with an Embassy std executor. A
//! loopback data layer stands in for the phone link, a simulated companion
//! publishes forecasts, and stdin plays the host (visibility, ambient mode,
//! taps, time zone changes). Frames are drawn into an in-memory buffer and
//! summarized in the log.
//!
//! Named for the sun's turning points - the face follows the day from
//! interactive to ambient and back.

use embassy_executor::Spawner;
use embassy_time::Duration;
use log::{info, warn};
use static_cell::StaticCell;

use solstice_core::state::HostEvent;
use solstice_core::traits::Size;
use solstice_core::FaceEngine;
use solstice_display::{FrameBuffer, IconAtlas, Painter};

use crate::channels::{REDRAW, SYNC_EVENTS, TIMER};
use crate::clock::SystemClock;
use crate::config::{config_path, load_config};
use crate::coordinator::FrameCoordinator;
use crate::sync::{DataLayer, LoopbackSync};
use crate::tasks::{CompanionSettings, HostCoordinator};

mod channels;
mod clock;
mod config;
mod coordinator;
mod sync;
mod tasks;

// Shared state referenced by tasks (must live forever)
static DATA_LAYER: StaticCell<DataLayer<'static>> = StaticCell::new();
static COORDINATOR: StaticCell<HostCoordinator> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("Solstice simulator starting...");

    let path = config_path(std::env::args().nth(1));
    let config = load_config(path.as_deref());
    let sim = config.simulation;
    let face = config.face;
    info!(
        "Face: tick {}ms, icons {}px, sync path {}",
        face.tick_period_ms,
        face.icon_size,
        face.sync.path.as_str()
    );

    let layer: &'static DataLayer<'static> =
        DATA_LAYER.init(DataLayer::new(&sim.node_id, &SYNC_EVENTS));

    let companion = CompanionSettings {
        path: face.sync.path.clone(),
        keys: face.sync.keys.clone(),
        forecasts: sim.forecasts.clone(),
        interval: Duration::from_secs(sim.publish_interval_s.max(1)),
    };
    let sync_path = face.sync.path.clone();

    let engine = FaceEngine::new(
        face,
        LoopbackSync::new(layer),
        IconAtlas::new(),
        SystemClock::new(),
    );
    let coordinator: &'static HostCoordinator =
        COORDINATOR.init(FrameCoordinator::new(engine, &REDRAW, &TIMER));

    let canvas = Size::new(sim.canvas_width.max(1), sim.canvas_height.max(1));
    let painter = Painter::new(FrameBuffer::new(canvas.width, canvas.height));
    info!("Canvas {}x{}", canvas.width, canvas.height);

    // Spawn tasks
    spawner.spawn(tasks::sync_task(coordinator)).unwrap();
    spawner
        .spawn(tasks::render_task(coordinator, painter, canvas))
        .unwrap();
    spawner.spawn(tasks::tick_task(coordinator)).unwrap();
    spawner
        .spawn(tasks::time_tick_task(
            coordinator,
            Duration::from_secs(sim.time_tick_s.max(1)),
        ))
        .unwrap();
    spawner
        .spawn(tasks::companion_task(layer, companion))
        .unwrap();
    spawner
        .spawn(tasks::console_task(coordinator, layer, sync_path))
        .unwrap();

    if let Err(e) = tasks::spawn_stdin_reader() {
        warn!("Console unavailable: {}", e);
    }

    // The host reports display properties before the face is first shown
    coordinator.host_event(HostEvent::PropertiesChanged {
        low_bit_ambient: sim.low_bit_ambient,
    });
    if sim.start_visible {
        coordinator.host_event(HostEvent::VisibilityChanged(true));
    }

    info!("All tasks spawned, simulator running");
}
