//! Tick tasks
//!
//! `tick_task` sleeps until the scheduler's pending tick is due and delivers
//! it. Re-arming or stopping the scheduler signals `TIMER`, which cancels the
//! sleep. `time_tick_task` stands in for the host's minute tick in ambient.

use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker, Timer};
use log::{debug, info, trace};

use crate::channels::TIMER;
use crate::tasks::HostCoordinator;

/// Scheduler tick task
#[embassy_executor::task]
pub async fn tick_task(coordinator: &'static HostCoordinator) {
    info!("Tick task started");

    let mut armed = coordinator.pending_tick();

    loop {
        let Some(tick) = armed else {
            armed = TIMER.wait().await;
            continue;
        };

        let delay = tick.delay_from(coordinator.now_ms());
        trace!("Tick {} due in {}ms", tick.generation, delay);

        match select(Timer::after_millis(delay), TIMER.wait()).await {
            Either::First(()) => {
                if !coordinator.on_tick(tick) {
                    debug!("Tick {} was stale", tick.generation);
                }
                TIMER.reset();
                armed = coordinator.pending_tick();
            }
            Either::Second(next) => armed = next,
        }
    }
}

/// Host time tick task
///
/// Delivers a time tick every `interval` while the face is ambient.
#[embassy_executor::task]
pub async fn time_tick_task(coordinator: &'static HostCoordinator, interval: Duration) {
    info!("Time tick task started ({}s)", interval.as_secs());

    let mut ticker = Ticker::every(interval);

    loop {
        ticker.next().await;

        coordinator.with_engine(|engine| {
            if engine.display().visible && engine.display().ambient {
                engine.on_time_tick();
            }
        });
    }
}
