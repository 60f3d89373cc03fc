//! Sync event task
//!
//! Forwards results and change notifications from the data layer to the face.

use log::{info, trace};

use crate::channels::SYNC_EVENTS;
use crate::tasks::HostCoordinator;

#[embassy_executor::task]
pub async fn sync_task(coordinator: &'static HostCoordinator) {
    info!("Sync task started");

    loop {
        let event = SYNC_EVENTS.receive().await;
        trace!("Sync event: {:?}", event);
        coordinator.on_sync_event(event);
    }
}
