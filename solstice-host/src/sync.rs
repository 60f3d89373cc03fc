//! Loopback data layer
//!
//! Stands in for the companion transport: the simulated phone writes items
//! into the layer, and the face reaches it through `LoopbackSync`. Results
//! and change notifications are queued on a sync-event channel, never
//! returned inline, so the face sees the same ordering it would on a device.

use std::cell::RefCell;
use std::collections::BTreeMap;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use log::{debug, info, warn};

use solstice_core::traits::SyncChannel;
use solstice_protocol::{ChangeEvent, DataItem, DataPath, NodeId, SyncEvent};

use crate::channels::SyncEventChannel;

/// Error code reported when connecting while offline
pub const OFFLINE_ERROR_CODE: i32 = 7;

#[derive(Debug, Default)]
struct LayerState {
    online: bool,
    connected: bool,
    listeners: Vec<DataPath>,
    items: BTreeMap<String, DataItem>,
}

/// Shared item store with change notification
pub struct DataLayer<'a> {
    node: NodeId,
    events: &'a SyncEventChannel,
    state: Mutex<CriticalSectionRawMutex, RefCell<LayerState>>,
}

impl<'a> DataLayer<'a> {
    /// Create an online, empty layer
    pub fn new(node: &str, events: &'a SyncEventChannel) -> Self {
        let node = NodeId::try_from(node).unwrap_or_else(|_| {
            warn!("Node id '{}' too long; using an empty id", node);
            NodeId::new()
        });

        Self {
            node,
            events,
            state: Mutex::new(RefCell::new(LayerState {
                online: true,
                ..Default::default()
            })),
        }
    }

    /// Take the layer on- or offline
    ///
    /// Going offline drops the current connection and its listeners.
    pub fn set_online(&self, online: bool) {
        self.state.lock(|s| {
            let mut s = s.borrow_mut();
            s.online = online;
            if !online {
                s.connected = false;
                s.listeners.clear();
            }
        });
        info!("Data layer {}", if online { "online" } else { "offline" });
    }

    /// Check if a face is connected
    pub fn is_connected(&self) -> bool {
        self.state.lock(|s| s.borrow().connected)
    }

    /// Current item at `path`
    pub fn item(&self, path: &DataPath) -> Option<DataItem> {
        self.state
            .lock(|s| s.borrow().items.get(path.as_str()).cloned())
    }

    /// Store an item and notify listeners on its path
    pub fn publish(&self, item: DataItem) {
        let notify = self.state.lock(|s| {
            let mut s = s.borrow_mut();
            let notify = s.connected && s.listeners.contains(&item.path);
            s.items.insert(item.path.as_str().into(), item.clone());
            notify
        });

        if notify {
            self.deliver(SyncEvent::DataChanged(ChangeEvent::changed(item)));
        }
    }

    /// Remove the item at `path` and notify listeners
    pub fn delete(&self, path: &DataPath) {
        let notify = self.state.lock(|s| {
            let mut s = s.borrow_mut();
            let existed = s.items.remove(path.as_str()).is_some();
            existed && s.connected && s.listeners.contains(path)
        });

        if notify {
            self.deliver(SyncEvent::DataChanged(ChangeEvent::deleted(path.clone())));
        }
    }

    fn deliver(&self, event: SyncEvent) {
        if let Err(e) = self.events.try_send(event) {
            warn!("Sync event queue full, dropping {:?}", e);
        }
    }
}

/// `SyncChannel` over a `DataLayer`
pub struct LoopbackSync<'a> {
    layer: &'a DataLayer<'a>,
}

impl<'a> LoopbackSync<'a> {
    pub fn new(layer: &'a DataLayer<'a>) -> Self {
        Self { layer }
    }
}

impl SyncChannel for LoopbackSync<'_> {
    fn connect(&mut self) {
        let online = self.layer.state.lock(|s| {
            let mut s = s.borrow_mut();
            s.connected = s.online;
            s.online
        });

        self.layer.deliver(if online {
            SyncEvent::Connected
        } else {
            SyncEvent::Failed(OFFLINE_ERROR_CODE)
        });
    }

    fn disconnect(&mut self) {
        self.layer.state.lock(|s| s.borrow_mut().connected = false);
        debug!("Loopback: disconnected");
    }

    fn add_listener(&mut self, path: &DataPath) {
        self.layer.state.lock(|s| {
            let mut s = s.borrow_mut();
            if !s.listeners.contains(path) {
                s.listeners.push(path.clone());
            }
        });
    }

    fn remove_listener(&mut self, path: &DataPath) {
        self.layer
            .state
            .lock(|s| s.borrow_mut().listeners.retain(|p| p != path));
    }

    fn request_local_node(&mut self) {
        self.layer.deliver(SyncEvent::LocalNode(self.layer.node.clone()));
    }

    fn fetch_current(&mut self, path: &DataPath) {
        self.layer.deliver(SyncEvent::Fetched(self.layer.item(path)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::channel::Channel;
    use solstice_protocol::{ChangeKind, PayloadKeys};

    use crate::channels::SYNC_CHANNEL_SIZE;

    fn path() -> DataPath {
        DataPath::new("/weather").unwrap()
    }

    fn item(hi: &str) -> DataItem {
        let map = PayloadKeys::default()
            .weather_map(800, hi, "40", "Clear", "metric")
            .unwrap();
        DataItem::from_map(path(), &map).unwrap()
    }

    fn drain(events: &SyncEventChannel) -> Vec<SyncEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_receive() {
            out.push(event);
        }
        out
    }

    #[test]
    fn test_connect_fetch_and_node() {
        let events = Channel::new();
        let layer = DataLayer::new("watch-1", &events);
        layer.publish(item("50"));
        let mut sync = LoopbackSync::new(&layer);

        sync.connect();
        sync.request_local_node();
        sync.fetch_current(&path());

        let got = drain(&events);
        assert_eq!(got[0], SyncEvent::Connected);
        assert_eq!(
            got[1],
            SyncEvent::LocalNode(NodeId::try_from("watch-1").unwrap())
        );
        assert_eq!(got[2], SyncEvent::Fetched(Some(item("50"))));
    }

    #[test]
    fn test_fetch_without_item() {
        let events = Channel::new();
        let layer = DataLayer::new("watch", &events);
        let mut sync = LoopbackSync::new(&layer);

        sync.fetch_current(&path());
        assert_eq!(drain(&events), [SyncEvent::Fetched(None)]);
    }

    #[test]
    fn test_offline_connect_fails() {
        let events = Channel::new();
        let layer = DataLayer::new("watch", &events);
        layer.set_online(false);
        let mut sync = LoopbackSync::new(&layer);

        sync.connect();
        assert_eq!(drain(&events), [SyncEvent::Failed(OFFLINE_ERROR_CODE)]);
        assert!(!layer.is_connected());
    }

    #[test]
    fn test_listeners_receive_changes() {
        let events = Channel::new();
        let layer = DataLayer::new("watch", &events);
        let mut sync = LoopbackSync::new(&layer);

        // Not connected yet: stored silently
        layer.publish(item("1"));
        assert!(drain(&events).is_empty());

        sync.connect();
        sync.add_listener(&path());
        drain(&events);

        layer.publish(item("2"));
        layer.delete(&path());

        let got = drain(&events);
        assert_eq!(got.len(), 2);
        let SyncEvent::DataChanged(change) = &got[1] else {
            panic!("expected change event");
        };
        assert_eq!(change.kind, ChangeKind::Deleted);
        assert_eq!(layer.item(&path()), None);
    }

    #[test]
    fn test_removed_listener_is_silent() {
        let events = Channel::new();
        let layer = DataLayer::new("watch", &events);
        let mut sync = LoopbackSync::new(&layer);

        sync.connect();
        sync.add_listener(&path());
        sync.remove_listener(&path());
        sync.disconnect();
        drain(&events);

        layer.publish(item("3"));
        assert!(drain(&events).is_empty());
        assert_eq!(layer.item(&path()), Some(item("3")));
    }

    #[test]
    fn test_full_queue_drops_events() {
        let events = Channel::new();
        let layer = DataLayer::new("watch", &events);
        let mut sync = LoopbackSync::new(&layer);

        for _ in 0..SYNC_CHANNEL_SIZE + 2 {
            sync.request_local_node();
        }
        assert_eq!(drain(&events).len(), SYNC_CHANNEL_SIZE);
    }
}
