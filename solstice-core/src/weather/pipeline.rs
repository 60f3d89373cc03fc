//! Weather sync pipeline
//!
//! Drives the sync channel through connect, listener registration, local
//! node lookup and the initial fetch, then normalizes every weather item that
//! arrives. Transport failures are logged and never retried here; the next
//! visibility change opens the channel again.

use solstice_protocol::{ChangeKind, DataItem, DataPath, NodeId, PayloadKeys, SyncEvent};

use super::snapshot::WeatherSnapshot;
use crate::traits::{IconSource, ImageHandle, SyncChannel};

/// Connection lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// Sync subscription and payload normalization
#[derive(Debug, Clone)]
pub struct SyncPipeline {
    path: DataPath,
    keys: PayloadKeys,
    icon_size: u16,
    link: LinkState,
    local_node: Option<NodeId>,
    listening: bool,
}

impl SyncPipeline {
    /// Create a closed pipeline for the item at `path`
    pub fn new(path: DataPath, keys: PayloadKeys, icon_size: u16) -> Self {
        Self {
            path,
            keys,
            icon_size,
            link: LinkState::Disconnected,
            local_node: None,
            listening: false,
        }
    }

    /// Weather item path
    pub fn path(&self) -> &DataPath {
        &self.path
    }

    /// Current link state
    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Local node identity, once resolved
    pub fn local_node(&self) -> Option<&NodeId> {
        self.local_node.as_ref()
    }

    /// Check if the subscription is open (connecting or connected)
    pub fn is_open(&self) -> bool {
        self.link != LinkState::Disconnected
    }

    /// Start connecting if closed
    pub fn open<S: SyncChannel>(&mut self, sync: &mut S) {
        if self.is_open() {
            return;
        }
        info!("sync: connecting");
        self.link = LinkState::Connecting;
        sync.connect();
    }

    /// Remove the listener and disconnect if open
    pub fn close<S: SyncChannel>(&mut self, sync: &mut S) {
        if !self.is_open() {
            return;
        }
        if self.listening {
            sync.remove_listener(&self.path);
        }
        sync.disconnect();
        info!("sync: disconnected");
        self.reset();
    }

    /// Handle an event from the sync channel
    ///
    /// Returns a snapshot when the event carried a valid weather item.
    pub fn handle<S: SyncChannel, I: IconSource>(
        &mut self,
        event: SyncEvent,
        sync: &mut S,
        icons: &mut I,
    ) -> Option<WeatherSnapshot> {
        if !self.is_open() {
            debug!("sync: ignoring {:?} while closed", event);
            return None;
        }

        match event {
            SyncEvent::Connected => {
                info!("sync: connected, attaching listener");
                self.link = LinkState::Connected;
                if !self.listening {
                    sync.add_listener(&self.path);
                    self.listening = true;
                }
                sync.request_local_node();
                None
            }
            SyncEvent::Suspended(cause) => {
                warn!("sync: connection suspended (cause {})", cause);
                None
            }
            SyncEvent::Failed(code) => {
                warn!("sync: connection failed (code {})", code);
                self.reset();
                None
            }
            SyncEvent::LocalNode(node) => {
                debug!("sync: local node {}", node.as_str());
                self.local_node = Some(node);
                sync.fetch_current(&self.path);
                None
            }
            SyncEvent::Fetched(None) => {
                debug!("sync: no weather item yet");
                None
            }
            SyncEvent::Fetched(Some(item)) => {
                if item.path != self.path {
                    debug!("sync: fetched unrelated item {}", item.path.as_str());
                    return None;
                }
                self.normalize(&item, icons)
            }
            SyncEvent::DataChanged(change) => {
                if *change.path() != self.path {
                    return None;
                }
                match change.kind {
                    ChangeKind::Changed => self.normalize(&change.item, icons),
                    ChangeKind::Deleted => {
                        info!("sync: weather item deleted, keeping last snapshot");
                        None
                    }
                }
            }
        }
    }

    /// Turn an item into a snapshot
    ///
    /// Invalid payloads are dropped. Art that cannot be resolved or loaded
    /// leaves the snapshot without an icon.
    pub fn normalize<I: IconSource>(
        &self,
        item: &DataItem,
        icons: &mut I,
    ) -> Option<WeatherSnapshot> {
        let mut snapshot = match WeatherSnapshot::from_item(item, &self.keys) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("sync: dropping weather payload: {:?}", e);
                return None;
            }
        };

        snapshot.icon = self.load_icon(snapshot.condition_id, icons);
        debug!(
            "sync: weather {} | {} (condition {})",
            snapshot.high.as_str(),
            snapshot.low.as_str(),
            snapshot.condition_id
        );
        Some(snapshot)
    }

    fn load_icon<I: IconSource>(&self, condition_id: i32, icons: &mut I) -> Option<ImageHandle> {
        let Some(art) = icons.art_for(condition_id) else {
            info!("sync: no art for condition {}", condition_id);
            return None;
        };

        match icons.load(art, self.icon_size) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("sync: failed to load {:?} art: {:?}", art, e);
                None
            }
        }
    }

    fn reset(&mut self) {
        self.link = LinkState::Disconnected;
        self.local_node = None;
        self.listening = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::IconError;
    use crate::weather::ConditionArt;
    use solstice_protocol::{ChangeEvent, DataMap};

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Connect,
        Disconnect,
        AddListener,
        RemoveListener,
        LocalNode,
        Fetch,
    }

    #[derive(Default)]
    struct RecordingSync {
        calls: Vec<Call>,
    }

    impl SyncChannel for RecordingSync {
        fn connect(&mut self) {
            self.calls.push(Call::Connect);
        }
        fn disconnect(&mut self) {
            self.calls.push(Call::Disconnect);
        }
        fn add_listener(&mut self, _path: &DataPath) {
            self.calls.push(Call::AddListener);
        }
        fn remove_listener(&mut self, _path: &DataPath) {
            self.calls.push(Call::RemoveListener);
        }
        fn request_local_node(&mut self) {
            self.calls.push(Call::LocalNode);
        }
        fn fetch_current(&mut self, _path: &DataPath) {
            self.calls.push(Call::Fetch);
        }
    }

    struct Icons {
        fail: bool,
    }

    impl IconSource for Icons {
        fn load(&mut self, art: ConditionArt, size: u16) -> Result<ImageHandle, IconError> {
            if self.fail {
                return Err(IconError::Decode);
            }
            Ok(ImageHandle {
                art,
                width: size,
                height: size,
            })
        }
    }

    fn path() -> DataPath {
        DataPath::new("/weather").unwrap()
    }

    fn pipeline() -> SyncPipeline {
        SyncPipeline::new(path(), PayloadKeys::default(), 48)
    }

    fn item(path: DataPath, condition: i32, hi: &str, low: &str) -> DataItem {
        let map = PayloadKeys::default()
            .weather_map(condition, hi, low, "", "")
            .unwrap();
        DataItem::from_map(path, &map).unwrap()
    }

    fn connected(sync: &mut RecordingSync, icons: &mut Icons) -> SyncPipeline {
        let mut p = pipeline();
        p.open(sync);
        p.handle(SyncEvent::Connected, sync, icons);
        p
    }

    #[test]
    fn test_connect_sequence() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = pipeline();

        p.open(&mut sync);
        assert_eq!(p.link(), LinkState::Connecting);

        p.handle(SyncEvent::Connected, &mut sync, &mut icons);
        let node = NodeId::try_from("watch-1").unwrap();
        p.handle(SyncEvent::LocalNode(node), &mut sync, &mut icons);

        assert_eq!(
            sync.calls,
            [Call::Connect, Call::AddListener, Call::LocalNode, Call::Fetch]
        );
        assert_eq!(p.link(), LinkState::Connected);
        assert_eq!(p.local_node().map(|n| n.as_str()), Some("watch-1"));
    }

    #[test]
    fn test_open_twice_connects_once() {
        let mut sync = RecordingSync::default();
        let mut p = pipeline();
        p.open(&mut sync);
        p.open(&mut sync);

        assert_eq!(sync.calls, [Call::Connect]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);
        sync.calls.clear();

        p.close(&mut sync);
        p.close(&mut sync);

        assert_eq!(sync.calls, [Call::RemoveListener, Call::Disconnect]);
        assert!(!p.is_open());
    }

    #[test]
    fn test_close_while_connecting_skips_listener() {
        let mut sync = RecordingSync::default();
        let mut p = pipeline();
        p.open(&mut sync);
        p.close(&mut sync);

        assert_eq!(sync.calls, [Call::Connect, Call::Disconnect]);
    }

    #[test]
    fn test_fetched_item_is_normalized() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);

        let snap = p
            .handle(
                SyncEvent::Fetched(Some(item(path(), 800, "50", "34"))),
                &mut sync,
                &mut icons,
            )
            .unwrap();

        assert_eq!(snap.temperature_text().as_str(), "50 | 34");
        assert_eq!(
            snap.icon,
            Some(ImageHandle {
                art: ConditionArt::Clear,
                width: 48,
                height: 48
            })
        );
    }

    #[test]
    fn test_unknown_condition_has_no_icon() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);

        let change = ChangeEvent::changed(item(path(), 42, "1", "0"));
        let snap = p
            .handle(SyncEvent::DataChanged(change), &mut sync, &mut icons)
            .unwrap();

        assert_eq!(snap.icon, None);
        assert_eq!(snap.high.as_str(), "1");
    }

    #[test]
    fn test_icon_failure_keeps_text() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: true };
        let mut p = connected(&mut sync, &mut icons);

        let change = ChangeEvent::changed(item(path(), 500, "9", "3"));
        let snap = p
            .handle(SyncEvent::DataChanged(change), &mut sync, &mut icons)
            .unwrap();

        assert_eq!(snap.icon, None);
        assert_eq!(snap.temperature_text().as_str(), "9 | 3");
    }

    #[test]
    fn test_other_paths_and_deletes_are_ignored() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);

        let other = DataPath::new("/forecast").unwrap();
        let change = ChangeEvent::changed(item(other, 800, "1", "2"));
        assert!(p
            .handle(SyncEvent::DataChanged(change), &mut sync, &mut icons)
            .is_none());

        let deleted = ChangeEvent::deleted(path());
        assert!(p
            .handle(SyncEvent::DataChanged(deleted), &mut sync, &mut icons)
            .is_none());
    }

    #[test]
    fn test_malformed_payload_is_dropped() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);

        let mut map = DataMap::new();
        map.put_str("hi", "50").unwrap();
        let partial = DataItem::from_map(path(), &map).unwrap();

        assert!(p
            .handle(SyncEvent::Fetched(Some(partial)), &mut sync, &mut icons)
            .is_none());
    }

    #[test]
    fn test_failed_returns_to_disconnected() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = pipeline();
        p.open(&mut sync);

        p.handle(SyncEvent::Failed(7), &mut sync, &mut icons);
        assert_eq!(p.link(), LinkState::Disconnected);

        // Next open connects again
        p.open(&mut sync);
        assert_eq!(sync.calls, [Call::Connect, Call::Connect]);
    }

    #[test]
    fn test_suspended_keeps_state() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = connected(&mut sync, &mut icons);

        p.handle(SyncEvent::Suspended(1), &mut sync, &mut icons);
        assert_eq!(p.link(), LinkState::Connected);
    }

    #[test]
    fn test_events_while_closed_are_ignored() {
        let mut sync = RecordingSync::default();
        let mut icons = Icons { fail: false };
        let mut p = pipeline();

        assert!(p
            .handle(
                SyncEvent::Fetched(Some(item(path(), 800, "50", "34"))),
                &mut sync,
                &mut icons
            )
            .is_none());
        p.handle(SyncEvent::Connected, &mut sync, &mut icons);

        assert!(sync.calls.is_empty());
        assert_eq!(p.link(), LinkState::Disconnected);
    }
}
