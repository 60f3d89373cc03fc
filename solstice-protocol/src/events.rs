//! Events delivered by a sync channel
//!
//! Every sync-channel operation is fire-and-forget. Results and change
//! notifications come back later as `SyncEvent`s.

use heapless::String;

use crate::data::{DataItem, DataPath};

/// Identifier of the local node on the data layer
pub type NodeId = String<32>;

/// Kind of change reported for a data item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeKind {
    /// Item was created or updated
    Changed,
    /// Item was removed
    Deleted,
}

/// Change notification for one data item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Item as of the change. Deleted items carry an empty payload.
    pub item: DataItem,
}

impl ChangeEvent {
    /// Create a change notification
    pub fn changed(item: DataItem) -> Self {
        Self {
            kind: ChangeKind::Changed,
            item,
        }
    }

    /// Create a deletion notification
    pub fn deleted(path: DataPath) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            item: DataItem {
                path,
                payload: heapless::Vec::new(),
            },
        }
    }

    /// Path of the affected item
    pub fn path(&self) -> &DataPath {
        &self.item.path
    }
}

/// Events from the sync channel to the face
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEvent {
    /// Channel connected
    Connected,
    /// Connection suspended (cause code)
    Suspended(i32),
    /// Connection attempt failed (error code)
    Failed(i32),
    /// Local node identity resolved
    LocalNode(NodeId),
    /// Result of a one-shot fetch (None if no item exists)
    Fetched(Option<DataItem>),
    /// Change notification from a registered listener
    DataChanged(ChangeEvent),
}

impl SyncEvent {
    /// Returns true for connection lifecycle events
    pub fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            SyncEvent::Connected | SyncEvent::Suspended(_) | SyncEvent::Failed(_)
        )
    }

    /// Returns true if this event may carry weather data
    pub fn carries_data(&self) -> bool {
        matches!(self, SyncEvent::Fetched(Some(_)) | SyncEvent::DataChanged(_))
    }
}
