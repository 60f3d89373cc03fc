//! Sync channel trait

use solstice_protocol::DataPath;

/// Trait for the companion data-layer connection
///
/// Every call is fire-and-forget. Results come back later as
/// `solstice_protocol::SyncEvent`s, delivered to the engine by the host.
/// Implementations must never block the caller.
pub trait SyncChannel {
    /// Begin connecting; completion is reported as `Connected` or `Failed`
    fn connect(&mut self);

    /// Drop the connection
    fn disconnect(&mut self);

    /// Register for change notifications on `path`
    fn add_listener(&mut self, path: &DataPath);

    /// Unregister change notifications on `path`
    fn remove_listener(&mut self, path: &DataPath);

    /// Ask for the local node identity; answered with `LocalNode`
    fn request_local_node(&mut self);

    /// Fetch the current item at `path`; answered with `Fetched`
    fn fetch_current(&mut self, path: &DataPath);
}
