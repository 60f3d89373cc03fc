//! Collaborator traits
//!
//! These traits define the interface between the face logic and the
//! host-specific sync transport, image loader, clock and renderer.

pub mod clock;
pub mod icons;
pub mod render;
pub mod sync;

pub use clock::Clock;
pub use icons::{IconError, IconSource, ImageHandle};
pub use render::{RenderError, RenderSink, Size, TextMeasure};
pub use sync::SyncChannel;
