//! Frame layout
//!
//! Layout is a pure function of the current time, the last weather snapshot
//! and the display state. Nothing computed here survives the frame.

pub mod compose;
pub mod frame;
pub mod paint;

pub use compose::{center_offset, compose, Scene};
pub use frame::{DrawOp, Frame, TextRole, MAX_DRAW_OPS, TEXT_OP_LEN};
pub use paint::{Paint, Paints};
