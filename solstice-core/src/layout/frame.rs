//! Draw operations

use heapless::{String, Vec};

use super::paint::Paint;
use crate::config::Color;
use crate::traits::ImageHandle;

/// Maximum draw operations in a frame
pub const MAX_DRAW_OPS: usize = 5;

/// Capacity of a text draw operation
pub const TEXT_OP_LEN: usize = 72;

/// What a text operation shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextRole {
    Time,
    Date,
    Temperature,
}

/// One draw operation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawOp {
    /// Fill the whole canvas
    Fill(Color),
    /// Draw text with its left edge at `x` and baseline at `y`
    Text {
        role: TextRole,
        text: String<TEXT_OP_LEN>,
        x: f32,
        y: f32,
        paint: Paint,
    },
    /// Draw an image with its top-left corner at (`x`, `y`)
    Image { image: ImageHandle, x: f32, y: f32 },
}

/// Ordered draw list for one frame
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    ops: Vec<DrawOp, MAX_DRAW_OPS>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    pub(crate) fn push(&mut self, op: DrawOp) {
        // compose never emits more than MAX_DRAW_OPS
        let _ = self.ops.push(op);
    }

    /// Operations in draw order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if the frame draws nothing
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Background fill color
    pub fn background(&self) -> Option<Color> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Fill(color) => Some(*color),
            _ => None,
        })
    }

    /// Text operation for a role
    pub fn text(&self, role: TextRole) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { role: r, .. } if *r == role))
    }

    /// Text content for a role
    pub fn text_of(&self, role: TextRole) -> Option<&str> {
        match self.text(role)? {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Image operation, if any
    pub fn image(&self) -> Option<&DrawOp> {
        self.ops.iter().find(|op| matches!(op, DrawOp::Image { .. }))
    }
}
