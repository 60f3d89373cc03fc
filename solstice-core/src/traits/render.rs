//! Rendering traits

use crate::layout::{Frame, Paint};

/// Canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Errors that can occur while rendering a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// Draw target rejected an operation
    DrawFailed,
    /// Image referenced by the frame is not loaded
    MissingImage,
}

/// Text measurement for layout
pub trait TextMeasure {
    /// Rendered width of `text` in pixels with `paint`
    fn text_width(&self, text: &str, paint: &Paint) -> f32;
}

/// Trait for executing a frame's draw operations
pub trait RenderSink {
    /// Draw `frame` onto a canvas of `size`
    fn render(&mut self, frame: &Frame, size: Size) -> Result<(), RenderError>;
}
