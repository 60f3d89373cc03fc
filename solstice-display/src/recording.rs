//! Sink that records frames instead of drawing them

use alloc::vec::Vec;

use solstice_core::layout::Frame;
use solstice_core::traits::{RenderError, RenderSink, Size};

/// Keeps every rendered frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    frames: Vec<(Frame, Size)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far, oldest first
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().map(|(frame, _)| frame)
    }

    /// Most recent frame
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last().map(|(frame, _)| frame)
    }

    /// Canvas size of the most recent frame
    pub fn last_size(&self) -> Option<Size> {
        self.frames.last().map(|(_, size)| *size)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: &Frame, size: Size) -> Result<(), RenderError> {
        self.frames.push((frame.clone(), size));
        Ok(())
    }
}
