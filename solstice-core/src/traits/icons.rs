//! Weather art loading

use crate::weather::ConditionArt;

/// Errors from loading an art image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IconError {
    /// No image for this art
    Missing,
    /// Image data could not be decoded
    Decode,
    /// Image could not be scaled to the requested size
    Scale,
}

/// A loaded, scaled image ready to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImageHandle {
    pub art: ConditionArt,
    pub width: u16,
    pub height: u16,
}

/// Trait for resolving and loading weather art
pub trait IconSource {
    /// Resolve a weather condition id to art
    ///
    /// The default uses the standard condition table.
    fn art_for(&self, condition_id: i32) -> Option<ConditionArt> {
        ConditionArt::for_condition(condition_id)
    }

    /// Load `art` scaled to a `size` x `size` square
    fn load(&mut self, art: ConditionArt, size: u16) -> Result<ImageHandle, IconError>;
}
