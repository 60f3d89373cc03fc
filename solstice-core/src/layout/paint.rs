//! Text paints

use crate::config::{Color, FaceConfig};

/// Text style for one draw operation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paint {
    pub color: Color,
    /// Text size in pixels
    pub size: f32,
    pub anti_alias: bool,
}

/// Paints for each text role
///
/// Built once from configuration. Only anti-aliasing changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paints {
    pub time: Paint,
    pub date: Paint,
    pub temperature: Paint,
}

impl Paints {
    /// Build anti-aliased paints from configuration
    pub fn from_config(config: &FaceConfig) -> Self {
        let paint = |size| Paint {
            color: config.text_color,
            size,
            anti_alias: true,
        };

        Self {
            time: paint(config.text_sizes.time),
            date: paint(config.text_sizes.date),
            temperature: paint(config.text_sizes.temperature),
        }
    }

    /// Set anti-aliasing for low-bit ambient
    ///
    /// The date paint is left as is.
    pub fn set_anti_alias(&mut self, enabled: bool) {
        self.time.anti_alias = enabled;
        self.temperature.anti_alias = enabled;
    }
}
