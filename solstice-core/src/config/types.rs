//! Configuration type definitions
//!
//! These types describe the face's colors, text sizes, vertical offsets and
//! the weather payload schema. The host deserializes them from TOML when the
//! `serde` feature is enabled.

use solstice_protocol::{DataPath, PayloadKeys, WEATHER_PATH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scheduler::DEFAULT_PERIOD_MS;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from `0xRRGGBB`
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }

    /// Color as `0xRRGGBB`
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Color::from_hex(hex)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Sunshine blue
pub const SUNSHINE_BLUE: Color = Color::from_hex(0x03A9F4);

/// Darker sunshine blue
pub const SUNSHINE_DARK_BLUE: Color = Color::from_hex(0x0288D1);

/// Text sizes in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextSizes {
    pub time: f32,
    pub date: f32,
    pub temperature: f32,
}

impl Default for TextSizes {
    fn default() -> Self {
        Self {
            time: 40.0,
            date: 20.0,
            temperature: 24.0,
        }
    }
}

/// Vertical offsets in pixels
///
/// Text offsets are baselines; the art offset is the top edge of the icon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Offsets {
    pub time_y: f32,
    pub date_y: f32,
    pub weather_y: f32,
    pub art_y: f32,
}

impl Default for Offsets {
    fn default() -> Self {
        Self {
            time_y: 110.0,
            date_y: 150.0,
            weather_y: 195.0,
            art_y: 215.0,
        }
    }
}

/// Weather sync settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncConfig {
    /// Path of the weather item
    pub path: DataPath,
    /// Payload key names
    pub keys: PayloadKeys,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            // WEATHER_PATH is a short constant
            path: DataPath::new(WEATHER_PATH).unwrap_or_default(),
            keys: PayloadKeys::default(),
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Interactive background color
    pub background: Color,
    /// Background colors selected by tap-count parity (even, odd)
    pub tap_palette: [Color; 2],
    /// Text color for time, date and temperature
    pub text_color: Color,
    /// Text sizes
    pub text_sizes: TextSizes,
    /// Vertical offsets
    pub offsets: Offsets,
    /// Square icon size in pixels
    pub icon_size: u16,
    /// Interactive tick period in milliseconds
    pub tick_period_ms: u32,
    /// Weather sync settings
    pub sync: SyncConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            background: SUNSHINE_BLUE,
            tap_palette: [SUNSHINE_BLUE, SUNSHINE_DARK_BLUE],
            text_color: Color::WHITE,
            text_sizes: TextSizes::default(),
            offsets: Offsets::default(),
            icon_size: 48,
            tick_period_ms: DEFAULT_PERIOD_MS,
            sync: SyncConfig::default(),
        }
    }
}

impl FaceConfig {
    /// Background color for a given tap count
    pub fn tap_background(&self, tap_count: u32) -> Color {
        self.tap_palette[(tap_count % 2) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::from_hex(0x03A9F4);
        assert_eq!(color, Color::rgb(0x03, 0xA9, 0xF4));
        assert_eq!(color.to_hex(), 0x03A9F4);
    }

    #[test]
    fn test_default_config() {
        let config = FaceConfig::default();
        assert_eq!(config.background, SUNSHINE_BLUE);
        assert_eq!(config.tick_period_ms, 1000);
        assert_eq!(config.sync.path.as_str(), "/weather");
        assert_eq!(config.sync.keys.high.as_str(), "hi");
    }

    #[test]
    fn test_tap_background_parity() {
        let config = FaceConfig::default();
        assert_eq!(config.tap_background(0), SUNSHINE_BLUE);
        assert_eq!(config.tap_background(1), SUNSHINE_DARK_BLUE);
        assert_eq!(config.tap_background(2), SUNSHINE_BLUE);
    }
}
