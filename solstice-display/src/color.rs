//! Color conversion

use embedded_graphics::pixelcolor::Rgb888;
use solstice_core::config::Color;

/// Convert a face color to a pixel color
pub fn to_rgb(color: Color) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Reduce a color to one bit per channel
///
/// Used for text drawn without anti-aliasing on low-bit ambient screens.
pub fn quantize(color: Color) -> Color {
    let bit = |c: u8| if c >= 0x80 { 0xFF } else { 0x00 };
    Color::rgb(bit(color.r), bit(color.g), bit(color.b))
}
