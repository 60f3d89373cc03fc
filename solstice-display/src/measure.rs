//! Text measurement with the embedded-graphics mono fonts

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_7X13, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::Point;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;
use solstice_core::layout::Paint;
use solstice_core::traits::TextMeasure;

/// Pick the largest mono font no taller than the paint size
///
/// Sizes below the smallest font still get the smallest font.
pub fn font_for(size: f32) -> &'static MonoFont<'static> {
    if size >= 20.0 {
        &FONT_10X20
    } else if size >= 15.0 {
        &FONT_9X15
    } else if size >= 13.0 {
        &FONT_7X13
    } else {
        &FONT_6X10
    }
}

/// Text measurement matching what `Painter` draws
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoMeasure;

impl TextMeasure for MonoMeasure {
    fn text_width(&self, text: &str, paint: &Paint) -> f32 {
        let style = MonoTextStyle::new(font_for(paint.size), Rgb888::WHITE);
        let metrics = style.measure_string(text, Point::zero(), Baseline::Alphabetic);
        metrics.bounding_box.size.width as f32
    }
}
