//! Draw-list executor

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::{Baseline, Text};
use solstice_core::layout::{DrawOp, Frame, Paint};
use solstice_core::traits::{RenderError, RenderSink, Size as CanvasSize};

use crate::color::{quantize, to_rgb};
use crate::icons::draw_art;
use crate::measure::font_for;

/// Renders frames onto a draw target
///
/// Drawing is clipped to the canvas size given with each frame.
pub struct Painter<D> {
    target: D,
}

impl<D> Painter<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw(&mut self, frame: &Frame, canvas: CanvasSize) -> Result<(), D::Error> {
        let area = Rectangle::new(Point::zero(), Size::new(canvas.width, canvas.height));
        let mut target = self.target.clipped(&area);

        for op in frame.ops() {
            match op {
                DrawOp::Fill(color) => target.clear(to_rgb(*color))?,
                DrawOp::Text {
                    text, x, y, paint, ..
                } => {
                    let style = MonoTextStyle::new(font_for(paint.size), text_color(paint));
                    Text::with_baseline(text, Point::new(px(*x), px(*y)), style, Baseline::Alphabetic)
                        .draw(&mut target)?;
                }
                DrawOp::Image { image, x, y } => {
                    draw_art(&mut target, image, Point::new(px(*x), px(*y)))?;
                }
            }
        }
        Ok(())
    }
}

impl<D> RenderSink for Painter<D>
where
    D: DrawTarget<Color = Rgb888>,
{
    fn render(&mut self, frame: &Frame, size: CanvasSize) -> Result<(), RenderError> {
        self.draw(frame, size).map_err(|_| RenderError::DrawFailed)
    }
}

fn text_color(paint: &Paint) -> Rgb888 {
    if paint.anti_alias {
        to_rgb(paint.color)
    } else {
        to_rgb(quantize(paint.color))
    }
}

/// Round to the nearest pixel
fn px(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}
