//! Frame composition

use heapless::String;

use super::frame::{DrawOp, Frame, TextRole, TEXT_OP_LEN};
use super::paint::{Paint, Paints};
use crate::config::{Color, FaceConfig};
use crate::state::DisplayState;
use crate::time::TimeSnapshot;
use crate::traits::{Size, TextMeasure};
use crate::weather::WeatherSnapshot;

/// Everything a frame is derived from
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub time: &'a TimeSnapshot,
    pub weather: Option<&'a WeatherSnapshot>,
    pub display: &'a DisplayState,
    pub paints: &'a Paints,
    /// Interactive background
    pub background: Color,
    pub config: &'a FaceConfig,
    pub canvas: Size,
}

/// Left offset that centers `width` in `container`
///
/// Negative when the content is wider than the container.
pub fn center_offset(container: f32, width: f32) -> f32 {
    (container - width) / 2.0
}

/// Compose the draw list for a scene
pub fn compose<M: TextMeasure + ?Sized>(scene: &Scene<'_>, measure: &M) -> Frame {
    let mut frame = Frame::new();
    let canvas_width = scene.canvas.width as f32;
    let ambient = scene.display.ambient;
    let offsets = &scene.config.offsets;

    frame.push(DrawOp::Fill(if ambient {
        Color::BLACK
    } else {
        scene.background
    }));

    let mut text = |role, content: &str, y, paint: Paint| {
        let x = center_offset(canvas_width, measure.text_width(content, &paint));
        frame.push(DrawOp::Text {
            role,
            text: op_text(content),
            x,
            y,
            paint,
        });
    };

    text(
        TextRole::Time,
        scene.time.time_text().as_str(),
        offsets.time_y,
        scene.paints.time,
    );
    text(
        TextRole::Date,
        scene.time.date_text().as_str(),
        offsets.date_y,
        scene.paints.date,
    );

    if !ambient {
        if let Some(weather) = scene.weather.filter(|w| w.has_temperatures()) {
            text(
                TextRole::Temperature,
                weather.temperature_text().as_str(),
                offsets.weather_y,
                scene.paints.temperature,
            );

            if let Some(image) = weather.icon {
                frame.push(DrawOp::Image {
                    image,
                    x: center_offset(canvas_width, scene.config.icon_size as f32),
                    y: offsets.art_y,
                });
            }
        }
    }

    frame
}

fn op_text(content: &str) -> String<TEXT_OP_LEN> {
    let mut s = String::new();
    // Time, date and temperature lines are bounded well below the capacity
    let _ = s.push_str(content);
    s
}
