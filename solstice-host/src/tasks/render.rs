//! Render task
//!
//! Waits for `REDRAW`, draws the pending frame into the simulator's frame
//! buffer and logs what the face would show.

use std::fmt::Write;

use embassy_time::Instant;
use log::{debug, info, trace, warn};

use solstice_core::config::Color;
use solstice_core::layout::{DrawOp, Frame, TextRole};
use solstice_core::traits::Size;
use solstice_display::{to_rgb, FrameBuffer, MonoMeasure, Painter};

use crate::channels::REDRAW;
use crate::tasks::HostCoordinator;

#[embassy_executor::task]
pub async fn render_task(
    coordinator: &'static HostCoordinator,
    mut painter: Painter<FrameBuffer>,
    canvas: Size,
) {
    info!("Render task started ({}x{})", canvas.width, canvas.height);

    loop {
        REDRAW.wait().await;

        let start = Instant::now();
        match coordinator.render(&mut painter, &MonoMeasure, canvas) {
            Ok(Some(frame)) => {
                let lit = lit_pixels(painter.target(), frame.background());
                info!("Frame: {}", describe(&frame));
                debug!(
                    "Frame drawn in {}us ({} ops, {} px off background)",
                    start.elapsed().as_micros(),
                    frame.len(),
                    lit
                );
            }
            Ok(None) => trace!("Redraw already taken"),
            Err(e) => warn!("Render failed: {:?}", e),
        }
    }
}

/// One-line summary of a frame
pub fn describe(frame: &Frame) -> String {
    let mut line = String::new();

    if let Some(bg) = frame.background() {
        let _ = write!(line, "[#{:06X}]", bg.to_hex());
    }
    for role in [TextRole::Time, TextRole::Date, TextRole::Temperature] {
        if let Some(text) = frame.text_of(role) {
            let _ = write!(line, " {}", text);
        }
    }
    if let Some(DrawOp::Image { image, .. }) = frame.image() {
        let _ = write!(line, " <{} {}px>", image.art.name(), image.width);
    }

    if line.is_empty() {
        line.push_str("(empty)");
    }
    line
}

fn lit_pixels(buffer: &FrameBuffer, background: Option<Color>) -> usize {
    let bg = background.map(to_rgb);
    buffer.count_where(|px| Some(px) != bg)
}
