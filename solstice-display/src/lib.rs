//! Rendering for the Solstice face on embedded-graphics
//!
//! This crate provides:
//! - `Painter`, a `RenderSink` that executes draw lists on any `DrawTarget`
//! - `MonoMeasure`, text measurement with the built-in mono fonts
//! - `IconAtlas`, an `IconSource` whose art is drawn from primitives
//! - `FrameBuffer`, an in-memory RGB draw target
//! - `RecordingSink`, a sink that keeps every frame it is given
//!
//! # Architecture
//!
//! The engine composes a `Frame` without knowing how it will be drawn.
//! A desktop simulator renders into a `FrameBuffer`; a device would hand
//! `Painter` its display driver instead.

#![no_std]

extern crate alloc;

pub mod color;
pub mod framebuffer;
pub mod icons;
pub mod measure;
pub mod painter;
pub mod recording;

pub use color::{quantize, to_rgb};
pub use framebuffer::FrameBuffer;
pub use icons::{draw_art, IconAtlas, MAX_ICON_SIZE};
pub use measure::{font_for, MonoMeasure};
pub use painter::Painter;
pub use recording::RecordingSink;
