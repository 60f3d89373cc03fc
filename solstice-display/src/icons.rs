//! Weather art drawn from primitives
//!
//! The atlas has no bitmaps to decode: each art is described by a handful of
//! shapes scaled to the requested square, so any size up to `MAX_ICON_SIZE`
//! loads without loss.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use solstice_core::traits::{IconError, IconSource, ImageHandle};
use solstice_core::weather::ConditionArt;

/// Largest icon the atlas will produce
pub const MAX_ICON_SIZE: u16 = 256;

const SUN: Rgb888 = Rgb888::new(0xFF, 0xC1, 0x07);
const CLOUD: Rgb888 = Rgb888::new(0xEC, 0xEF, 0xF1);
const DARK_CLOUD: Rgb888 = Rgb888::new(0x90, 0xA4, 0xAE);
const WATER: Rgb888 = Rgb888::new(0x81, 0xD4, 0xFA);
const BOLT: Rgb888 = Rgb888::new(0xFF, 0xEB, 0x3B);

/// Icon source backed by procedural art
#[derive(Debug, Clone)]
pub struct IconAtlas {
    available: [bool; ConditionArt::ALL.len()],
    loads: u32,
}

impl Default for IconAtlas {
    fn default() -> Self {
        Self::new()
    }
}

impl IconAtlas {
    /// Atlas with every art available
    pub fn new() -> Self {
        Self {
            available: [true; ConditionArt::ALL.len()],
            loads: 0,
        }
    }

    /// Remove an art, so loading it fails with `IconError::Missing`
    pub fn without(mut self, art: ConditionArt) -> Self {
        self.available[index(art)] = false;
        self
    }

    /// Successful loads so far
    pub fn loads(&self) -> u32 {
        self.loads
    }
}

impl IconSource for IconAtlas {
    fn load(&mut self, art: ConditionArt, size: u16) -> Result<ImageHandle, IconError> {
        if !self.available[index(art)] {
            return Err(IconError::Missing);
        }
        if size == 0 || size > MAX_ICON_SIZE {
            return Err(IconError::Scale);
        }

        self.loads += 1;
        Ok(ImageHandle {
            art,
            width: size,
            height: size,
        })
    }
}

fn index(art: ConditionArt) -> usize {
    ConditionArt::ALL
        .iter()
        .position(|a| *a == art)
        .unwrap_or_default()
}

/// Draw an image's art with its top-left corner at `top_left`
pub fn draw_art<D>(target: &mut D, image: &ImageHandle, top_left: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let s = image.width.min(image.height) as i32;
    // Point at fraction (x/8, y/8) of the icon square
    let at = |x: i32, y: i32| top_left + Point::new(s * x / 8, s * y / 8);
    let len = |n: i32| (s * n / 8).max(1) as u32;

    match image.art {
        ConditionArt::Clear => sun(target, at(4, 4), len(5)),
        ConditionArt::LightClouds => {
            sun(target, at(5, 3), len(4))?;
            cloud(target, at, len, CLOUD)
        }
        ConditionArt::Clouds => {
            cloud(target, |x, y| at(x, y - 1), len, DARK_CLOUD)?;
            cloud(target, at, len, CLOUD)
        }
        ConditionArt::LightRain => {
            cloud(target, |x, y| at(x, y - 2), len, CLOUD)?;
            drops(target, &[2, 5], at, len)
        }
        ConditionArt::Rain => {
            cloud(target, |x, y| at(x, y - 2), len, DARK_CLOUD)?;
            drops(target, &[1, 3, 5, 7], at, len)
        }
        ConditionArt::Snow => {
            cloud(target, |x, y| at(x, y - 2), len, CLOUD)?;
            for x in [2, 4, 6] {
                Circle::with_center(at(x, 7), len(1))
                    .into_styled(PrimitiveStyle::with_fill(CLOUD))
                    .draw(target)?;
            }
            Ok(())
        }
        ConditionArt::Fog => {
            let style = PrimitiveStyle::with_stroke(CLOUD, len(1) / 2 + 1);
            for y in [3, 5, 7] {
                Line::new(at(1, y), at(7, y)).into_styled(style).draw(target)?;
            }
            Ok(())
        }
        ConditionArt::Storm => {
            cloud(target, |x, y| at(x, y - 2), len, DARK_CLOUD)?;
            Triangle::new(at(5, 5), at(3, 7), at(4, 6))
                .into_styled(PrimitiveStyle::with_fill(BOLT))
                .draw(target)?;
            Triangle::new(at(4, 6), at(5, 6), at(3, 8))
                .into_styled(PrimitiveStyle::with_fill(BOLT))
                .draw(target)
        }
    }
}

fn sun<D>(target: &mut D, center: Point, diameter: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(center, diameter)
        .into_styled(PrimitiveStyle::with_fill(SUN))
        .draw(target)
}

fn cloud<D, A, L>(target: &mut D, at: A, len: L, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    A: Fn(i32, i32) -> Point,
    L: Fn(i32) -> u32,
{
    let style = PrimitiveStyle::with_fill(color);
    Circle::with_center(at(3, 5), len(3)).into_styled(style).draw(target)?;
    Circle::with_center(at(5, 5), len(4)).into_styled(style).draw(target)?;
    Rectangle::new(at(2, 5), Size::new(len(5), len(2)))
        .into_styled(style)
        .draw(target)
}

fn drops<D, A, L>(target: &mut D, columns: &[i32], at: A, len: L) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    A: Fn(i32, i32) -> Point,
    L: Fn(i32) -> u32,
{
    let style = PrimitiveStyle::with_stroke(WATER, len(1) / 2 + 1);
    for x in columns {
        Line::new(at(*x, 6), at(*x - 1, 8)).into_styled(style).draw(target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FrameBuffer;

    #[test]
    fn test_load_scales_to_square() {
        let mut atlas = IconAtlas::new();
        let image = atlas.load(ConditionArt::Rain, 48).unwrap();

        assert_eq!((image.width, image.height), (48, 48));
        assert_eq!(atlas.loads(), 1);
    }

    #[test]
    fn test_missing_art() {
        let mut atlas = IconAtlas::new().without(ConditionArt::Fog);

        assert_eq!(atlas.load(ConditionArt::Fog, 48), Err(IconError::Missing));
        assert!(atlas.load(ConditionArt::Clear, 48).is_ok());
    }

    #[test]
    fn test_invalid_sizes() {
        let mut atlas = IconAtlas::new();

        assert_eq!(atlas.load(ConditionArt::Clear, 0), Err(IconError::Scale));
        assert_eq!(
            atlas.load(ConditionArt::Clear, MAX_ICON_SIZE + 1),
            Err(IconError::Scale)
        );
        assert_eq!(atlas.loads(), 0);
    }

    #[test]
    fn test_art_uses_default_condition_table() {
        let atlas = IconAtlas::new();
        assert_eq!(atlas.art_for(511), Some(ConditionArt::Snow));
        assert_eq!(atlas.art_for(999), None);
    }

    #[test]
    fn test_every_art_draws_inside_its_square() {
        for art in ConditionArt::ALL {
            let mut fb = FrameBuffer::new(64, 64);
            let image = ImageHandle {
                art,
                width: 32,
                height: 32,
            };
            draw_art(&mut fb, &image, Point::new(16, 16)).unwrap();

            let lit = fb.count_where(|c| c != Rgb888::BLACK);
            assert!(lit > 0, "{:?} drew nothing", art);
            assert_eq!(fb.pixel(0, 0), Some(Rgb888::BLACK));
        }
    }
}
