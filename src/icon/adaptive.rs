/*
 *  icon/adaptive.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Adaptive icon template: background, layered foreground, mask
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::color::{filtered, ColorFilter};
use super::layer::LayerStack;
use super::mask::IconMask;

/// Decoded row-major bitmap
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl Bitmap {
    /// Returns None if `pixels` does not hold exactly `width * height` entries
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb888>) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?;
        if expected == 0 || pixels.len() != expected {
            return None;
        }
        Some(Self { width, height, pixels })
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Nearest-neighbour sample for normalised coordinates in `[0, 1)`
    fn sample(&self, u: f32, v: f32) -> Rgb888 {
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Background layer of an icon, stretched to the draw bounds
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Rgb888),
    Bitmap(Bitmap),
}

impl Background {
    pub fn draw<D>(&self, target: &mut D, bounds: Rectangle, filter: Option<&ColorFilter>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        if bounds.is_zero_sized() {
            return Ok(());
        }
        match self {
            Background::Solid(c) => target.fill_solid(&bounds, filtered(filter, *c)),
            Background::Bitmap(bmp) => {
                let (w, h) = (bounds.size.width, bounds.size.height);
                let colors = (0..h).flat_map(move |y| {
                    (0..w).map(move |x| {
                        let c = bmp.sample(x as f32 / w as f32, y as f32 / h as f32);
                        filtered(filter, c)
                    })
                });
                target.fill_contiguous(&bounds, colors)
            }
        }
    }
}

/// Immutable template of a layered icon.
///
/// Renderers share one template through `Rc` and clone the foreground
/// they animate.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveIcon {
    pub background: Background,
    pub foreground: LayerStack,
    /// Single-color layer set used for themed icons, if the art ships one
    pub monochrome: Option<LayerStack>,
    pub mask: IconMask,
}

impl AdaptiveIcon {
    pub fn new(background: Background, foreground: LayerStack, mask: IconMask) -> Self {
        Self { background, foreground, monochrome: None, mask }
    }

    pub fn with_monochrome(mut self, monochrome: LayerStack) -> Self {
        self.monochrome = Some(monochrome);
        self
    }
}

/// What a template provider hands over
#[derive(Debug, Clone, PartialEq)]
pub enum IconSource {
    /// Layered icon, can be animated
    Adaptive(AdaptiveIcon),

    /// Single flattened bitmap, nothing to animate
    Flat(Background),
}
