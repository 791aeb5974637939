/*
 *  icon/color.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Color filters applied to icon background and foreground paint
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

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Get luminance value (0-255) using Rec.601 weights
pub fn luminance(c: Rgb888) -> u8 {
    let l = 0.299 * c.r() as f32 + 0.587 * c.g() as f32 + 0.114 * c.b() as f32;
    l.round().clamp(0.0, 255.0) as u8
}

/// Per-pixel color transform, the paint-level filter of an icon
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorFilter {
    /// Replace every color with a fixed tint, keeping luminance as intensity
    Tint(Rgb888),

    /// Greyscale the color and fade it towards black by `alpha`
    Disabled { alpha: f32 },
}

impl ColorFilter {
    /// Filter used for disabled icons
    pub fn disabled(alpha: f32) -> Self {
        ColorFilter::Disabled { alpha: alpha.clamp(0.0, 1.0) }
    }

    pub fn apply(&self, c: Rgb888) -> Rgb888 {
        match self {
            ColorFilter::Tint(tint) => {
                let k = luminance(c) as u16;
                Rgb888::new(
                    ((tint.r() as u16 * k) / 255) as u8,
                    ((tint.g() as u16 * k) / 255) as u8,
                    ((tint.b() as u16 * k) / 255) as u8,
                )
            }
            ColorFilter::Disabled { alpha } => {
                let g = (luminance(c) as f32 * alpha).round() as u8;
                Rgb888::new(g, g, g)
            }
        }
    }
}

/// Apply an optional filter
#[inline]
pub fn filtered(filter: Option<&ColorFilter>, c: Rgb888) -> Rgb888 {
    match filter {
        Some(f) => f.apply(c),
        None => c,
    }
}
