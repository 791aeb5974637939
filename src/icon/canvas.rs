/*
 *  icon/canvas.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Draw-target adapter: translate, scale about the centre, clip to the icon mask
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

use super::mask::IconMask;

/// Wraps a parent target so that layers can draw in icon-local space.
///
/// Local `(0,0)..size` maps onto `bounds` of the parent, shrunk by `scale`
/// about the bounds centre. Pixels outside the mask (tested in local
/// space, so the mask shrinks with the art) are dropped.
pub struct ClippedCanvas<'a, D> {
    target: &'a mut D,
    origin: Point,
    size: Size,
    scale: f32,
    mask: IconMask,
}

impl<'a, D> ClippedCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    pub fn new(target: &'a mut D, bounds: Rectangle, scale: f32, mask: IconMask) -> Self {
        Self {
            target,
            origin: bounds.top_left,
            size: bounds.size,
            scale,
            mask,
        }
    }

    /// Local bounds layers should draw into
    pub fn local_bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size)
    }
}

/// Map a local pixel into parent space
#[inline]
fn project(p: Point, origin: Point, size: Size, scale: f32) -> Point {
    let cx = size.width as f32 / 2.0;
    let cy = size.height as f32 / 2.0;
    let x = cx + (p.x as f32 + 0.5 - cx) * scale;
    let y = cy + (p.y as f32 + 0.5 - cy) * scale;
    Point::new(origin.x + x.floor() as i32, origin.y + y.floor() as i32)
}

impl<D> OriginDimensions for ClippedCanvas<'_, D> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<D> DrawTarget for ClippedCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb888>,
{
    type Color = Rgb888;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (origin, size, scale, mask) = (self.origin, self.size, self.scale, self.mask);
        self.target.draw_iter(pixels.into_iter().filter_map(move |Pixel(p, c)| {
            mask.contains(p, size)
                .then(|| Pixel(project(p, origin, size, scale), c))
        }))
    }
}
