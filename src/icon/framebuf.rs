/*
 *  icon/framebuf.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  In-memory canvas the demo and tests render icons into
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

use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::color::luminance;

/// Runtime-sized RGB canvas implementing `DrawTarget`.
#[derive(Debug, Clone, PartialEq)]
pub struct IconFrameBuf {
    buf: Vec<Rgb888>,
    w: usize,
    h: usize,
}

impl IconFrameBuf {
    pub fn new(width: u32, height: u32, fill: Rgb888) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[Rgb888] { &self.buf }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.idx(Point::new(x, y)).map(|i| self.buf[i])
    }

    /// Count pixels matching a predicate
    pub fn count_where<F: Fn(Rgb888) -> bool>(&self, pred: F) -> usize {
        self.buf.iter().filter(|c| pred(**c)).count()
    }

    /// Coarse text rendering, one character per pixel by luminance
    pub fn to_ascii(&self) -> String {
        const RAMP: &[u8] = b" .:-=+*#%@";
        let mut out = String::with_capacity((self.w + 1) * self.h);
        for row in self.buf.chunks(self.w.max(1)) {
            for c in row {
                let k = luminance(*c) as usize * (RAMP.len() - 1) / 255;
                out.push(RAMP[k] as char);
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl OriginDimensions for IconFrameBuf {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for IconFrameBuf {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        for p in area.points() {
            if let Some(i) = self.idx(p) {
                self.buf[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.buf.fill(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_draw_and_read_back() {
        let mut fb = IconFrameBuf::new(16, 8, Rgb888::BLACK);
        Line::new(Point::new(0, 0), Point::new(7, 7))
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::WHITE, 1))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.pixel(0, 0), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(7, 7), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(16, 0), None);
        assert_eq!(fb.count_where(|c| c == Rgb888::WHITE), 8);
    }

    #[test]
    fn test_fill_solid_clips_to_buffer() {
        let mut fb = IconFrameBuf::new(4, 4, Rgb888::BLACK);
        fb.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(10, 10)), Rgb888::RED)
            .unwrap();
        assert_eq!(fb.count_where(|c| c == Rgb888::RED), 4);
    }

    #[test]
    fn test_ascii_shape() {
        let mut fb = IconFrameBuf::new(3, 2, Rgb888::BLACK);
        fb.clear(Rgb888::WHITE).unwrap();
        assert_eq!(fb.to_ascii(), "@@@\n@@@\n");
    }
}
