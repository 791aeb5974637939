/*
 *  icon/mask.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Icon mask shapes used to clip the foreground
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, ContainsPoint, Rectangle, RoundedRectangle};
use serde::{Deserialize, Serialize};

/// Shape the launcher clips adaptive icons to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconMask {
    /// Full circle inscribed in the icon bounds
    #[default]
    Circle,

    /// Square with rounded corners, radius is a quarter of the edge
    Rounded,

    /// Plain square (no clipping beyond the bounds)
    Square,
}

impl IconMask {
    /// Whether `p`, in icon-local coordinates, lies inside the mask for an icon of `size`
    pub fn contains(&self, p: Point, size: Size) -> bool {
        let bounds = Rectangle::new(Point::zero(), size);
        match self {
            IconMask::Circle => {
                let diameter = size.width.min(size.height);
                Circle::with_center(bounds.center(), diameter).contains(p)
            }
            IconMask::Rounded => {
                let r = size.width.min(size.height) / 4;
                RoundedRectangle::with_equal_corners(bounds, Size::new(r, r)).contains(p)
            }
            IconMask::Square => bounds.contains(p),
        }
    }
}
