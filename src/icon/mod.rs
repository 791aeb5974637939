/*
 *  icon/mod.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawable model for layered icons
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

pub mod adaptive;
pub mod canvas;
pub mod color;
pub mod framebuf;
pub mod layer;
pub mod mask;

pub use adaptive::{AdaptiveIcon, Background, Bitmap, IconSource};
pub use canvas::ClippedCanvas;
pub use color::ColorFilter;
pub use framebuf::IconFrameBuf;
pub use layer::{DialLayer, HandLayer, Layer, LayerKind, LayerStack};
pub use mask::IconMask;
