/*
 *  sample.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Built-in clock face used by the demo and the tests
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

use crate::clock::ClockMetadata;
use crate::constants::{HOUR_LEVELS_PER_TURN, MINUTE_LEVELS_PER_TURN, SECOND_LEVELS_PER_TURN};
use crate::icon::{AdaptiveIcon, Background, Bitmap, DialLayer, HandLayer, IconMask, IconSource, Layer, LayerStack};

pub const DIAL_LAYER: usize = 0;
pub const HOUR_LAYER: usize = 1;
pub const MINUTE_LAYER: usize = 2;
pub const SECOND_LAYER: usize = 3;

const FACE: Rgb888 = Rgb888::new(0xf4, 0xf1, 0xe8);
const INK: Rgb888 = Rgb888::new(0x20, 0x24, 0x2c);
const SECOND_RED: Rgb888 = Rgb888::new(0xd0, 0x30, 0x28);

/// Metadata matching `clock_icon`: the art rests at 10:10:00
pub fn clock_metadata() -> ClockMetadata {
    ClockMetadata {
        hour_layer_index: HOUR_LAYER as i32,
        minute_layer_index: MINUTE_LAYER as i32,
        second_layer_index: SECOND_LAYER as i32,
        default_hour: 10,
        default_minute: 10,
        default_second: 0,
    }
}

// level 0 on each hand is the 10:10:00 pose
fn hands(hour: Rgb888, minute: Rgb888, second: Rgb888) -> [Layer; 3] {
    [
        Layer::hand(HandLayer::new(hour, 0.5, 3, HOUR_LEVELS_PER_TURN).resting_at(10.0 / 12.0)),
        Layer::hand(HandLayer::new(minute, 0.78, 2, MINUTE_LEVELS_PER_TURN).resting_at(10.0 / 60.0)),
        Layer::hand(HandLayer::new(second, 0.85, 1, SECOND_LEVELS_PER_TURN)),
    ]
}

fn face_background() -> Background {
    // soft vertical shade, light at the top
    const EDGE: u32 = 8;
    let pixels = (0..EDGE * EDGE)
        .map(|i| {
            let shade = (i / EDGE) as u8 * 4;
            Rgb888::new(FACE.r() - shade, FACE.g() - shade, FACE.b() - shade)
        })
        .collect();
    Bitmap::new(EDGE, EDGE, pixels)
        .map(Background::Bitmap)
        .unwrap_or(Background::Solid(FACE))
}

/// Layered clock face: dial, hour, minute and second hands
pub fn clock_icon() -> IconSource {
    let [hour, minute, second] = hands(INK, INK, SECOND_RED);
    let foreground = LayerStack::new(vec![
        Layer::dial(DialLayer::new(INK, 0.92, 0.18)),
        hour,
        minute,
        second,
    ]);

    let [mono_hour, mono_minute, mono_second] = hands(Rgb888::WHITE, Rgb888::WHITE, Rgb888::WHITE);
    let monochrome = LayerStack::new(vec![
        Layer::dial(DialLayer::new(Rgb888::WHITE, 0.92, 0.18)),
        mono_hour,
        mono_minute,
        mono_second,
    ]);

    IconSource::Adaptive(
        AdaptiveIcon::new(face_background(), foreground, IconMask::Circle).with_monochrome(monochrome),
    )
}

/// Legacy single-bitmap icon, cannot be animated
pub fn flat_icon() -> IconSource {
    IconSource::Flat(Background::Solid(FACE))
}

/// Background tint and foreground color for the themed demo
pub fn theme() -> (Rgb888, Rgb888) {
    (Rgb888::new(0x1c, 0x3a, 0x5e), Rgb888::new(0xa8, 0xc8, 0xf0))
}
