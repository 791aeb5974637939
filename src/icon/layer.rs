/*
 *  icon/layer.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Level-driven foreground layers and the ordered layer stack
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

use core::f32::consts::TAU;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use super::color::{filtered, ColorFilter};

/// A hand rotated about the icon centre by its level.
///
/// Level `0` draws the hand at `rest_turns` (the pose baked into the art),
/// every `levels_per_turn` levels is one full clockwise revolution.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLayer {
    pub color: Rgb888,
    /// Length as a fraction of half the shorter icon edge
    pub length: f32,
    pub stroke_width: u32,
    pub levels_per_turn: i32,
    /// Resting angle in turns clockwise from twelve o'clock
    pub rest_turns: f32,
}

impl HandLayer {
    pub fn new(color: Rgb888, length: f32, stroke_width: u32, levels_per_turn: i32) -> Self {
        Self {
            color,
            length,
            stroke_width: stroke_width.max(1),
            levels_per_turn: levels_per_turn.max(1),
            rest_turns: 0.0,
        }
    }

    /// Set the pose the art is drawn in at level zero
    pub fn resting_at(mut self, turns: f32) -> Self {
        self.rest_turns = turns.rem_euclid(1.0);
        self
    }

    /// Hand angle for `level`, in turns in `[0, 1)`
    pub fn turns_at(&self, level: i32) -> f32 {
        let step = level.rem_euclid(self.levels_per_turn) as f32 / self.levels_per_turn as f32;
        (self.rest_turns + step).rem_euclid(1.0)
    }

    /// Tip of the hand for `level` inside `bounds`
    pub fn tip(&self, level: i32, bounds: Rectangle) -> Point {
        let c = bounds.center();
        let radius = bounds.size.width.min(bounds.size.height) as f32 / 2.0;
        let len = radius * self.length;
        let theta = self.turns_at(level) * TAU;
        // screen y grows downward, twelve o'clock is -y
        Point::new(
            c.x + (theta.sin() * len).round() as i32,
            c.y - (theta.cos() * len).round() as i32,
        )
    }

    fn draw<D>(&self, target: &mut D, level: i32, bounds: Rectangle, filter: Option<&ColorFilter>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let style = PrimitiveStyle::with_stroke(filtered(filter, self.color), self.stroke_width);
        Line::new(bounds.center(), self.tip(level, bounds))
            .into_styled(style)
            .draw(target)
    }
}

/// Static dial with twelve hour ticks, ignores level changes.
#[derive(Debug, Clone, PartialEq)]
pub struct DialLayer {
    pub color: Rgb888,
    /// Outer radius of the ticks as a fraction of half the shorter edge
    pub radius: f32,
    /// Tick length as a fraction of the outer radius
    pub tick: f32,
}

impl DialLayer {
    pub fn new(color: Rgb888, radius: f32, tick: f32) -> Self {
        Self { color, radius, tick }
    }

    fn draw<D>(&self, target: &mut D, bounds: Rectangle, filter: Option<&ColorFilter>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let c = bounds.center();
        let outer = bounds.size.width.min(bounds.size.height) as f32 / 2.0 * self.radius;
        let inner = outer * (1.0 - self.tick);
        let style = PrimitiveStyle::with_stroke(filtered(filter, self.color), 1);
        for h in 0..12 {
            let theta = h as f32 / 12.0 * TAU;
            let (s, co) = theta.sin_cos();
            let p0 = Point::new(c.x + (s * inner).round() as i32, c.y - (co * inner).round() as i32);
            let p1 = Point::new(c.x + (s * outer).round() as i32, c.y - (co * outer).round() as i32);
            Line::new(p0, p1).into_styled(style).draw(target)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Hand(HandLayer),
    Dial(DialLayer),
}

/// One drawable layer with its current level
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    level: i32,
    kind: LayerKind,
}

impl Layer {
    pub fn hand(hand: HandLayer) -> Self {
        Self { level: 0, kind: LayerKind::Hand(hand) }
    }

    pub fn dial(dial: DialLayer) -> Self {
        Self { level: 0, kind: LayerKind::Dial(dial) }
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    /// Store a new level; returns true only if the visible state changed
    pub fn set_level(&mut self, level: i32) -> bool {
        if self.level == level {
            return false;
        }
        self.level = level;
        self.reacts_to_level()
    }

    fn reacts_to_level(&self) -> bool {
        matches!(self.kind, LayerKind::Hand(_))
    }

    pub fn color(&self) -> Rgb888 {
        match &self.kind {
            LayerKind::Hand(h) => h.color,
            LayerKind::Dial(d) => d.color,
        }
    }

    pub fn draw<D>(&self, target: &mut D, bounds: Rectangle, filter: Option<&ColorFilter>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        match &self.kind {
            LayerKind::Hand(h) => h.draw(target, self.level, bounds, filter),
            LayerKind::Dial(d) => d.draw(target, bounds, filter),
        }
    }
}

/// Ordered layers composited bottom to top. Slots can be emptied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayerStack {
    slots: Vec<Option<Layer>>,
}

impl LayerStack {
    pub fn new(layers: Vec<Layer>) -> Self {
        Self { slots: layers.into_iter().map(Some).collect() }
    }

    /// Number of slots, including emptied ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Empty a slot, keeping the indices of the layers above it
    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.slots.iter().flatten()
    }

    /// Color of the bottom-most layer
    pub fn dominant_color(&self) -> Option<Rgb888> {
        self.iter().next().map(Layer::color)
    }

    pub fn draw<D>(&self, target: &mut D, bounds: Rectangle, filter: Option<&ColorFilter>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        for layer in self.iter() {
            layer.draw(target, bounds, filter)?;
        }
        Ok(())
    }
}
