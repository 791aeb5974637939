/*
 *  clock/schedule.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Tick cadence and grid-aligned wake-up times
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

use crate::constants::{TICK_MS_MINUTES, TICK_MS_SECONDS};

/// How often a clock icon checks whether it needs a redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCadence {
    tick_ms: u64,
}

impl TickCadence {
    /// Minute cadence without a second hand, 200ms with one
    pub fn for_seconds_hand(seconds_hand: bool) -> Self {
        let tick_ms = if seconds_hand { TICK_MS_SECONDS } else { TICK_MS_MINUTES };
        Self { tick_ms }
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Next wake-up after `uptime_ms` on this cadence's grid
    pub fn next_after(&self, uptime_ms: u64) -> u64 {
        next_tick_at(uptime_ms, self.tick_ms)
    }
}

impl Default for TickCadence {
    fn default() -> Self {
        Self::for_seconds_hand(false)
    }
}

/// First multiple of `tick_ms` strictly after `uptime_ms`.
///
/// Aligning to the global grid rather than `now + tick` keeps every
/// clock on screen ticking together. A zero `tick_ms` is treated as 1.
pub fn next_tick_at(uptime_ms: u64, tick_ms: u64) -> u64 {
    let step = tick_ms.max(1);
    uptime_ms - (uptime_ms % step) + step
}
