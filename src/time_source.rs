/*
 *  time_source.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Wall-clock and uptime sources consumed by the clock renderer
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

use chrono::{Local, NaiveTime};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of the two clocks a renderer needs.
///
/// Levels are computed from local civil time, tick scheduling runs on a
/// monotonic uptime in milliseconds. Keeping both behind one trait lets
/// tests drive the renderer with a fake clock.
pub trait TimeSource {
    /// Current local time of day
    fn local_time(&self) -> NaiveTime;

    /// Monotonic milliseconds since an arbitrary origin
    fn uptime_ms(&self) -> u64;
}

/// System clock: `chrono::Local` for civil time, `Instant` for uptime.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn local_time(&self) -> NaiveTime {
        Local::now().time()
    }

    fn uptime_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and give another to the renderer.
#[derive(Debug, Clone)]
pub struct ManualClock {
    local: Rc<Cell<NaiveTime>>,
    uptime: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(local: NaiveTime, uptime_ms: u64) -> Self {
        Self {
            local: Rc::new(Cell::new(local)),
            uptime: Rc::new(Cell::new(uptime_ms)),
        }
    }

    /// Convenience constructor from h:m:s; out-of-range values fall back to midnight
    pub fn at_hms(hour: u32, minute: u32, second: u32) -> Self {
        let local = NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN);
        Self::new(local, 0)
    }

    pub fn set_local_time(&self, time: NaiveTime) {
        self.local.set(time);
    }

    pub fn set_uptime_ms(&self, uptime_ms: u64) {
        self.uptime.set(uptime_ms);
    }

    /// Move both clocks forward together
    pub fn advance(&self, by: Duration) {
        let (time, _) = self
            .local
            .get()
            .overflowing_add_signed(chrono::TimeDelta::milliseconds(by.as_millis() as i64));
        self.local.set(time);
        self.uptime.set(self.uptime.get() + by.as_millis() as u64);
    }
}

impl TimeSource for ManualClock {
    fn local_time(&self) -> NaiveTime {
        self.local.get()
    }

    fn uptime_ms(&self) -> u64 {
        self.uptime.get()
    }
}
