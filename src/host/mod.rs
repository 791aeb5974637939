/*
 *  host/mod.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Capabilities a renderer needs from whatever hosts it
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

pub mod event_loop;
pub mod mock;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use event_loop::{LoopHandle, TickLoop};
pub use mock::{MockHost, MockHostState};

/// Identity of one renderer's tick callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(u64);

static NEXT_TICK_ID: AtomicU64 = AtomicU64::new(1);

impl TickId {
    /// Allocate a fresh, process-unique id
    pub fn next() -> Self {
        TickId(NEXT_TICK_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Timer and invalidation services of the hosting view.
///
/// All calls happen on the one cooperative UI thread, so implementations
/// take `&self` and keep their state in a `RefCell`.
pub trait IconHost {
    /// Fire `tick` at absolute uptime `at_ms`, replacing any earlier request for it
    fn schedule_at(&self, tick: TickId, at_ms: u64);

    /// Cancel `tick`; a no-op when nothing is pending
    fn unschedule(&self, tick: TickId);

    /// Ask for a redraw of the renderer owning `tick` at the next frame
    fn invalidate(&self, tick: TickId);
}
