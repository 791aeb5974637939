/*
 *  host/mock.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Recording host for driving renderers without a UI
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

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{IconHost, TickId};

/// Mock host for testing
///
/// Records every schedule, unschedule and invalidate call. Clones share
/// state, so a test keeps one handle and gives the other to a renderer.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    state: Rc<RefCell<MockHostState>>,
}

/// Internal state for the mock host (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockHostState {
    /// Pending ticks and their absolute wake time
    pub pending: HashMap<TickId, u64>,

    /// Number of times schedule_at() was called
    pub schedule_count: usize,

    /// Number of times unschedule() was called
    pub unschedule_count: usize,

    /// Every invalidate() call, in order
    pub invalidations: Vec<TickId>,

    /// Most recent wake time requested
    pub last_scheduled_at: Option<u64>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get shared state for inspection
    pub fn state(&self) -> Rc<RefCell<MockHostState>> {
        Rc::clone(&self.state)
    }

    pub fn pending_at(&self, tick: TickId) -> Option<u64> {
        self.state.borrow().pending.get(&tick).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn invalidation_count(&self) -> usize {
        self.state.borrow().invalidations.len()
    }

    /// Remove and return ticks due at or before `uptime_ms`, earliest first
    pub fn take_due(&self, uptime_ms: u64) -> Vec<TickId> {
        let mut state = self.state.borrow_mut();
        let mut due: Vec<(u64, TickId)> = state
            .pending
            .iter()
            .filter(|(_, at)| **at <= uptime_ms)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            state.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl IconHost for MockHost {
    fn schedule_at(&self, tick: TickId, at_ms: u64) {
        let mut state = self.state.borrow_mut();
        state.pending.insert(tick, at_ms);
        state.schedule_count += 1;
        state.last_scheduled_at = Some(at_ms);
    }

    fn unschedule(&self, tick: TickId) {
        let mut state = self.state.borrow_mut();
        state.pending.remove(&tick);
        state.unschedule_count += 1;
    }

    fn invalidate(&self, tick: TickId) {
        self.state.borrow_mut().invalidations.push(tick);
    }
}
