/*
 *  host/event_loop.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Timer loop that hosts clock renderers and paints their frames
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
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, info, trace};

use super::{IconHost, TickId};
use crate::clock::ClockIconRenderer;
use crate::icon::IconFrameBuf;
use crate::time_source::TimeSource;

#[derive(Debug, Default)]
struct LoopState {
    timers: HashMap<TickId, u64>,
    dirty: Vec<TickId>,
}

/// Host handle given to renderers. Clones share the same timer table.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    state: Rc<RefCell<LoopState>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Earliest pending wake time
    pub fn next_due(&self) -> Option<u64> {
        self.state.borrow().timers.values().min().copied()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    fn take_due(&self, uptime_ms: u64) -> Vec<TickId> {
        let mut state = self.state.borrow_mut();
        let mut due: Vec<(u64, TickId)> = state
            .timers
            .iter()
            .filter(|(_, at)| **at <= uptime_ms)
            .map(|(id, at)| (*at, *id))
            .collect();
        due.sort();
        for (_, id) in &due {
            state.timers.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    fn take_dirty(&self) -> Vec<TickId> {
        std::mem::take(&mut self.state.borrow_mut().dirty)
    }
}

impl IconHost for LoopHandle {
    fn schedule_at(&self, tick: TickId, at_ms: u64) {
        trace!("{} scheduled at {}ms", tick, at_ms);
        self.state.borrow_mut().timers.insert(tick, at_ms);
    }

    fn unschedule(&self, tick: TickId) {
        self.state.borrow_mut().timers.remove(&tick);
    }

    fn invalidate(&self, tick: TickId) {
        let mut state = self.state.borrow_mut();
        if !state.dirty.contains(&tick) {
            state.dirty.push(tick);
        }
    }
}

struct Slot {
    renderer: ClockIconRenderer,
    frame: IconFrameBuf,
    redraws: u64,
}

/// Owns a set of clock renderers, fires their ticks and repaints the ones
/// that asked for it, each into its own frame buffer.
pub struct TickLoop {
    handle: LoopHandle,
    time: Rc<dyn TimeSource>,
    slots: BTreeMap<TickId, Slot>,
    size: u32,
    ascii: bool,
}

impl TickLoop {
    pub fn new(handle: LoopHandle, time: Rc<dyn TimeSource>, size: u32) -> Self {
        Self {
            handle,
            time,
            slots: BTreeMap::new(),
            size,
            ascii: false,
        }
    }

    /// Print each repainted frame to stdout as ASCII art
    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    pub fn handle(&self) -> &LoopHandle {
        &self.handle
    }

    /// Host capability to hand to renderers that will be added to this loop
    pub fn host(&self) -> Rc<dyn IconHost> {
        Rc::new(self.handle.clone())
    }

    pub fn time(&self) -> Rc<dyn TimeSource> {
        Rc::clone(&self.time)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Adopt a renderer; it is painted on the next step
    pub fn insert(&mut self, renderer: ClockIconRenderer) -> TickId {
        let id = renderer.tick_id();
        self.handle.invalidate(id);
        self.slots.insert(
            id,
            Slot {
                renderer,
                frame: IconFrameBuf::new(self.size, self.size, Rgb888::BLACK),
                redraws: 0,
            },
        );
        debug!("{} added, {} renderers hosted", id, self.slots.len());
        id
    }

    pub fn remove(&mut self, id: TickId) -> Option<ClockIconRenderer> {
        self.slots.remove(&id).map(|slot| slot.renderer)
    }

    pub fn renderer(&self, id: TickId) -> Option<&ClockIconRenderer> {
        self.slots.get(&id).map(|slot| &slot.renderer)
    }

    pub fn renderer_mut(&mut self, id: TickId) -> Option<&mut ClockIconRenderer> {
        self.slots.get_mut(&id).map(|slot| &mut slot.renderer)
    }

    pub fn frame(&self, id: TickId) -> Option<&IconFrameBuf> {
        self.slots.get(&id).map(|slot| &slot.frame)
    }

    pub fn redraw_count(&self, id: TickId) -> u64 {
        self.slots.get(&id).map_or(0, |slot| slot.redraws)
    }

    /// Fire every tick due now, then repaint whatever was invalidated.
    /// Returns the number of frames repainted.
    pub fn step(&mut self) -> usize {
        let now = self.time.uptime_ms();
        for id in self.handle.take_due(now) {
            if let Some(slot) = self.slots.get_mut(&id) {
                slot.renderer.run();
            }
        }

        let bounds = Rectangle::new(Point::zero(), Size::new(self.size, self.size));
        let mut painted = 0;
        for id in self.handle.take_dirty() {
            let Some(slot) = self.slots.get_mut(&id) else {
                continue;
            };
            if let Err(e) = slot.renderer.draw(&mut slot.frame, bounds) {
                match e {}
            }
            slot.redraws += 1;
            painted += 1;
            debug!(
                "{} repainted at {}ms showing {:?}",
                id,
                now,
                slot.renderer.last_applied()
            );
            if self.ascii {
                println!("{}\n{}", id, slot.frame.to_ascii());
            }
        }
        painted
    }

    /// Drive the loop on the tokio timer until `total` has elapsed.
    /// `Duration::MAX` runs until the future is dropped.
    pub async fn run_for(&mut self, total: Duration) {
        let start = self.time.uptime_ms();
        let total_ms = u64::try_from(total.as_millis()).unwrap_or(u64::MAX);
        let deadline = start.saturating_add(total_ms);
        info!("tick loop running {} renderers for {:?}", self.slots.len(), total);
        loop {
            self.step();
            let now = self.time.uptime_ms();
            if now >= deadline {
                break;
            }
            let wake = self.handle.next_due().unwrap_or(deadline).min(deadline);
            tokio::time::sleep(Duration::from_millis(wake.saturating_sub(now))).await;
        }
        info!("tick loop finished after {}ms", self.time.uptime_ms() - start);
    }
}
