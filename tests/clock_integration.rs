/*
 *  tests/clock_integration.rs
 *
 *  Integration tests for live clock icons
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 */

use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveTime;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use dynaclock::clock::{ClockDrawableWrapper, ClockIconError, ClockOptions};
use dynaclock::host::{LoopHandle, MockHost, TickLoop};
use dynaclock::icon::IconFrameBuf;
use dynaclock::sample::{self, HOUR_LAYER, MINUTE_LAYER, SECOND_LAYER};
use dynaclock::time_source::ManualClock;

fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

fn wrapper(clock: &ManualClock, seconds_hand: bool) -> ClockDrawableWrapper {
    ClockDrawableWrapper::for_meta(
        &sample::clock_metadata(),
        ClockOptions { seconds_hand },
        clock,
        sample::clock_icon,
    )
    .unwrap()
}

fn full(size: u32) -> Rectangle {
    Rectangle::new(Point::zero(), Size::new(size, size))
}

#[test]
fn test_rest_pose_levels_end_to_end() {
    let clock = ManualClock::new(t(10, 10, 0), 0);
    let w = wrapper(&clock, true);
    let fg = w.foreground();
    assert_eq!(fg.get(HOUR_LAYER).unwrap().level(), 10);
    assert_eq!(fg.get(MINUTE_LAYER).unwrap().level(), 600);
    assert_eq!(fg.get(SECOND_LAYER).unwrap().level(), 0);
}

#[test]
fn test_flat_icon_declined() {
    let clock = ManualClock::at_hms(1, 0, 0);
    let res = ClockDrawableWrapper::for_meta(
        &sample::clock_metadata(),
        ClockOptions::default(),
        &clock,
        sample::flat_icon,
    );
    assert_eq!(res.unwrap_err(), ClockIconError::NotAdaptive);
}

#[test]
fn test_hour_hand_creeps_through_the_hour() {
    let clock = ManualClock::new(t(10, 10, 0), 0);
    let w = wrapper(&clock, false);
    let host = MockHost::new();
    let mut r = w.constant_state(0.0).unwrap().new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));
    r.set_visible(true);

    let mut last = r.foreground().get(HOUR_LAYER).unwrap().level();
    for _ in 0..30 {
        clock.advance(Duration::from_secs(60));
        r.run();
        let level = r.foreground().get(HOUR_LAYER).unwrap().level();
        assert_eq!(level, last + 1);
        last = level;
    }
    assert_eq!(host.invalidation_count(), 30);
}

#[test]
fn test_visibility_gates_ticks() {
    let clock = ManualClock::new(t(8, 0, 0), 500);
    let w = wrapper(&clock, true);
    let host = MockHost::new();
    let mut r = w.constant_state(0.0).unwrap().new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));

    r.set_visible(true);
    assert_eq!(host.pending_at(r.tick_id()), Some(600));

    r.set_visible(false);
    assert_eq!(host.pending_count(), 0);
    for _ in 0..50 {
        clock.advance(Duration::from_millis(200));
        for id in host.take_due(500_000) {
            assert_eq!(id, r.tick_id());
            r.run();
        }
    }
    assert_eq!(host.invalidation_count(), 0);
}

#[test]
fn test_instances_share_metadata_but_not_levels() {
    let clock = ManualClock::new(t(2, 15, 0), 0);
    let w = wrapper(&clock, false);
    let host = MockHost::new();
    let state = w.constant_state(0.1).unwrap();
    let a = state.new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));
    let b = a.new_instance();
    let c = b.new_instance();

    assert!(Rc::ptr_eq(a.constant_state().animation(), c.constant_state().animation()));
    assert!(Rc::ptr_eq(a.constant_state().animation(), w.animation()));
    assert_ne!(a.tick_id(), b.tick_id());
    assert_ne!(b.tick_id(), c.tick_id());
    assert_eq!(a.foreground(), c.foreground());
}

#[test]
fn test_second_hand_stripped_when_disabled() {
    let clock = ManualClock::new(t(6, 30, 45), 0);
    let w = wrapper(&clock, false);
    assert!(w.foreground().get(SECOND_LAYER).is_none());
    assert!(w.monochrome(&clock).unwrap().get(SECOND_LAYER).is_none());
    assert_eq!(w.cadence().tick_ms(), 60_000);

    let w = wrapper(&clock, true);
    assert_eq!(w.foreground().get(SECOND_LAYER).unwrap().level(), 450);
    assert_eq!(w.cadence().tick_ms(), 200);
}

#[test]
fn test_monochrome_is_single_color() {
    let clock = ManualClock::new(t(4, 0, 0), 0);
    let w = wrapper(&clock, false);
    let mono = w.monochrome(&clock).unwrap();
    let mut fb = IconFrameBuf::new(32, 32, Rgb888::BLACK);
    mono.draw(&mut fb, full(32), None).unwrap();
    assert!(fb.as_slice().iter().all(|&c| c == Rgb888::BLACK || c == Rgb888::WHITE));
    assert!(fb.count_where(|c| c == Rgb888::WHITE) > 0);
}

#[test]
fn test_drawn_frame_changes_when_minute_turns() {
    let clock = ManualClock::new(t(3, 0, 0), 0);
    let w = wrapper(&clock, false);
    let host = MockHost::new();
    let mut r = w.constant_state(0.0).unwrap().new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));

    let mut before = IconFrameBuf::new(48, 48, Rgb888::BLACK);
    r.draw(&mut before, full(48)).unwrap();
    clock.advance(Duration::from_secs(15 * 60));
    let mut after = IconFrameBuf::new(48, 48, Rgb888::BLACK);
    r.draw(&mut after, full(48)).unwrap();

    assert_ne!(before.as_slice(), after.as_slice());
    assert_eq!(host.pending_count(), 1);
}

#[test]
fn test_tick_loop_runs_many_instances() {
    let clock = ManualClock::new(t(11, 59, 0), 0);
    let w = wrapper(&clock, false);
    let mut tick_loop = TickLoop::new(LoopHandle::new(), Rc::new(clock.clone()), 24);
    let first = w.constant_state(0.0).unwrap().new_drawable(tick_loop.host(), tick_loop.time());
    let ids: Vec<_> = (0..3).map(|_| tick_loop.insert(first.new_instance())).collect();
    drop(first);

    assert_eq!(tick_loop.step(), 3);
    // every instance wakes on the same grid point
    assert_eq!(tick_loop.handle().pending_count(), 3);
    assert_eq!(tick_loop.handle().next_due(), Some(60_000));

    clock.advance(Duration::from_secs(60));
    assert_eq!(tick_loop.step(), 3);
    for id in ids {
        assert_eq!(tick_loop.redraw_count(id), 2);
        assert_eq!(tick_loop.renderer(id).unwrap().last_applied(), Some(t(12, 0, 0)));
    }
}
