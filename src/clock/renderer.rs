/*
 *  clock/renderer.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Per-instance clock icon drawable and its shareable constant state
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

use std::rc::Rc;

use chrono::NaiveTime;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, trace};

use super::error::ClockIconError;
use super::metadata::AnimationInfo;
use super::schedule::TickCadence;
use crate::constants::DISABLED_ALPHA;
use crate::host::{IconHost, TickId};
use crate::icon::{AdaptiveIcon, ClippedCanvas, ColorFilter, LayerStack};
use crate::time_source::TimeSource;

/// Everything renderers of one clock icon share.
///
/// Cloning is cheap: the template and animation info sit behind `Rc` and
/// are never deep-copied.
#[derive(Debug, Clone)]
pub struct ClockConstantState {
    template: Rc<AdaptiveIcon>,
    animation: Rc<AnimationInfo>,
    bounds_offset: f32,
    cadence: TickCadence,
    bg_filter: Option<ColorFilter>,
    themed_fg_color: Option<Rgb888>,
    disabled: bool,
}

impl ClockConstantState {
    pub(crate) fn new(
        template: Rc<AdaptiveIcon>,
        animation: Rc<AnimationInfo>,
        bounds_offset: f32,
        cadence: TickCadence,
    ) -> Result<Self, ClockIconError> {
        if !(0.0..0.5).contains(&bounds_offset) {
            return Err(ClockIconError::InvalidBoundsOffset(bounds_offset));
        }
        Ok(Self {
            template,
            animation,
            bounds_offset,
            cadence,
            bg_filter: None,
            themed_fg_color: None,
            disabled: false,
        })
    }

    /// Theme the icon: background tinted, `fg` reported as the icon color
    pub fn themed(mut self, bg_tint: Rgb888, fg: Rgb888) -> Self {
        self.bg_filter = Some(ColorFilter::Tint(bg_tint));
        self.themed_fg_color = Some(fg);
        self
    }

    pub fn animation(&self) -> &Rc<AnimationInfo> {
        &self.animation
    }

    pub fn template(&self) -> &Rc<AdaptiveIcon> {
        &self.template
    }

    pub fn cadence(&self) -> TickCadence {
        self.cadence
    }

    /// Build a new independent renderer from this state
    pub fn new_drawable(&self, host: Rc<dyn IconHost>, time: Rc<dyn TimeSource>) -> ClockIconRenderer {
        ClockIconRenderer::new(self.clone(), host, time)
    }
}

/// A live clock icon.
///
/// Owns its own copy of the foreground layers, keeps the hands current and
/// drives its own refresh through the host's timer. Not `Send`: everything
/// happens on the host's UI thread.
pub struct ClockIconRenderer {
    state: ClockConstantState,
    foreground: LayerStack,
    canvas_scale: f32,
    host: Rc<dyn IconHost>,
    time: Rc<dyn TimeSource>,
    tick: TickId,
    visible: bool,
    pending: bool,
    disabled: bool,
    last_applied: Option<NaiveTime>,
}

impl ClockIconRenderer {
    fn new(state: ClockConstantState, host: Rc<dyn IconHost>, time: Rc<dyn TimeSource>) -> Self {
        let foreground = state.template.foreground.clone();
        let canvas_scale = 1.0 - 2.0 * state.bounds_offset;
        let disabled = state.disabled;
        let mut renderer = Self {
            state,
            foreground,
            canvas_scale,
            host,
            time,
            tick: TickId::next(),
            visible: true,
            pending: false,
            disabled,
            last_applied: None,
        };
        // first paint may come before any tick fires
        renderer.apply_current_time();
        debug!("clock renderer {} created", renderer.tick);
        renderer
    }

    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a tick is currently registered with the host
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn foreground(&self) -> &LayerStack {
        &self.foreground
    }

    /// Local time the hands were last set from
    pub fn last_applied(&self) -> Option<NaiveTime> {
        self.last_applied
    }

    pub fn canvas_scale(&self) -> f32 {
        self.canvas_scale
    }

    /// Themed when a background filter is set
    pub fn is_themed(&self) -> bool {
        self.state.bg_filter.is_some()
    }

    /// Color launchers use for badges and text next to the icon
    pub fn icon_color(&self) -> Rgb888 {
        match (self.is_themed(), self.state.themed_fg_color) {
            (true, Some(fg)) => fg,
            _ => self.state.template.foreground.dominant_color().unwrap_or(Rgb888::WHITE),
        }
    }

    /// Snapshot of the shared state, carrying this instance's disabled flag
    pub fn constant_state(&self) -> ClockConstantState {
        let mut state = self.state.clone();
        state.disabled = self.disabled;
        state
    }

    /// Another renderer on the same host, sharing calibration but animating on its own
    pub fn new_instance(&self) -> ClockIconRenderer {
        self.constant_state()
            .new_drawable(Rc::clone(&self.host), Rc::clone(&self.time))
    }

    fn background_filter(&self) -> Option<ColorFilter> {
        if self.disabled {
            Some(ColorFilter::disabled(DISABLED_ALPHA))
        } else {
            self.state.bg_filter
        }
    }

    fn foreground_filter(&self) -> Option<ColorFilter> {
        self.disabled.then(|| ColorFilter::disabled(DISABLED_ALPHA))
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.host.invalidate(self.tick);
        }
    }

    fn apply_current_time(&mut self) -> bool {
        let now = self.time.local_time();
        self.last_applied = Some(now);
        self.state.animation.apply_time(&now, &mut self.foreground)
    }

    /// Paint background, then the re-leveled foreground clipped to the mask
    pub fn draw<D>(&mut self, canvas: &mut D, bounds: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let bg_filter = self.background_filter();
        self.state.template.background.draw(canvas, bounds, bg_filter.as_ref())?;

        // always re-apply, a tick may have been missed
        self.apply_current_time();

        let fg_filter = self.foreground_filter();
        let mut clipped = ClippedCanvas::new(canvas, bounds, self.canvas_scale, self.state.template.mask);
        let local = clipped.local_bounds();
        self.foreground.draw(&mut clipped, local, fg_filter.as_ref())?;

        self.reschedule();
        Ok(())
    }

    /// Tick callback, invoked by the host when the scheduled time arrives
    pub fn run(&mut self) {
        self.pending = false;
        if !self.visible {
            return;
        }
        if self.apply_current_time() {
            trace!("{} hands moved, requesting redraw", self.tick);
            // the redraw reschedules through draw()
            self.host.invalidate(self.tick);
        } else {
            self.reschedule();
        }
    }

    /// Returns the previous visibility
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let previous = self.visible;
        self.visible = visible;
        if visible {
            self.reschedule();
        } else {
            self.unschedule();
        }
        previous
    }

    fn unschedule(&mut self) {
        self.host.unschedule(self.tick);
        self.pending = false;
    }

    fn reschedule(&mut self) {
        if !self.visible {
            return;
        }
        self.unschedule();
        let at = self.state.cadence.next_after(self.time.uptime_ms());
        self.host.schedule_at(self.tick, at);
        self.pending = true;
    }
}

impl Drop for ClockIconRenderer {
    fn drop(&mut self) {
        self.host.unschedule(self.tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HOUR_LEVELS_PER_TURN, MINUTE_LEVELS_PER_TURN};
    use crate::clock::metadata::ClockMetadata;
    use crate::host::MockHost;
    use crate::icon::{Background, DialLayer, HandLayer, IconFrameBuf, IconMask, Layer};
    use crate::time_source::ManualClock;
    use std::time::Duration;

    fn template() -> Rc<AdaptiveIcon> {
        Rc::new(AdaptiveIcon::new(
            Background::Solid(Rgb888::new(0, 0, 120)),
            LayerStack::new(vec![
                Layer::dial(DialLayer::new(Rgb888::new(200, 200, 200), 0.9, 0.2)),
                Layer::hand(HandLayer::new(Rgb888::WHITE, 0.5, 2, HOUR_LEVELS_PER_TURN)),
                Layer::hand(HandLayer::new(Rgb888::WHITE, 0.8, 1, MINUTE_LEVELS_PER_TURN)),
            ]),
            IconMask::Circle,
        ))
    }

    fn state(bounds_offset: f32) -> ClockConstantState {
        let meta = ClockMetadata {
            hour_layer_index: 1,
            minute_layer_index: 2,
            ..ClockMetadata::default()
        };
        let t = template();
        let anim = Rc::new(AnimationInfo::resolve(&meta, t.foreground.len()));
        ClockConstantState::new(t, anim, bounds_offset, TickCadence::default()).unwrap()
    }

    fn setup() -> (MockHost, ManualClock, ClockIconRenderer) {
        let host = MockHost::new();
        let clock = ManualClock::new(NaiveTime::from_hms_opt(3, 0, 0).unwrap(), 10_000);
        let r = state(0.0).new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));
        (host, clock, r)
    }

    #[test]
    fn test_time_applied_on_construction() {
        let (host, _clock, r) = setup();
        assert_eq!(r.foreground().get(1).unwrap().level(), 180);
        assert_eq!(r.foreground().get(2).unwrap().level(), 180);
        assert!(r.last_applied().is_some());
        // nothing scheduled until drawn or shown
        assert_eq!(host.pending_count(), 0);
    }

    #[test]
    fn test_bad_bounds_offset_rejected() {
        let t = template();
        let anim = Rc::new(AnimationInfo::resolve(&ClockMetadata::default(), 3));
        for off in [-0.1, 0.5, 0.9] {
            let err = ClockConstantState::new(Rc::clone(&t), Rc::clone(&anim), off, TickCadence::default());
            assert_eq!(err.unwrap_err(), ClockIconError::InvalidBoundsOffset(off));
        }
    }

    #[test]
    fn test_draw_schedules_on_grid() {
        let (host, _clock, mut r) = setup();
        let mut fb = IconFrameBuf::new(48, 48, Rgb888::BLACK);
        r.draw(&mut fb, Rectangle::new(Point::zero(), Size::new(48, 48))).unwrap();
        assert!(r.is_pending());
        assert_eq!(host.pending_at(r.tick_id()), Some(60_000));
        assert_eq!(host.state().borrow().last_scheduled_at, Some(60_000));
        // background painted, corners outside the mask keep the background
        assert_eq!(fb.pixel(0, 0), Some(Rgb888::new(0, 0, 120)));
        assert!(fb.count_where(|c| c == Rgb888::WHITE) > 0);
    }

    #[test]
    fn test_tick_without_change_reschedules_silently() {
        let (host, clock, mut r) = setup();
        r.set_visible(true);
        clock.set_uptime_ms(60_000);
        r.run();
        assert_eq!(host.invalidation_count(), 0);
        assert_eq!(host.pending_at(r.tick_id()), Some(120_000));
    }

    #[test]
    fn test_tick_with_change_requests_redraw() {
        let (host, clock, mut r) = setup();
        r.set_visible(true);
        clock.advance(Duration::from_secs(60));
        r.run();
        assert_eq!(host.state().borrow().invalidations, vec![r.tick_id()]);
        assert!(!r.is_pending());
    }

    #[test]
    fn test_at_most_one_pending_tick() {
        let (host, _clock, mut r) = setup();
        let mut fb = IconFrameBuf::new(16, 16, Rgb888::BLACK);
        for _ in 0..5 {
            r.draw(&mut fb, Rectangle::new(Point::zero(), Size::new(16, 16))).unwrap();
            r.set_visible(true);
        }
        assert_eq!(host.pending_count(), 1);
        let s = host.state();
        let s = s.borrow();
        assert!(s.unschedule_count >= s.schedule_count);
    }

    #[test]
    fn test_hidden_renderer_never_redraws() {
        let (host, clock, mut r) = setup();
        r.set_visible(true);
        assert!(r.set_visible(false));
        assert_eq!(host.pending_count(), 0);
        for _ in 0..10 {
            clock.advance(Duration::from_secs(60));
            r.run();
        }
        assert_eq!(host.invalidation_count(), 0);
        assert_eq!(host.pending_count(), 0);
        assert!(!r.set_visible(true));
        assert_eq!(host.pending_count(), 1);
    }

    #[test]
    fn test_new_instance_shares_animation_not_layers() {
        let (host, clock, r) = setup();
        let mut other = r.new_instance();
        assert!(Rc::ptr_eq(r.constant_state().animation(), other.constant_state().animation()));
        assert!(Rc::ptr_eq(r.constant_state().template(), other.constant_state().template()));
        assert_ne!(r.tick_id(), other.tick_id());

        other.set_visible(true);
        clock.advance(Duration::from_secs(120));
        other.run();
        assert_eq!(other.foreground().get(2).unwrap().level(), 182);
        assert_eq!(r.foreground().get(2).unwrap().level(), 180);
        assert_eq!(host.invalidation_count(), 1);
    }

    #[test]
    fn test_disabled_draws_grey() {
        let (host, _clock, mut r) = setup();
        r.set_disabled(true);
        assert_eq!(host.invalidation_count(), 1);
        let mut fb = IconFrameBuf::new(48, 48, Rgb888::BLACK);
        r.draw(&mut fb, Rectangle::new(Point::zero(), Size::new(48, 48))).unwrap();
        assert!(fb.as_slice().iter().all(|c| c.r() == c.g() && c.g() == c.b()));
        assert!(r.new_instance().is_disabled());
    }

    #[test]
    fn test_reenable_restores_theme_and_clears_grey() {
        let host = MockHost::new();
        let clock = ManualClock::at_hms(3, 0, 0);
        let tint = Rgb888::new(200, 100, 50);
        let mut r = state(0.0)
            .themed(tint, Rgb888::GREEN)
            .new_drawable(Rc::new(host.clone()), Rc::new(clock));
        let bounds = Rectangle::new(Point::zero(), Size::new(48, 48));
        let themed_bg = ColorFilter::Tint(tint).apply(Rgb888::new(0, 0, 120));

        r.set_disabled(true);
        let mut fb = IconFrameBuf::new(48, 48, Rgb888::BLACK);
        r.draw(&mut fb, bounds).unwrap();
        assert_ne!(fb.pixel(0, 0), Some(themed_bg));
        assert_eq!(fb.count_where(|c| c == Rgb888::WHITE), 0);

        r.set_disabled(false);
        r.set_disabled(false);
        assert_eq!(host.invalidation_count(), 2);
        assert!(!r.is_disabled());
        assert!(r.is_themed());

        let mut fb = IconFrameBuf::new(48, 48, Rgb888::BLACK);
        r.draw(&mut fb, bounds).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(themed_bg));
        assert!(fb.count_where(|c| c == Rgb888::WHITE) > 0);
        assert!(!r.new_instance().is_disabled());
    }

    #[test]
    fn test_theming_and_icon_color() {
        let host = MockHost::new();
        let clock = ManualClock::at_hms(3, 0, 0);
        let plain = state(0.0).new_drawable(Rc::new(host.clone()), Rc::new(clock.clone()));
        assert!(!plain.is_themed());
        assert_eq!(plain.icon_color(), Rgb888::new(200, 200, 200));

        let themed = state(0.0)
            .themed(Rgb888::new(40, 80, 40), Rgb888::GREEN)
            .new_drawable(Rc::new(host), Rc::new(clock));
        assert!(themed.is_themed());
        assert_eq!(themed.icon_color(), Rgb888::GREEN);
    }

    #[test]
    fn test_bounds_offset_shrinks_foreground() {
        let host = MockHost::new();
        let clock = ManualClock::at_hms(3, 0, 0);
        let mut r = state(0.25).new_drawable(Rc::new(host), Rc::new(clock));
        assert_eq!(r.canvas_scale(), 0.5);
        let mut fb = IconFrameBuf::new(48, 48, Rgb888::BLACK);
        r.draw(&mut fb, Rectangle::new(Point::zero(), Size::new(48, 48))).unwrap();
        // nothing but background in the outer band
        for x in 0..48 {
            assert_eq!(fb.pixel(x, 2), Some(Rgb888::new(0, 0, 120)));
        }
    }

    #[test]
    fn test_drop_unschedules() {
        let (host, _clock, mut r) = setup();
        r.set_visible(true);
        assert_eq!(host.pending_count(), 1);
        drop(r);
        assert_eq!(host.pending_count(), 0);
    }
}
