/*
 *  clock/wrapper.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Builds clock icon templates from icon-pack metadata
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

use log::{debug, info};

use super::error::ClockIconError;
use super::metadata::{AnimationInfo, ClockMetadata};
use super::renderer::ClockConstantState;
use super::schedule::TickCadence;
use crate::icon::{AdaptiveIcon, IconSource, LayerStack};
use crate::time_source::TimeSource;

/// Options fixed when a clock template is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockOptions {
    /// Animate the second hand (and tick at 200ms instead of once a minute)
    pub seconds_hand: bool,
}

/// A validated clock template plus a foreground already set to the time
/// it was built at, usable as a static snapshot.
#[derive(Debug, Clone)]
pub struct ClockDrawableWrapper {
    template: Rc<AdaptiveIcon>,
    animation: Rc<AnimationInfo>,
    foreground: LayerStack,
    cadence: TickCadence,
}

impl ClockDrawableWrapper {
    /// Build a clock template from `meta` and the icon `provider` yields.
    ///
    /// The provider is called exactly once. Fails with `NotAdaptive` when it
    /// hands back a flat image.
    pub fn for_meta<F>(
        meta: &ClockMetadata,
        options: ClockOptions,
        time: &dyn TimeSource,
        provider: F,
    ) -> Result<Self, ClockIconError>
    where
        F: FnOnce() -> IconSource,
    {
        let mut icon = match provider() {
            IconSource::Adaptive(icon) => icon,
            IconSource::Flat(_) => {
                debug!("clock icon template is flat, not animating");
                return Err(ClockIconError::NotAdaptive);
            }
        };

        let mut animation = AnimationInfo::resolve(meta, icon.foreground.len());
        if !options.seconds_hand {
            let (stripped, slot) = animation.without_seconds();
            animation = stripped;
            if let Some(slot) = slot {
                icon.foreground.clear_slot(slot);
                if let Some(mono) = icon.monochrome.as_mut() {
                    mono.clear_slot(slot);
                }
            }
        }

        let mut foreground = icon.foreground.clone();
        animation.apply_time(&time.local_time(), &mut foreground);

        info!(
            "clock template ready: hour {:?} minute {:?} second {:?}",
            animation.hour_layer(),
            animation.minute_layer(),
            animation.second_layer()
        );

        Ok(Self {
            template: Rc::new(icon),
            animation: Rc::new(animation),
            foreground,
            cadence: TickCadence::for_seconds_hand(options.seconds_hand),
        })
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

    /// Foreground as of construction
    pub fn foreground(&self) -> &LayerStack {
        &self.foreground
    }

    /// Monochrome layers set to `time`, if the art ships any
    pub fn monochrome(&self, time: &dyn TimeSource) -> Option<LayerStack> {
        let mut mono = self.template.monochrome.clone()?;
        self.animation.apply_time(&time.local_time(), &mut mono);
        Some(mono)
    }

    /// Static icon with the hands set to `time`, for hosts that cannot animate
    pub fn flattened(&self, time: &dyn TimeSource) -> AdaptiveIcon {
        let mut icon = (*self.template).clone();
        self.animation.apply_time(&time.local_time(), &mut icon.foreground);
        if let Some(mono) = icon.monochrome.as_mut() {
            self.animation.apply_time(&time.local_time(), mono);
        }
        icon
    }

    /// Shareable state for live renderers.
    ///
    /// `bounds_offset` is the fraction trimmed from each edge of the
    /// foreground, in `[0, 0.5)`.
    pub fn constant_state(&self, bounds_offset: f32) -> Result<ClockConstantState, ClockIconError> {
        ClockConstantState::new(
            Rc::clone(&self.template),
            Rc::clone(&self.animation),
            bounds_offset,
            self.cadence,
        )
    }
}
