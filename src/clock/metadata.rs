/*
 *  clock/metadata.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Clock layer metadata and the time to level mapping
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

use chrono::Timelike;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::constants::{INVALID_VALUE, LEVELS_PER_SECOND};
use crate::icon::LayerStack;

/// Raw clock description as published by an icon pack.
///
/// Indices are not validated here; `-1` (or anything out of range) means
/// the icon has no such hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockMetadata {
    pub hour_layer_index: i32,
    pub minute_layer_index: i32,
    pub second_layer_index: i32,
    pub default_hour: i32,
    pub default_minute: i32,
    pub default_second: i32,
}

impl Default for ClockMetadata {
    fn default() -> Self {
        Self {
            hour_layer_index: INVALID_VALUE,
            minute_layer_index: INVALID_VALUE,
            second_layer_index: INVALID_VALUE,
            default_hour: 0,
            default_minute: 0,
            default_second: 0,
        }
    }
}

/// Levels for each hand at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockLevels {
    pub hour: i32,
    pub minute: i32,
    pub second: i32,
}

/// Time re-based onto the pose the art was drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertedTime {
    /// `[0, 12)`
    pub hour: i32,
    /// `[0, 60)`
    pub minute: i32,
    /// `[0, 60)`
    pub second: i32,
}

/// Validated, immutable animation description shared by every renderer
/// built from one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationInfo {
    hour_layer: Option<usize>,
    minute_layer: Option<usize>,
    second_layer: Option<usize>,
    default_hour: i32,
    default_minute: i32,
    default_second: i32,
}

/// Resolve a raw index against the layer count, anything out of range is absent
fn resolve_index(raw: i32, layer_count: usize, hand: &str) -> Option<usize> {
    match usize::try_from(raw) {
        Ok(i) if i < layer_count => Some(i),
        _ => {
            if raw != INVALID_VALUE {
                debug!("{} layer index {} outside 0..{}, hand disabled", hand, raw, layer_count);
            }
            None
        }
    }
}

impl AnimationInfo {
    /// Validate `meta` against a foreground of `layer_count` layers.
    ///
    /// Default-time values are trusted as-is.
    pub fn resolve(meta: &ClockMetadata, layer_count: usize) -> Self {
        Self {
            hour_layer: resolve_index(meta.hour_layer_index, layer_count, "hour"),
            minute_layer: resolve_index(meta.minute_layer_index, layer_count, "minute"),
            second_layer: resolve_index(meta.second_layer_index, layer_count, "second"),
            default_hour: meta.default_hour,
            default_minute: meta.default_minute,
            default_second: meta.default_second,
        }
    }

    pub fn hour_layer(&self) -> Option<usize> { self.hour_layer }
    pub fn minute_layer(&self) -> Option<usize> { self.minute_layer }
    pub fn second_layer(&self) -> Option<usize> { self.second_layer }

    /// Drop the second hand, returns the slot it used
    pub(crate) fn without_seconds(mut self) -> (Self, Option<usize>) {
        let slot = self.second_layer.take();
        (self, slot)
    }

    /// Rotate by the difference from the default time
    pub fn convert<T: Timelike>(&self, time: &T) -> ConvertedTime {
        let hour = (time.hour() % 12) as i32;
        let minute = time.minute() as i32;
        let second = time.second() as i32;
        ConvertedTime {
            hour: (hour + (12 - self.default_hour)).rem_euclid(12),
            minute: (minute + (60 - self.default_minute)).rem_euclid(60),
            second: (second + (60 - self.default_second)).rem_euclid(60),
        }
    }

    /// Levels every hand would be set to at `time`
    pub fn levels<T: Timelike>(&self, time: &T) -> ClockLevels {
        let conv = self.convert(time);
        let hour = (time.hour() % 12) as i32;
        let minute = time.minute() as i32;
        ClockLevels {
            // minute folded in so the hour hand creeps through the hour
            hour: conv.hour * 60 + minute,
            minute: hour * 60 + conv.minute,
            second: conv.second * LEVELS_PER_SECOND,
        }
    }

    /// Push the levels for `time` into `layers`.
    ///
    /// Returns true if any hand actually moved. Absent hands, and indices
    /// past the end of `layers`, are skipped.
    pub fn apply_time<T: Timelike>(&self, time: &T, layers: &mut LayerStack) -> bool {
        let levels = self.levels(time);
        let mut invalidate = false;

        for (slot, level) in [
            (self.hour_layer, levels.hour),
            (self.minute_layer, levels.minute),
            (self.second_layer, levels.second),
        ] {
            if let Some(layer) = slot.and_then(|i| layers.get_mut(i)) {
                if layer.set_level(level) {
                    invalidate = true;
                }
            }
        }

        if invalidate {
            trace!("clock levels now {:?}", levels);
        }
        invalidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{HOUR_LEVELS_PER_TURN, MINUTE_LEVELS_PER_TURN, SECOND_LEVELS_PER_TURN};
    use crate::icon::{DialLayer, HandLayer, Layer};
    use chrono::NaiveTime;
    use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

    fn t(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn meta(hour: i32, minute: i32, second: i32, dh: i32, dm: i32, ds: i32) -> ClockMetadata {
        ClockMetadata {
            hour_layer_index: hour,
            minute_layer_index: minute,
            second_layer_index: second,
            default_hour: dh,
            default_minute: dm,
            default_second: ds,
        }
    }

    fn stack() -> LayerStack {
        LayerStack::new(vec![
            Layer::dial(DialLayer::new(Rgb888::WHITE, 0.9, 0.2)),
            Layer::hand(HandLayer::new(Rgb888::WHITE, 0.5, 2, HOUR_LEVELS_PER_TURN)),
            Layer::hand(HandLayer::new(Rgb888::WHITE, 0.8, 1, MINUTE_LEVELS_PER_TURN)),
            Layer::hand(HandLayer::new(Rgb888::RED, 0.9, 1, SECOND_LEVELS_PER_TURN)),
        ])
    }

    #[test]
    fn test_resolve_out_of_range_is_absent() {
        let info = AnimationInfo::resolve(&meta(1, 4, -3, 0, 0, 0), 4);
        assert_eq!(info.hour_layer(), Some(1));
        assert_eq!(info.minute_layer(), None);
        assert_eq!(info.second_layer(), None);
    }

    #[test]
    fn test_default_metadata_has_no_hands() {
        let info = AnimationInfo::resolve(&ClockMetadata::default(), 4);
        assert_eq!(info.hour_layer(), None);
        assert_eq!(info.minute_layer(), None);
        assert_eq!(info.second_layer(), None);
        let mut layers = stack();
        assert!(!info.apply_time(&t(3, 4, 5), &mut layers));
    }

    #[test]
    fn test_default_time_converts_to_zero() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 10, 10, 0), 4);
        assert_eq!(info.convert(&t(10, 10, 0)), ConvertedTime { hour: 0, minute: 0, second: 0 });
        // pm hours fold onto the 12h dial
        assert_eq!(info.convert(&t(22, 10, 0)), ConvertedTime { hour: 0, minute: 0, second: 0 });
    }

    #[test]
    fn test_end_to_end_levels_at_ten_past_ten() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 10, 10, 0), 4);
        let levels = info.levels(&t(10, 10, 0));
        // convertedHour 0, raw minute 10
        assert_eq!(levels.hour, 10);
        // raw hour 10, convertedMinute 0
        assert_eq!(levels.minute, 600);
        assert_eq!(levels.second, 0);
    }

    #[test]
    fn test_levels_with_twelve_oclock_calibration() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 0, 0, 0), 4);
        let levels = info.levels(&t(3, 15, 42));
        assert_eq!(levels.hour, 3 * 60 + 15);
        assert_eq!(levels.minute, 3 * 60 + 15);
        assert_eq!(levels.second, 42 * LEVELS_PER_SECOND);
    }

    #[test]
    fn test_converted_always_in_range() {
        for dh in [-30, -1, 0, 5, 11, 12, 40] {
            for dm in [-90, 0, 30, 59, 60, 200] {
                let info = AnimationInfo::resolve(&meta(0, 1, 2, dh, dm, dm), 3);
                for h in 0..24 {
                    for m in (0..60).step_by(7) {
                        let c = info.convert(&t(h, m, m));
                        assert!((0..12).contains(&c.hour), "hour {} for dh {}", c.hour, dh);
                        assert!((0..60).contains(&c.minute));
                        assert!((0..60).contains(&c.second));
                    }
                }
            }
        }
    }

    #[test]
    fn test_hour_level_creeps_through_the_hour() {
        let info = AnimationInfo::resolve(&meta(1, 2, -1, 10, 10, 0), 4);
        let mut prev = None;
        for m in 0..60 {
            let level = info.levels(&t(7, m, 0)).hour;
            if let Some(p) = prev {
                assert!(level > p);
            }
            prev = Some(level);
        }
    }

    #[test]
    fn test_apply_time_is_idempotent() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 0, 0, 0), 4);
        let mut layers = stack();
        assert!(info.apply_time(&t(4, 20, 1), &mut layers));
        assert!(!info.apply_time(&t(4, 20, 1), &mut layers));
        assert_eq!(layers.get(1).unwrap().level(), 4 * 60 + 20);
        assert_eq!(layers.get(2).unwrap().level(), 4 * 60 + 20);
        assert_eq!(layers.get(3).unwrap().level(), 10);
    }

    #[test]
    fn test_only_seconds_moving_still_reports_change() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 0, 0, 0), 4);
        let mut layers = stack();
        info.apply_time(&t(4, 20, 1), &mut layers);
        assert!(info.apply_time(&t(4, 20, 2), &mut layers));
    }

    #[test]
    fn test_apply_time_skips_missing_slots() {
        // indices valid for the template but past the end of a shorter stack
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 0, 0, 0), 4);
        let mut short = LayerStack::new(vec![Layer::dial(DialLayer::new(Rgb888::WHITE, 0.9, 0.2))]);
        assert!(!info.apply_time(&t(1, 2, 3), &mut short));

        let mut emptied = stack();
        emptied.clear_slot(3);
        assert!(info.apply_time(&t(1, 2, 3), &mut emptied));
        assert!(emptied.get(3).is_none());
    }

    #[test]
    fn test_without_seconds() {
        let info = AnimationInfo::resolve(&meta(1, 2, 3, 0, 0, 0), 4);
        let (info, slot) = info.without_seconds();
        assert_eq!(slot, Some(3));
        assert_eq!(info.second_layer(), None);
    }

    #[test]
    fn test_metadata_yaml_defaults() {
        let m: ClockMetadata = serde_yaml::from_str("hour_layer_index: 1\ndefault_hour: 10\n").unwrap();
        assert_eq!(m.hour_layer_index, 1);
        assert_eq!(m.minute_layer_index, INVALID_VALUE);
        assert_eq!(m.default_hour, 10);
        assert_eq!(m.default_minute, 0);
    }
}
