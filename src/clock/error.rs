/*
 *  clock/error.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Errors reported when a clock icon cannot be built
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

use thiserror::Error;

/// Construction-time failures. Once built, a clock never fails on the
/// time path; callers fall back to the static icon on any of these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClockIconError {
    /// Template is a flat bitmap, there are no layers to animate
    #[error("icon template is not an adaptive layered icon")]
    NotAdaptive,

    /// Bounds offset must leave a positive canvas scale
    #[error("bounds offset {0} out of range (must be in [0, 0.5))")]
    InvalidBoundsOffset(f32),
}
