/*
 *  lib.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Live analog clock icons from layered adaptive-icon art
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

pub mod clock;
pub mod config;
pub mod constants;
pub mod host;
pub mod icon;
pub mod sample;
pub mod time_source;

pub use clock::{
    AnimationInfo, ClockConstantState, ClockDrawableWrapper, ClockIconError, ClockIconRenderer,
    ClockMetadata, ClockOptions,
};
pub use host::IconHost;
pub use time_source::TimeSource;
