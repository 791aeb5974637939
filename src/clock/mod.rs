/*
 *  clock/mod.rs
 *
 *  dynaclock - live clock icons
 *  (c) 2020-26 Stuart Hunter
 *
 *  Live clock icons: metadata, scheduling and renderers
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

pub mod error;
pub mod metadata;
pub mod renderer;
pub mod schedule;
pub mod wrapper;

pub use error::ClockIconError;
pub use metadata::{AnimationInfo, ClockLevels, ClockMetadata, ConvertedTime};
pub use renderer::{ClockConstantState, ClockIconRenderer};
pub use schedule::{next_tick_at, TickCadence};
pub use wrapper::{ClockDrawableWrapper, ClockOptions};
