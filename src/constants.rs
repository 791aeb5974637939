//! This module contains global constants used across the clock and icon modules.

/// Number of levels the second hand advances per second.
pub const LEVELS_PER_SECOND: i32 = 10;

/// Tick period when the second hand is disabled (the default).
pub const TICK_MS_MINUTES: u64 = 60_000;
/// Tick period when a second hand is drawn.
pub const TICK_MS_SECONDS: u64 = 200;

/// Raw metadata value meaning "no such layer".
pub const INVALID_VALUE: i32 = -1;

/// Levels per full turn of each hand layer, matching the level encodings
/// produced by the clock kernel.
pub const HOUR_LEVELS_PER_TURN: i32 = 12 * 60;
pub const MINUTE_LEVELS_PER_TURN: i32 = 60;
pub const SECOND_LEVELS_PER_TURN: i32 = 60 * LEVELS_PER_SECOND;

/// Default icon edge in pixels for the demo.
pub const DEFAULT_ICON_SIZE: u32 = 48;

/// Inset baked into the icon mask on each side, as a fraction of the icon edge.
pub const DEFAULT_BOUNDS_OFFSET: f32 = 0.0;

/// Dim factor applied by the disabled filter.
pub const DISABLED_ALPHA: f32 = 0.5;
