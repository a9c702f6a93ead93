#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Basic line clear scoring (level 1 values, multiplied by the current level)
pub const POINTS_SINGLE: u32 = 40;
pub const POINTS_DOUBLE: u32 = 100;
pub const POINTS_TRIPLE: u32 = 300;
pub const POINTS_TETRIS: u32 = 1200;

/// Line-clear score table indexed by `cleared - 1`.
pub const LINE_SCORES: [u32; 4] = [POINTS_SINGLE, POINTS_DOUBLE, POINTS_TRIPLE, POINTS_TETRIS];

// Level progression
pub const LINES_PER_LEVEL: u32 = 10;
pub const STARTING_LEVEL: u32 = 1;

// Drop cadence in milliseconds. The base interval shrinks by DROP_STEP_MS
// per level down to DROP_FLOOR_MS; the room speed multiplier then divides
// it, clamped at DROP_HARD_FLOOR_MS.
pub const DROP_BASE_MS: u64 = 500;
pub const DROP_STEP_MS: u64 = 50;
pub const DROP_FLOOR_MS: u64 = 100;
pub const DROP_HARD_FLOOR_MS: u64 = 50;

/// One-shot speed-multiplier escalations at exact elapsed match seconds.
pub const SPEED_SCHEDULE: &[(u32, f32)] = &[(120, 1.2), (240, 1.5), (360, 1.8), (480, 2.2)];

#[must_use]
pub fn line_clear_points(cleared: usize, level: u32) -> u32 {
    if cleared == 0 || cleared > 4 {
        return 0;
    }
    LINE_SCORES[cleared - 1] * level
}
