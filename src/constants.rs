use crate::types::GhostName;

pub const FRAME_RATE: u32 = 60;

pub const TILE_SIZE: i32 = 8;
pub const SPRITE_SIZE: i32 = 16;

pub const GAME_WIDTH: i32 = 32 * TILE_SIZE;
pub const GAME_HEIGHT: i32 = 35 * TILE_SIZE;

pub const TUNNEL_ROW: i32 = 14;
pub const TUNNEL_LEFT_COL: i32 = 0;
pub const TUNNEL_RIGHT_COL: i32 = 30;
pub const TUNNEL_WRAP_OFFSET: f64 = (GAME_WIDTH - SPRITE_SIZE) as f64;

/// Decimal places every motion quantity is rounded to before it is compared or stored.
pub const MOTION_DECIMALS: i32 = 10;

pub const PLAYER_STARTING_SPEED: f64 = 50.0;
pub const GHOST_STARTING_SPEED: f64 = 46.875;

pub const PLAYER_START: (f64, f64) = (15.0 * 8.0, 22.0 * 8.0 + 4.0);
pub const GHOST_START: (f64, f64) = (15.0 * 8.0, 10.0 * 8.0 + 4.0);

/// Clyde retreats to its scatter anchor (20, 260) once the player is closer than
/// this many tiles. Older arcade ports aim at (4, 260) instead.
pub const CLYDE_SHY_TILES: i32 = 8;

pub const PINKY_LOOKAHEAD_TILES: i32 = 4;
pub const INKY_LOOKAHEAD_TILES: i32 = 2;

/// Tiles a pursuer may not leave upwards.
pub const NO_UP_EXIT: [(i32, i32); 4] = [(11, 14), (11, 17), (23, 14), (23, 17)];
/// Tiles a pursuer may not leave downwards (the pen door).
pub const NO_DOWN_EXIT: [(i32, i32); 2] = [(11, 15), (11, 16)];

pub const TILE_CODE_OPEN: u8 = 44;
pub const TILE_CODE_PELLET: u8 = 45;
pub const TILE_CODE_POWER_PELLET: u8 = 47;

pub fn scatter_anchor(ghost: GhostName) -> (i32, i32) {
    match ghost {
        GhostName::Blinky => (220, -12),
        GhostName::Pinky => (36, -12),
        GhostName::Inky => (236, 260),
        GhostName::Clyde => (20, 260),
    }
}

/// Cumulative offsets of the chase/scatter cadence: (timer key, ms after round start, tag).
pub const MODE_SCHEDULE: [(u32, u64, &str); 7] = [
    (1, 7_000, "chase"),
    (2, 27_000, "scatter"),
    (3, 34_000, "chase"),
    (4, 54_000, "scatter"),
    (5, 59_000, "chase"),
    (6, 79_000, "scatter"),
    (7, 84_000, "chase"),
];
