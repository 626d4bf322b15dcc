//! Bomb Grid - a tile-grid bomb arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, bombs, flames, enemies, round state)
//! - `tuning`: Data-driven game balance
//! - `highscores`: Score persistence collaborator and local leaderboard

pub mod highscores;
pub mod sim;
pub mod tuning;

pub use highscores::{HighScores, ScoreRecorder};
pub use tuning::{Difficulty, Tuning};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Logical simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Grid dimensions in tiles
    pub const GRID_COLS: i32 = 15;
    pub const GRID_ROWS: i32 = 15;
    /// Tile edge in pixels. Only renderers care about this.
    pub const TILE_SIZE: f32 = 40.0;

    /// Player spawn cell (col, row)
    pub const PLAYER_SPAWN: IVec2 = IVec2::new(1, 2);
    /// Enemy spawn cells, in the order they are unlocked by level
    pub const ENEMY_SPAWNS: [IVec2; 4] = [
        IVec2::new(13, 2),
        IVec2::new(2, 13),
        IVec2::new(13, 13),
        IVec2::new(1, 13),
    ];
}

/// Grid cell containing a continuous position (floor on both axes)
#[inline]
pub fn cell_of(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}

/// Continuous position of a cell's origin
#[inline]
pub fn cell_to_pos(cell: IVec2) -> Vec2 {
    cell.as_vec2()
}
