//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, input or persistence dependencies

pub mod ai;
pub mod bomb;
pub mod collision;
pub mod explosion;
pub mod grid;
pub mod state;
pub mod tick;

pub use ai::{pursuit_steps, step_enemies};
pub use bomb::{place_bomb, update_bombs, update_flames};
pub use collision::{collect_powerups, damage_player, resolve_enemy_contact, resolve_flames};
pub use explosion::{Blast, explode};
pub use grid::{GridMap, Tile};
pub use state::{
    Bomb, Direction, Enemy, FlameCell, FlameShape, GameEvent, GamePhase, GameState, Hud, Player,
    Powerup, PowerupKind, enemy_count_for_level,
};
pub use tick::{TickInput, tick};
