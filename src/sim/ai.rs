//! Enemy pursuit
//!
//! Greedy and deliberately sluggish: each tick an enemy rolls against
//! `enemy_step_chance`, and on success tries one step toward the player,
//! column axis first, then row axis. No pathfinding around walls.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::state::GameState;

/// Preferred single-axis steps from `from` toward `to`, column first
pub fn pursuit_steps(from: Vec2, to: Vec2) -> [IVec2; 2] {
    let sign = |a: f32, b: f32| {
        if b > a {
            1
        } else if b < a {
            -1
        } else {
            0
        }
    };
    [
        IVec2::new(sign(from.x, to.x), 0),
        IVec2::new(0, sign(from.y, to.y)),
    ]
}

/// Give every enemy its chance to step toward the player
pub fn step_enemies(state: &mut GameState) {
    let chance = state.tuning.enemy_step_chance;
    let target = state.player.pos;

    for enemy in &mut state.enemies {
        if state.rng.random::<f64>() >= chance {
            continue;
        }
        let step = pursuit_steps(enemy.pos, target)
            .into_iter()
            .find(|&d| d != IVec2::ZERO && state.grid.can_move(enemy.pos, d));
        if let Some(d) = step {
            enemy.pos += d.as_vec2();
        }
    }
}
