//! Fixed timestep simulation tick
//!
//! One call advances the game by one logical tick. The order inside a running
//! tick is fixed: player input, enemy AI, bomb fuses and detonations, flame
//! aging and hits, enemy contact, invulnerability, powerup pickup, and finally
//! the round transition check.

use super::ai::step_enemies;
use super::bomb::{place_bomb, update_bombs, update_flames};
use super::collision::{
    collect_powerups, resolve_enemy_contact, resolve_flames, tick_invulnerability,
};
use super::state::{Direction, GameEvent, GamePhase, GameState};

/// Input commands for a single tick, consumed once
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Intended movement, at most one direction
    pub direction: Option<Direction>,
    /// Drop a bomb this tick (edge-triggered)
    pub place_bomb: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Running,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Cleared => {
            state.time_ticks += 1;
            // The cleared level stays frozen until the next one is built
            state.advance_ticks = state.advance_ticks.saturating_sub(1);
            if state.advance_ticks == 0 {
                state.start_level();
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    update_player(state, input);
    step_enemies(state);
    update_bombs(state);
    update_flames(state);
    resolve_flames(state);
    resolve_enemy_contact(state);
    tick_invulnerability(state);
    collect_powerups(state);

    if state.phase == GamePhase::GameOver {
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        log::info!(
            "Game over at level {} with score {}",
            state.level,
            state.score
        );
    } else if state.enemies.is_empty() {
        state.events.push(GameEvent::LevelCleared { level: state.level });
        log::info!("Level {} cleared with score {}", state.level, state.score);
        state.level += 1;
        state.advance_ticks = state.tuning.level_advance_ticks;
        state.phase = GamePhase::Cleared;
        if state.advance_ticks == 0 {
            state.start_level();
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn update_player(state: &mut GameState, input: &TickInput) {
    if let Some(dir) = input.direction {
        state.player.facing = dir;
        let delta = dir.delta();
        if state.grid.can_move(state.player.pos, delta) {
            state.player.pos += delta.as_vec2();
        }
    }

    if input.place_bomb {
        place_bomb(state);
    }
}
