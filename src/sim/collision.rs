//! Proximity collision judging
//!
//! Collisions are distance tests between continuous positions, with the radii
//! taken from `Tuning`. Damage to the player is gated by the invulnerability
//! window, so at most one life is lost per window no matter how many flames or
//! enemies overlap.

use super::state::{GameEvent, GamePhase, GameState, PowerupKind};
use crate::cell_to_pos;

/// Take a life from the player unless invulnerable. Returns whether the hit landed.
pub fn damage_player(state: &mut GameState) -> bool {
    if state.player.is_invulnerable() || state.lives == 0 {
        return false;
    }

    state.lives -= 1;
    state.player.invulnerable_ticks = state.tuning.invulnerability_ticks;
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });
    log::debug!("Player hit, {} lives left", state.lives);

    // The GameOver event goes out at the end of the tick, once kills are scored
    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
    }
    true
}

/// Test every live flame against the player and every enemy
pub fn resolve_flames(state: &mut GameState) {
    let radius = state.tuning.flame_hit_radius;

    let player_burned = state
        .flames
        .iter()
        .any(|f| cell_to_pos(f.cell).distance(state.player.pos) < radius);
    if player_burned {
        damage_player(state);
    }

    let flames = &state.flames;
    let mut killed = Vec::new();
    state.enemies.retain(|enemy| {
        let burned = flames
            .iter()
            .any(|f| cell_to_pos(f.cell).distance(enemy.pos) < radius);
        if burned {
            killed.push(enemy.id);
        }
        !burned
    });

    for id in killed {
        state.score += state.tuning.enemy_kill_score;
        state.events.push(GameEvent::EnemyKilled { id });
        log::debug!("Enemy {} destroyed", id);
    }
}

/// Contact damage from touching an enemy
pub fn resolve_enemy_contact(state: &mut GameState) {
    let radius = state.tuning.enemy_contact_radius;
    let touching = state
        .enemies
        .iter()
        .any(|e| e.pos.distance(state.player.pos) < radius);
    if touching {
        damage_player(state);
    }
}

/// Pick up any powerup close enough to the player
pub fn collect_powerups(state: &mut GameState) {
    let radius = state.tuning.pickup_radius;
    let player_pos = state.player.pos;
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        let hit = cell_to_pos(p.cell).distance(player_pos) < radius;
        if hit {
            collected.push(p.kind);
        }
        !hit
    });

    for kind in collected {
        match kind {
            PowerupKind::FlameRange => state.player.flame_range += 1,
            PowerupKind::BombCapacity => state.player.bombs_max += 1,
        }
        state.events.push(GameEvent::PowerupCollected { kind });
    }
}

/// Count the invulnerability window down, floored at zero
pub fn tick_invulnerability(state: &mut GameState) {
    state.player.invulnerable_ticks = state.player.invulnerable_ticks.saturating_sub(1);
}
