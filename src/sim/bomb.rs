//! Bomb placement plus the bomb and flame lifecycles

use glam::IVec2;
use rand::Rng;

use super::explosion::explode;
use super::grid::Tile;
use super::state::{Bomb, GameEvent, GameState, PowerupKind};
use crate::cell_of;

/// Drop a bomb on the player's cell.
///
/// Refused when the player is at capacity, the cell is not Empty, or a bomb
/// already sits there. Returns whether a bomb was placed.
pub fn place_bomb(state: &mut GameState) -> bool {
    let player = &state.player;
    if player.active_bombs >= player.bombs_max {
        return false;
    }
    let cell = cell_of(player.pos);
    if state.grid.get(cell) != Some(Tile::Empty) || state.bomb_at(cell).is_some() {
        return false;
    }

    let id = state.next_entity_id();
    state.bombs.push(Bomb {
        id,
        cell,
        fuse_ticks: state.tuning.bomb_fuse_ticks,
        range: state.player.flame_range,
    });
    state.player.active_bombs += 1;
    state.events.push(GameEvent::BombPlaced { cell });
    log::debug!("Bomb {} placed at {:?}", id, cell);
    true
}

/// Count down every bomb and detonate the ones whose fuse ran out
pub fn update_bombs(state: &mut GameState) {
    let mut detonated = Vec::new();
    state.bombs.retain_mut(|bomb| {
        bomb.fuse_ticks = bomb.fuse_ticks.saturating_sub(1);
        if bomb.fuse_ticks == 0 {
            detonated.push((bomb.cell, bomb.range));
            false
        } else {
            true
        }
    });

    for (cell, range) in detonated {
        state.player.active_bombs = state.player.active_bombs.saturating_sub(1);
        state.events.push(GameEvent::BombDetonated { cell, range });

        let blast = explode(
            &mut state.grid,
            cell,
            range,
            state.tuning.flame_lifetime_ticks,
        );
        state.flames.extend(blast.flames);

        for cleared in blast.cleared {
            state.events.push(GameEvent::SoftTileCleared { cell: cleared });
            maybe_drop_powerup(state, cleared);
        }
    }
}

fn maybe_drop_powerup(state: &mut GameState, cell: IVec2) {
    if state.rng.random::<f64>() >= state.tuning.powerup_drop_chance {
        return;
    }
    let kind = if state.rng.random_bool(0.5) {
        PowerupKind::FlameRange
    } else {
        PowerupKind::BombCapacity
    };
    if state.spawn_powerup(cell, kind) {
        state.events.push(GameEvent::PowerupDropped { cell, kind });
    }
}

/// Age every flame cell and drop the burnt-out ones
pub fn update_flames(state: &mut GameState) {
    state.flames.retain_mut(|flame| {
        flame.life_ticks = flame.life_ticks.saturating_sub(1);
        flame.life_ticks > 0
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::GridMap;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn open_state() -> GameState {
        let tuning = Tuning {
            powerup_drop_chance: 0.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(3, tuning);
        state.grid = GridMap::filled(9, 9, Tile::Empty);
        state.enemies.clear();
        state.player.pos = Vec2::new(4.0, 4.0);
        state
    }

    #[test]
    fn test_place_bomb_respects_capacity() {
        let mut state = open_state();
        assert!(place_bomb(&mut state));
        assert_eq!(state.player.active_bombs, 1);

        state.player.pos = Vec2::new(5.0, 4.0);
        assert!(!place_bomb(&mut state));
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.player.active_bombs, 1);
        assert_eq!(state.player.bombs_max, 1);
    }

    #[test]
    fn test_place_bomb_refuses_occupied_cell() {
        let mut state = open_state();
        state.player.bombs_max = 3;
        assert!(place_bomb(&mut state));
        assert!(!place_bomb(&mut state));
        assert_eq!(state.bombs.len(), 1);
    }

    #[test]
    fn test_place_bomb_refuses_non_empty_tile() {
        let mut state = open_state();
        state.grid.set_tile(IVec2::new(4, 4), Tile::Soft);
        assert!(!place_bomb(&mut state));
        assert!(state.bombs.is_empty());
        assert_eq!(state.player.active_bombs, 0);
    }

    #[test]
    fn test_bomb_detonates_after_fuse() {
        let mut state = open_state();
        place_bomb(&mut state);
        let fuse = state.tuning.bomb_fuse_ticks;

        for _ in 0..fuse - 1 {
            update_bombs(&mut state);
        }
        assert_eq!(state.bombs.len(), 1);
        assert!(state.flames.is_empty());

        update_bombs(&mut state);
        assert!(state.bombs.is_empty());
        assert_eq!(state.player.active_bombs, 0);
        // Center plus one cell per arm at range 1
        assert_eq!(state.flames.len(), 5);
    }

    #[test]
    fn test_range_frozen_at_placement() {
        let mut state = open_state();
        place_bomb(&mut state);
        state.player.flame_range = 4;

        for _ in 0..state.tuning.bomb_fuse_ticks {
            update_bombs(&mut state);
        }
        assert_eq!(state.flames.len(), 5);
        assert!(
            state
                .events
                .contains(&GameEvent::BombDetonated { cell: IVec2::new(4, 4), range: 1 })
        );
    }

    #[test]
    fn test_no_chain_reaction() {
        let mut state = open_state();
        state.player.bombs_max = 2;
        place_bomb(&mut state);
        state.player.pos = Vec2::new(5.0, 4.0);
        state.bombs[0].fuse_ticks = 1;
        place_bomb(&mut state);

        update_bombs(&mut state);
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.bombs[0].cell, IVec2::new(5, 4));
        assert_eq!(state.player.active_bombs, 1);
    }

    #[test]
    fn test_flames_expire() {
        let mut state = open_state();
        place_bomb(&mut state);
        state.bombs[0].fuse_ticks = 1;
        update_bombs(&mut state);
        let life = state.tuning.flame_lifetime_ticks;

        let mut last = life;
        for _ in 0..life - 1 {
            update_flames(&mut state);
            assert!(!state.flames.is_empty());
            let current = state.flames[0].life_ticks;
            assert!(current < last);
            last = current;
        }
        update_flames(&mut state);
        assert!(state.flames.is_empty());
    }

    #[test]
    fn test_blast_leaves_powerups() {
        let mut state = open_state();
        state.spawn_powerup(IVec2::new(5, 4), PowerupKind::FlameRange);
        place_bomb(&mut state);
        state.bombs[0].fuse_ticks = 1;

        update_bombs(&mut state);

        assert!(state.flames.iter().any(|f| f.cell == IVec2::new(5, 4)));
        assert_eq!(state.powerups.len(), 1);
    }

    #[test]
    fn test_cleared_tile_can_drop_powerup() {
        let mut state = open_state();
        state.tuning.powerup_drop_chance = 1.0;
        state.grid.set_tile(IVec2::new(5, 4), Tile::Soft);
        place_bomb(&mut state);
        state.bombs[0].fuse_ticks = 1;

        update_bombs(&mut state);

        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].cell, IVec2::new(5, 4));
        assert_eq!(state.grid.tile_at(IVec2::new(5, 4)), Tile::Empty);
    }
}
