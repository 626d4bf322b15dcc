//! Game state and core simulation types
//!
//! One `GameState` owns the whole simulation. Entities refer to each other only
//! by grid coordinate, never by reference.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::{GridMap, Tile};
use crate::cell_to_pos;
use crate::consts::{ENEMY_SPAWNS, PLAYER_SPAWN};
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// All enemies gone; next level starts when the advance timer runs out
    Cleared,
    /// Out of lives
    GameOver,
}

/// Cardinal directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Grid step for this direction (rows grow downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Direction,
    /// Ticks of post-hit immunity left
    pub invulnerable_ticks: u32,
    pub bombs_max: u32,
    pub flame_range: u32,
    /// Bombs currently on the map
    pub active_bombs: u32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: cell_to_pos(PLAYER_SPAWN),
            facing: Direction::Right,
            invulnerable_ticks: 0,
            bombs_max: tuning.starting_bombs,
            flame_range: tuning.starting_flame_range,
            active_bombs: 0,
        }
    }

    /// Bombs the player can still place
    pub fn bombs_available(&self) -> u32 {
        self.bombs_max.saturating_sub(self.active_bombs)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }
}

/// An enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
}

/// An armed bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub cell: IVec2,
    /// Ticks until detonation
    pub fuse_ticks: u32,
    /// Blast range, frozen when the bomb is placed
    pub range: u32,
}

/// Flame shape, a rendering hint only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlameShape {
    Center,
    Arm(Direction),
}

/// A burning cell left by a detonation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameCell {
    pub cell: IVec2,
    pub shape: FlameShape,
    pub life_ticks: u32,
}

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    /// +1 flame range
    FlameRange,
    /// +1 bomb capacity
    BombCapacity,
}

/// A powerup lying on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub cell: IVec2,
    pub kind: PowerupKind,
}

/// Things that happened during a tick, for audio/HUD sinks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BombPlaced { cell: IVec2 },
    BombDetonated { cell: IVec2, range: u32 },
    SoftTileCleared { cell: IVec2 },
    PowerupDropped { cell: IVec2, kind: PowerupKind },
    PlayerHit { lives_left: u8 },
    EnemyKilled { id: u32 },
    PowerupCollected { kind: PowerupKind },
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64, level: u32 },
}

/// Plain values for a HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub enemies_left: usize,
    pub flame_range: u32,
    pub bombs_available: u32,
    pub phase: GamePhase,
}

/// Enemy count for a level: 2 at level 1, one more per level, capped by spawn cells
pub fn enemy_count_for_level(level: u32) -> usize {
    let extra = level.saturating_sub(1) as usize;
    (2 + extra).min(ENEMY_SPAWNS.len())
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG (map generation, enemy AI, drops)
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub lives: u8,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Ticks left before the next level starts (Cleared phase)
    pub advance_ticks: u32,
    pub grid: GridMap,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Armed bombs (sorted by id)
    pub bombs: Vec<Bomb>,
    pub flames: Vec<FlameCell>,
    /// Powerups on the map (sorted by id)
    pub powerups: Vec<Powerup>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Player identity for score submission
    pub identity: Option<String>,
    /// Whether this round's final score went to a recorder
    pub(crate) score_submitted: bool,
    next_id: u32,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.validated();
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = GridMap::generate(&mut rng, tuning.soft_fill_chance);
        let mut state = Self {
            seed,
            rng,
            player: Player::new(&tuning),
            lives: tuning.starting_lives,
            tuning,
            level: 1,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Running,
            advance_ticks: 0,
            grid,
            enemies: Vec::new(),
            bombs: Vec::new(),
            flames: Vec::new(),
            powerups: Vec::new(),
            events: Vec::new(),
            identity: None,
            score_submitted: false,
            next_id: 1,
        };

        state.spawn_enemies();
        log::info!(
            "Game started: seed={}, enemies={}",
            state.seed,
            state.enemies.len()
        );
        state
    }

    /// Attach a player identity for score submission
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild map and entities for the current level, keeping score and lives
    pub fn start_level(&mut self) {
        self.grid = GridMap::generate(&mut self.rng, self.tuning.soft_fill_chance);
        self.player = Player::new(&self.tuning);
        self.bombs.clear();
        self.flames.clear();
        self.powerups.clear();
        self.enemies.clear();
        self.spawn_enemies();
        self.phase = GamePhase::Running;
        self.advance_ticks = 0;
        log::info!(
            "Level {} started with {} enemies",
            self.level,
            self.enemies.len()
        );
        self.events.push(GameEvent::LevelStarted { level: self.level });
    }

    fn spawn_enemies(&mut self) {
        for &spawn in ENEMY_SPAWNS.iter().take(enemy_count_for_level(self.level)) {
            let id = self.next_entity_id();
            self.enemies.push(Enemy {
                id,
                pos: cell_to_pos(spawn),
            });
        }
    }

    /// Place a powerup on an Empty cell. Refused if the cell already holds one.
    pub fn spawn_powerup(&mut self, cell: IVec2, kind: PowerupKind) -> bool {
        if self.grid.get(cell) != Some(Tile::Empty)
            || self.powerups.iter().any(|p| p.cell == cell)
        {
            return false;
        }
        let id = self.next_entity_id();
        self.powerups.push(Powerup { id, cell, kind });
        true
    }

    pub fn bomb_at(&self, cell: IVec2) -> Option<&Bomb> {
        self.bombs.iter().find(|b| b.cell == cell)
    }

    pub fn enemies_left(&self) -> usize {
        self.enemies.len()
    }

    /// Snapshot for HUD display
    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            level: self.level,
            enemies_left: self.enemies_left(),
            flame_range: self.player.flame_range,
            bombs_available: self.player.bombs_available(),
            phase: self.phase,
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.bombs.sort_by_key(|b| b.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}
