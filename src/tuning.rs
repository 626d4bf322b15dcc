//! Game balance tuning
//!
//! Every gameplay constant the simulation uses, loadable from JSON so balance
//! can change without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "normal" | "n" | "med" => Some(Difficulty::Normal),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Map ===
    /// Chance a non-wall cell starts as a Soft tile
    pub soft_fill_chance: f64,
    /// Chance a cleared Soft tile drops a powerup
    pub powerup_drop_chance: f64,

    // === Player ===
    pub starting_lives: u8,
    pub starting_bombs: u32,
    pub starting_flame_range: u32,
    /// Post-hit immunity window
    pub invulnerability_ticks: u32,

    // === Bombs ===
    pub bomb_fuse_ticks: u32,
    pub flame_lifetime_ticks: u32,

    // === Collision (grid units) ===
    pub flame_hit_radius: f32,
    pub enemy_contact_radius: f32,
    pub pickup_radius: f32,

    // === Enemies ===
    /// Per-tick chance an enemy tries to step toward the player
    pub enemy_step_chance: f64,
    pub enemy_kill_score: u64,

    // === Rounds ===
    /// Delay between clearing a level and the next one starting
    pub level_advance_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            soft_fill_chance: 0.7,
            powerup_drop_chance: 0.15,

            starting_lives: 3,
            starting_bombs: 1,
            starting_flame_range: 1,
            invulnerability_ticks: 180,

            bomb_fuse_ticks: 180,
            flame_lifetime_ticks: 30,

            flame_hit_radius: 0.5,
            enemy_contact_radius: 0.8,
            pickup_radius: 0.5,

            enemy_step_chance: 0.02,
            enemy_kill_score: 100,

            level_advance_ticks: 120,
        }
    }
}

impl Tuning {
    /// Create tuning from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut tuning = Self::default();
        tuning.apply_difficulty(difficulty);
        tuning
    }

    /// Apply a difficulty preset on top of the current values.
    ///
    /// Presets scale whatever is loaded; `Normal` leaves everything as is.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => {
                self.starting_lives = self.starting_lives.saturating_add(2);
                self.enemy_step_chance *= 0.5;
            }
            Difficulty::Normal => {}
            Difficulty::Hard => {
                self.starting_lives = self.starting_lives.saturating_sub(1).max(1);
                self.enemy_step_chance = (self.enemy_step_chance * 2.0).min(1.0);
                self.invulnerability_ticks /= 2;
            }
        }
    }

    /// Clamp values into ranges the simulation can use
    pub fn validated(mut self) -> Self {
        self.soft_fill_chance = self.soft_fill_chance.clamp(0.0, 1.0);
        self.powerup_drop_chance = self.powerup_drop_chance.clamp(0.0, 1.0);
        self.enemy_step_chance = self.enemy_step_chance.clamp(0.0, 1.0);
        self.flame_hit_radius = self.flame_hit_radius.max(0.0);
        self.enemy_contact_radius = self.enemy_contact_radius.max(0.0);
        self.pickup_radius = self.pickup_radius.max(0.0);
        self.starting_lives = self.starting_lives.max(1);
        self.starting_bombs = self.starting_bombs.max(1);
        self.starting_flame_range = self.starting_flame_range.max(1);
        self
    }

    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::validated)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
                Err(e) => log::warn!("Invalid tuning in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read tuning {}: {}", path.display(), e),
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Save tuning as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}
