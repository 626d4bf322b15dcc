//! Bomb Grid headless runner
//!
//! Drives the simulation at a logical 60 Hz with a seeded autopilot standing in
//! for keyboard input, logs the HUD once per second and records the final
//! score in a local leaderboard.
//!
//! Usage: `bomb-grid [seed] [difficulty] [player]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bomb_grid::consts::TICK_RATE;
use bomb_grid::highscores::submit_final_score;
use bomb_grid::sim::{Direction, GameEvent, GamePhase, GameState, TickInput, tick};
use bomb_grid::{Difficulty, HighScores, Tuning};

const HIGH_SCORES_PATH: &str = "highscores.json";
const TUNING_PATH: &str = "tuning.json";
/// Stop after ten minutes of game time
const MAX_TICKS: u64 = 10 * 60 * TICK_RATE as u64;

/// Random walker that drops a bomb now and then
struct Autopilot {
    rng: Pcg32,
    heading: Option<Direction>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            heading: None,
        }
    }

    fn input(&mut self, state: &GameState) -> TickInput {
        // One step every eighth of a second, like a player tapping keys
        if state.time_ticks % 8 != 0 {
            return TickInput::default();
        }
        if self.rng.random_bool(0.3) {
            let i = self.rng.random_range(0..Direction::ALL.len());
            self.heading = Some(Direction::ALL[i]);
        }
        TickInput {
            direction: self.heading,
            place_bomb: self.rng.random_bool(0.1),
            pause: false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xB0B);
    let difficulty = args.next().and_then(|s| Difficulty::parse(&s));
    let player = args.next();

    let mut tuning = if std::path::Path::new(TUNING_PATH).exists() {
        Tuning::load_from(TUNING_PATH)
    } else {
        Tuning::default()
    };
    if let Some(difficulty) = difficulty {
        tuning.apply_difficulty(difficulty);
    }

    log::info!(
        "Bomb Grid starting: seed={}, difficulty={}",
        seed,
        difficulty.map_or("from tuning", |d| d.as_str())
    );

    let mut state = GameState::with_tuning(seed, tuning);
    if let Some(name) = player {
        state = state.with_identity(name);
    }
    let mut autopilot = Autopilot::new(seed);
    let mut high_scores = HighScores::load_from(HIGH_SCORES_PATH);

    while state.phase != GamePhase::GameOver && state.time_ticks < MAX_TICKS {
        let input = autopilot.input(&state);
        tick(&mut state, &input);

        for event in &state.events {
            match event {
                GameEvent::LevelCleared { level } => log::info!("Level {} cleared!", level),
                GameEvent::PowerupCollected { kind } => log::info!("Picked up {:?}", kind),
                _ => {}
            }
        }

        if state.time_ticks % TICK_RATE as u64 == 0 {
            let hud = state.hud();
            log::info!(
                "t={}s score={} lives={} level={} enemies={} flame={} bombs={}",
                state.time_ticks / TICK_RATE as u64,
                hud.score,
                hud.lives,
                hud.level,
                hud.enemies_left,
                hud.flame_range,
                hud.bombs_available
            );
        }
    }

    let hud = state.hud();
    log::info!(
        "Run finished ({:?}): score={} level={}",
        hud.phase,
        hud.score,
        hud.level
    );

    if submit_final_score(&mut state, &mut high_scores) == Some(true) {
        if let Err(e) = high_scores.save_to(HIGH_SCORES_PATH) {
            log::warn!("Could not save high scores: {}", e);
        }
    }
    for row in high_scores.display_rows() {
        println!("{row}");
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation runs natively only; web hosts embed the library directly
}
