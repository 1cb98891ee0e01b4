//! Game state and core simulation types
//!
//! Everything a frontend needs to draw any frame, or to replay a run from its
//! seed, lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::ghost::{Ghost, GhostRole};
use super::maze::Maze;
use super::player::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frame driver suspended, nothing moves
    Paused,
    /// Out of lives; waits for a restart
    GameOver,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PelletEaten,
    PowerPelletEaten,
    PowerModeEnded,
    GhostEaten { role: GhostRole },
    PlayerCaught { role: GhostRole },
    LevelCleared { level: u32 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single source of randomness for every decision in the run
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub score: u64,
    /// Starts at 1, increments on every cleared board
    pub level: u32,
    pub lives: u8,
    pub phase: GamePhase,
    /// Seconds of unpaused play
    pub clock: f64,
    /// Frames simulated
    pub frame: u64,
    pub maze: Maze,
    pub player: Player,
    /// In [`GhostRole::ALL`] order
    pub ghosts: Vec<Ghost>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let ghosts = GhostRole::ALL
            .iter()
            .map(|role| Ghost::new(*role, &tuning))
            .collect();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.player_speed),
            ghosts,
            tuning,
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            phase: GamePhase::Playing,
            clock: 0.0,
            frame: 0,
            maze: Maze::new(),
            events: Vec::new(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Flip between playing and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Live position of the pursuer, which the flanker aims off
    pub fn pursuer(&self) -> Option<&Ghost> {
        self.ghosts.iter().find(|g| g.role == GhostRole::Pursuer)
    }

    pub fn power_active(&self) -> bool {
        self.player.is_powered(self.clock)
    }

    /// Start or restart the power window and frighten every ghost
    pub fn activate_power_mode(&mut self) {
        self.player
            .activate_power_mode(self.clock, self.tuning.power_duration_secs);
        for ghost in &mut self.ghosts {
            ghost.set_vulnerable(true);
        }
        log::debug!("Power mode until t={:.2}s", self.clock + self.tuning.power_duration_secs);
    }

    /// End the power window if its time is up. Called once at the top of a frame
    /// so every read of the vulnerability flags within that frame agrees.
    pub fn expire_power_mode(&mut self) {
        if self.player.take_expired_power(self.clock) {
            for ghost in &mut self.ghosts {
                ghost.set_vulnerable(false);
            }
            self.events.push(GameEvent::PowerModeEnded);
            log::debug!("Power mode ended at t={:.2}s", self.clock);
        }
    }

    /// Send every agent home. Pellets stay as they are.
    pub fn reset_positions(&mut self) {
        self.player.reset_to_home();
        for ghost in &mut self.ghosts {
            ghost.reset_to_home();
        }
    }

    /// Board cleared: next level, fresh pellets, everyone home
    pub fn advance_level(&mut self) {
        self.events.push(GameEvent::LevelCleared { level: self.level });
        log::info!("Level {} cleared (score {})", self.level, self.score);
        self.level += 1;
        self.maze.reset_to_template();
        self.reset_positions();
    }

    /// Fresh session after a game over. The RNG stream carries on so a
    /// restarted run is still reproducible from the original seed.
    pub fn restart(&mut self) {
        self.score = 0;
        self.level = 1;
        self.lives = STARTING_LIVES;
        self.phase = GamePhase::Playing;
        self.maze.reset_to_template();
        self.reset_positions();
        log::info!("Game restarted");
    }
}
