//! Maze Muncher - A tile-maze pellet chase arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, movement validation, ghost AI, game state)
//! - `renderer`: Render contract plus text and canvas renderers
//! - `platform`: Browser/native platform abstraction (frame timing, input)
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::TuningError;
pub use tuning::Tuning;

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Edge length of one maze tile in logical pixels
    pub const TILE_SIZE: f32 = 30.0;
    /// Half a tile, the lookahead used when probing directions one cell ahead
    pub const HALF_TILE: f32 = TILE_SIZE / 2.0;

    /// Maze dimensions (tiles)
    pub const MAZE_WIDTH: usize = 15;
    pub const MAZE_HEIGHT: usize = 21;

    /// Every agent occupies a square of this edge length
    pub const AGENT_SIZE: f32 = 30.0;
    /// Corner inset when sampling an agent's box against the maze
    pub const CLEARANCE: f32 = 2.0;

    /// Ghosts leave the house the first time their top edge is above this row
    pub const EXIT_ROW: f32 = 9.0;
    /// Confined ghosts within this many pixels of the exit row stop forcing "up"
    pub const EXIT_ALIGN_TOLERANCE: f32 = 2.0;
    /// The opening above the ghost house
    pub const HOUSE_EXIT: Vec2 = Vec2::new(7.0 * TILE_SIZE, 6.0 * TILE_SIZE);

    /// Start positions (top-left corners, pixels)
    pub const PLAYER_START: Vec2 = Vec2::new(7.0 * TILE_SIZE, 15.0 * TILE_SIZE);
    pub const GHOST_HOUSE: Vec2 = Vec2::new(7.0 * TILE_SIZE, 8.0 * TILE_SIZE);
    pub const PURSUER_START: Vec2 = Vec2::new(GHOST_HOUSE.x, GHOST_HOUSE.y - TILE_SIZE);
    pub const AMBUSHER_START: Vec2 = Vec2::new(GHOST_HOUSE.x - TILE_SIZE, GHOST_HOUSE.y);
    pub const FLANKER_START: Vec2 = GHOST_HOUSE;
    pub const HYBRID_START: Vec2 = Vec2::new(GHOST_HOUSE.x + TILE_SIZE, GHOST_HOUSE.y);

    /// Corner the hybrid ghost retreats to when the player is close
    pub const HYBRID_SCATTER_CORNER: Vec2 = Vec2::new(0.0, 550.0);

    /// Ambush and flank lead distances (tiles)
    pub const AMBUSH_LEAD_TILES: f32 = 4.0;
    pub const FLANK_LEAD_TILES: f32 = 2.0;

    /// Pellet reach from the player's centre (pixels)
    pub const PELLET_REACH: f32 = 10.0;

    /// Scoring
    pub const PELLET_POINTS: u64 = 10;
    pub const POWER_PELLET_POINTS: u64 = 50;
    pub const GHOST_POINTS: u64 = 200;

    pub const STARTING_LIVES: u8 = 3;

    /// Mouth animation bounds and per-frame rate
    pub const MOUTH_MIN: f32 = 0.2;
    pub const MOUTH_MAX: f32 = 0.7;
    pub const MOUTH_RATE: f32 = 0.15;
}

/// Tile coordinate containing a pixel-space point
#[inline]
pub fn tile_of(pos: Vec2) -> IVec2 {
    (pos / consts::TILE_SIZE).floor().as_ivec2()
}

/// Top-left pixel of a tile
#[inline]
pub fn tile_origin(tile: IVec2) -> Vec2 {
    tile.as_vec2() * consts::TILE_SIZE
}
