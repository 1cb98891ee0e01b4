//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One frame per tick, pixel steps per frame
//! - Seeded RNG only, threaded through the state
//! - Stable iteration order (ghosts in role order)
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod direction;
pub mod ghost;
pub mod maze;
pub mod movement;
pub mod player;
pub mod state;
pub mod tick;

pub use agent::{Agent, Body};
pub use collision::{agents_touch, pellet_reach_tiles};
pub use direction::{Direction, DirectionSet};
pub use ghost::{Ghost, GhostRole, TargetContext};
pub use maze::{Grid, Maze, PelletKind, TEMPLATE, Tile};
pub use movement::{ActorRole, is_legal, legal_directions_from, wrap_tunnel};
pub use player::Player;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, fallback_direction, tick};
