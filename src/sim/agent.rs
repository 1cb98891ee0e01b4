//! Shared agent plumbing for the player and the ghosts

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::consts::AGENT_SIZE;
use crate::tile_of;

/// Position, heading and speed of anything that walks the maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner of the agent's box (pixels)
    pub pos: Vec2,
    pub direction: Direction,
    /// Pixels per frame
    pub speed: f32,
    /// Where the agent respawns and which way it faces there
    pub home: Vec2,
    pub home_direction: Direction,
}

impl Body {
    pub fn new(home: Vec2, home_direction: Direction, speed: f32) -> Self {
        Self {
            pos: home,
            direction: home_direction,
            speed,
            home,
            home_direction,
        }
    }

    /// Centre of the agent's box
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(AGENT_SIZE / 2.0)
    }

    /// One unchecked speed step along the current heading
    pub fn step(&mut self) {
        self.pos += self.direction.unit() * self.speed;
    }

    /// Back to the spawn point, facing the spawn heading
    pub fn return_home(&mut self) {
        self.pos = self.home;
        self.direction = self.home_direction;
    }
}

/// Common contract for agents. Movement here is unchecked; the orchestrator
/// consults the validator before calling [`Agent::advance`].
pub trait Agent {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Put the agent back at its start and drop any transient state
    fn reset_to_home(&mut self);

    /// Move exactly one speed step along the current direction
    fn advance(&mut self) {
        self.body_mut().step();
    }

    fn current_direction(&self) -> Direction {
        self.body().direction
    }

    fn force_direction(&mut self, dir: Direction) {
        self.body_mut().direction = dir;
    }

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    /// Tile under the agent's top-left corner
    fn tile(&self) -> IVec2 {
        tile_of(self.body().pos)
    }
}
