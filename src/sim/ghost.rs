//! Ghost AI
//!
//! Four ghosts share one state machine and differ only in where they aim:
//!
//! - Confined: still inside the house, heading for the exit
//! - Free: steering toward a role-specific target
//! - Vulnerable: slowed, harmless, wandering at random
//!
//! Each frame [`Ghost::desired_direction`] proposes a heading; the orchestrator
//! then checks it against the maze and may override it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Body};
use super::direction::Direction;
use crate::consts::*;
use crate::tuning::Tuning;

/// Which targeting rule a ghost follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostRole {
    /// Heads straight for the player
    Pursuer,
    /// Aims four tiles ahead of the player
    Ambusher,
    /// Mirrors a point ahead of the player through the pursuer
    Flanker,
    /// Chases from afar, retreats to a corner up close
    Hybrid,
}

impl GhostRole {
    /// Update order; the flanker must come after the pursuer
    pub const ALL: [GhostRole; 4] = [
        GhostRole::Pursuer,
        GhostRole::Ambusher,
        GhostRole::Flanker,
        GhostRole::Hybrid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GhostRole::Pursuer => "pursuer",
            GhostRole::Ambusher => "ambusher",
            GhostRole::Flanker => "flanker",
            GhostRole::Hybrid => "hybrid",
        }
    }

    pub fn start(self) -> Vec2 {
        match self {
            GhostRole::Pursuer => PURSUER_START,
            GhostRole::Ambusher => AMBUSHER_START,
            GhostRole::Flanker => FLANKER_START,
            GhostRole::Hybrid => HYBRID_START,
        }
    }

    fn normal_speed(self, tuning: &Tuning) -> f32 {
        match self {
            GhostRole::Pursuer => tuning.pursuer_speed,
            _ => tuning.ghost_speed,
        }
    }

    /// Where this role wants to go, given a ghost at `from`
    pub fn target(self, from: Vec2, ctx: &TargetContext, tuning: &Tuning) -> Vec2 {
        match self {
            GhostRole::Pursuer => ctx.player_pos,
            GhostRole::Ambusher => lead_point(ctx.player_pos, ctx.player_dir, AMBUSH_LEAD_TILES),
            GhostRole::Flanker => {
                let pivot = lead_point(ctx.player_pos, ctx.player_dir, FLANK_LEAD_TILES);
                pivot + (pivot - ctx.pursuer_pos)
            }
            GhostRole::Hybrid => {
                if from.distance(ctx.player_pos) > tuning.hybrid_trigger_radius {
                    ctx.player_pos
                } else {
                    HYBRID_SCATTER_CORNER
                }
            }
        }
    }
}

/// Point `tiles` ahead of `pos` along `facing`.
///
/// Facing up also shifts the point left by the same amount, matching the
/// arcade machine's overflow bug. The ambusher and flanker both rely on it.
pub fn lead_point(pos: Vec2, facing: Direction, tiles: f32) -> Vec2 {
    let offset = tiles * TILE_SIZE;
    match facing {
        Direction::Up => pos - Vec2::new(offset, offset),
        _ => pos + facing.unit() * offset,
    }
}

/// What the ghosts can see of the world when choosing a direction
#[derive(Debug, Clone, Copy)]
pub struct TargetContext {
    pub player_pos: Vec2,
    pub player_dir: Direction,
    /// Live position of the pursuer, for the flanker
    pub pursuer_pos: Vec2,
}

/// Pick a direction toward `target`: usually along the dominant axis, now and
/// then along the other one so the chase is never fully predictable.
pub fn steer_toward<R: Rng>(from: Vec2, target: Vec2, greedy_chance: f32, rng: &mut R) -> Direction {
    let delta = target - from;
    let horizontal = if delta.x > 0.0 { Direction::Right } else { Direction::Left };
    let vertical = if delta.y > 0.0 { Direction::Down } else { Direction::Up };
    let x_dominant = delta.x.abs() > delta.y.abs();

    let greedy = rng.random::<f32>() < greedy_chance;
    if x_dominant == greedy { horizontal } else { vertical }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub role: GhostRole,
    pub body: Body,
    pub vulnerable: bool,
    /// Cleared the first time the ghost climbs above the exit row
    pub in_house: bool,
    normal_speed: f32,
    frightened_speed: f32,
}

impl Ghost {
    pub fn new(role: GhostRole, tuning: &Tuning) -> Self {
        let normal_speed = role.normal_speed(tuning);
        Self {
            role,
            body: Body::new(role.start(), Direction::Left, normal_speed),
            vulnerable: false,
            in_house: true,
            normal_speed,
            frightened_speed: tuning.frightened_speed,
        }
    }

    /// Toggle frightened mode, slowing down while vulnerable
    pub fn set_vulnerable(&mut self, vulnerable: bool) {
        self.vulnerable = vulnerable;
        self.body.speed = if vulnerable {
            self.frightened_speed
        } else {
            self.normal_speed
        };
    }

    /// The heading this ghost would like to take this frame
    pub fn desired_direction<R: Rng>(&self, ctx: &TargetContext, tuning: &Tuning, rng: &mut R) -> Direction {
        if self.vulnerable {
            return Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        }

        let pos = self.body.pos;
        if self.in_house && (HOUSE_EXIT.y - pos.y).abs() > EXIT_ALIGN_TOLERANCE {
            return Direction::Up;
        }

        if self.role == GhostRole::Pursuer && rng.random::<f32>() >= tuning.pursuer_recompute_chance {
            // Momentum: hold the current heading this frame
            return self.body.direction;
        }

        let target = self.role.target(pos, ctx, tuning);
        steer_toward(pos, target, tuning.greedy_axis_chance, rng)
    }
}

impl Agent for Ghost {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn advance(&mut self) {
        self.body.step();
        if self.in_house && self.body.pos.y < EXIT_ROW * TILE_SIZE {
            self.in_house = false;
        }
    }

    fn reset_to_home(&mut self) {
        self.body.return_home();
        self.set_vulnerable(false);
        self.in_house = true;
    }
}
