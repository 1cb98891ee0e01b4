//! The player agent

use serde::{Deserialize, Serialize};

use super::agent::{Agent, Body};
use super::direction::Direction;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Direction asked for by input, applied once it becomes legal
    pub requested: Option<Direction>,
    /// Session-clock time at which power mode ends
    pub power_until: Option<f64>,
    /// Mouth opening (fraction of a half turn), purely cosmetic
    pub mouth: f32,
    mouth_rate: f32,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            body: Body::new(PLAYER_START, Direction::Right, speed),
            requested: None,
            power_until: None,
            mouth: MOUTH_MIN,
            mouth_rate: MOUTH_RATE,
        }
    }

    /// Remember the next direction to try; a newer request replaces an older one
    pub fn request_direction(&mut self, dir: Direction) {
        self.requested = Some(dir);
    }

    /// Start (or restart) the power window at `now`
    pub fn activate_power_mode(&mut self, now: f64, duration: f64) {
        self.power_until = Some(now + duration);
    }

    pub fn clear_power_mode(&mut self) {
        self.power_until = None;
    }

    pub fn is_powered(&self, now: f64) -> bool {
        self.power_until.is_some_and(|until| now < until)
    }

    /// True exactly once per power window: when `now` has reached its end.
    /// Clears the window so later frames see it as inactive.
    pub fn take_expired_power(&mut self, now: f64) -> bool {
        match self.power_until {
            Some(until) if now >= until => {
                self.power_until = None;
                true
            }
            _ => false,
        }
    }

    /// Move, turning into the requested direction if `can_move` allows it,
    /// else carrying on if the current direction is still open.
    pub fn steer(&mut self, can_move: impl Fn(Direction) -> bool) -> bool {
        if let Some(dir) = self.requested.filter(|d| can_move(*d)) {
            self.force_direction(dir);
            self.requested = None;
            self.advance();
            return true;
        }
        if can_move(self.current_direction()) {
            self.advance();
            return true;
        }
        false
    }

    /// Per-frame cosmetic update
    pub fn animate(&mut self) {
        self.mouth += self.mouth_rate;
        if self.mouth >= MOUTH_MAX || self.mouth <= MOUTH_MIN {
            self.mouth_rate = -self.mouth_rate;
        }
    }
}

impl Agent for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn reset_to_home(&mut self) {
        self.body.return_home();
        self.requested = None;
        self.clear_power_mode();
    }
}
