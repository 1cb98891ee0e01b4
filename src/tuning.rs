//! Data-driven game balance
//!
//! Speeds, timers and the probabilities that keep the ghosts from being
//! perfectly predictable. Fixed maze geometry lives in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Speeds (pixels per frame) ===
    /// Player step, also the validator's projection distance for the player
    pub player_speed: f32,
    /// Base ghost speed
    pub ghost_speed: f32,
    /// The pursuer runs a little hotter than the others
    pub pursuer_speed: f32,
    /// Every ghost slows to this while vulnerable
    pub frightened_speed: f32,
    /// Distance ghosts look ahead when listing legal directions
    pub direction_lookahead: f32,

    // === Timers ===
    /// How long a power pellet keeps the ghosts vulnerable
    pub power_duration_secs: f64,
    /// Minimum wall-clock gap between processed frames
    pub frame_interval_ms: f64,

    // === Ghost behaviour ===
    /// Chance to step along the dominant axis toward a target
    pub greedy_axis_chance: f32,
    /// Chance the pursuer re-aims on a given frame
    pub pursuer_recompute_chance: f32,
    /// Chance a ghost keeps a legal desired direction instead of re-rolling
    pub keep_direction_chance: f32,
    /// Beyond this distance the hybrid ghost chases, within it retreats
    pub hybrid_trigger_radius: f32,

    // === Collisions ===
    /// Agents closer than this (top-left to top-left) are touching
    pub capture_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 4.0,
            ghost_speed: 2.2,
            pursuer_speed: 2.6,
            frightened_speed: 1.8,
            direction_lookahead: 4.0,

            power_duration_secs: 10.0,
            frame_interval_ms: 1000.0 / 60.0,

            greedy_axis_chance: 0.8,
            pursuer_recompute_chance: 0.9,
            keep_direction_chance: 0.75,
            hybrid_trigger_radius: 240.0,

            capture_radius: 24.0,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value is in a playable range
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("ghost_speed", self.ghost_speed),
            ("pursuer_speed", self.pursuer_speed),
            ("frightened_speed", self.frightened_speed),
            ("direction_lookahead", self.direction_lookahead),
            ("hybrid_trigger_radius", self.hybrid_trigger_radius),
            ("capture_radius", self.capture_radius),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::invalid(field, format!("must be positive, got {value}")));
            }
        }

        if !(self.power_duration_secs.is_finite() && self.power_duration_secs > 0.0) {
            return Err(TuningError::invalid("power_duration_secs", "must be positive"));
        }
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms > 0.0) {
            return Err(TuningError::invalid("frame_interval_ms", "must be positive"));
        }

        // Vulnerable ghosts must be catchable
        let slowest_normal = self.ghost_speed.min(self.pursuer_speed);
        if self.frightened_speed >= slowest_normal {
            return Err(TuningError::invalid(
                "frightened_speed",
                format!("must be below every normal ghost speed ({slowest_normal})"),
            ));
        }

        let chances = [
            ("greedy_axis_chance", self.greedy_axis_chance),
            ("pursuer_recompute_chance", self.pursuer_recompute_chance),
            ("keep_direction_chance", self.keep_direction_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::invalid(field, format!("must be within [0, 1], got {value}")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 3.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 3.0);
        assert_eq!(tuning.ghost_speed, Tuning::default().ghost_speed);
    }

    #[test]
    fn test_json_roundtrip_through_defaults() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_rejects_uncatchable_frightened_speed() {
        let err = Tuning::from_json(r#"{ "frightened_speed": 2.2 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "frightened_speed", .. }));
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let err = Tuning::from_json(r#"{ "greedy_axis_chance": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("greedy_axis_chance"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ player_speed: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }
}
